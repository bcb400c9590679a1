//! Loading and saving VCF files.

use std::fs;

use rolodex_rfc::error::RfcError;
use rolodex_rfc::rfc::vcard::core::{PropertyKey, VCard, VCardProperty, VCardVersion};
use rolodex_rfc::rfc::vcard::{SerializeOptions, io};

const CARD: &str = "BEGIN:VCARD\r\nVERSION:3.0\r\nN:Doe;Jane;;;\r\nFN:Jane Doe\r\nEND:VCARD\r\n";

#[test_log::test]
fn save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.vcf");

    let mut card = VCard::new();
    card.add_property(VCardProperty::text(PropertyKey::Fn, "Jane Doe"));
    card.add_property(VCardProperty::text(PropertyKey::Email, "jane@example.com"));

    io::save(&path, &[card], &SerializeOptions::new(VCardVersion::V3_0)).unwrap();
    let written = fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("BEGIN:VCARD\r\nVERSION:3.0\r\n"));

    let cards = io::load(&path, None).unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].version, VCardVersion::V3_0);
    assert_eq!(cards[0].formatted_name(), Some("Jane Doe"));
    assert_eq!(cards[0].emails(), vec!["jane@example.com"]);
}

#[test_log::test]
fn load_with_byte_order_mark() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bom.vcf");
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(CARD.as_bytes());
    fs::write(&path, bytes).unwrap();

    let cards = io::load(&path, None).unwrap();
    assert_eq!(cards[0].formatted_name(), Some("Jane Doe"));
}

#[test_log::test]
fn load_latin1_with_label() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin1.vcf");
    // "Müller" in ISO-8859-1
    fs::write(
        &path,
        b"BEGIN:VCARD\r\nVERSION:3.0\r\nFN:M\xfcller\r\nEND:VCARD\r\n",
    )
    .unwrap();

    let cards = io::load(&path, Some("ISO-8859-1")).unwrap();
    assert_eq!(cards[0].formatted_name(), Some("Müller"));
}

#[test]
fn load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.vcf");

    let err = io::load(&path, None).unwrap_err();
    assert!(matches!(err, RfcError::NotFound(p) if p == path));
}

#[test]
fn load_unknown_encoding() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("card.vcf");
    fs::write(&path, CARD).unwrap();

    let err = io::load(&path, Some("no-such-charset")).unwrap_err();
    assert!(matches!(err, RfcError::UnsupportedEncoding(_)));
}

#[test]
fn save_into_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope").join("card.vcf");

    let err = io::save(&path, &[], &SerializeOptions::default()).unwrap_err();
    assert!(matches!(err, RfcError::NotFound(_)));
}
