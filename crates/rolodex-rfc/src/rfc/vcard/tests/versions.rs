//! Converting documents between vCard 2.1, 3.0 and 4.0.

use pretty_assertions::assert_eq;

use super::fixtures::*;
use crate::rfc::vcard::build::{SerializeOptions, serialize};
use crate::rfc::vcard::core::{
    AddressField, ContactId, Name, NameField, PropertyKey, Relation, TimeZoneId, VCard,
    VCardProperty, VCardVersion, types,
};
use crate::rfc::vcard::parse::parse;

fn convert(input: &str, version: VCardVersion) -> String {
    serialize(&parse(input), &SerializeOptions::new(version))
}

fn unfold(text: &str) -> String {
    text.replace("\r\n ", "")
}

#[test]
fn name_from_4_to_3() {
    let input = "BEGIN:VCARD\r\nVERSION:4.0\r\nFN:Jane Doe\r\nN:Doe;Jane;;;\r\nEND:VCARD\r\n";
    let output = convert(input, VCardVersion::V3_0);
    assert_eq!(
        output,
        "BEGIN:VCARD\r\nVERSION:3.0\r\nFN:Jane Doe\r\nN:Doe;Jane;;;\r\nEND:VCARD\r\n"
    );
}

#[test]
fn generations_per_version() {
    let name = Name::builder()
        .add(NameField::Surnames, "Doe")
        .add_all(NameField::Generations, ["Jr.", "III"])
        .build();
    let mut card = VCard::new();
    card.add_property(VCardProperty::text(PropertyKey::Fn, "John Doe"));
    card.add_property(VCardProperty::new(PropertyKey::N, name));

    let mut options = SerializeOptions::new(VCardVersion::V4_0);
    options.write_rfc9554_extensions = true;
    assert!(serialize(&[card.clone()], &options).contains("\r\nN:Doe;;;;Jr.,III;;Jr.,III\r\n"));

    let output = serialize(&[card], &SerializeOptions::new(VCardVersion::V2_1));
    assert!(output.contains("\r\nN:Doe;;;;Jr. III\r\n"));
}

#[test]
fn street_name_survives_4_with_extensions() {
    let address = crate::rfc::vcard::core::Address::builder()
        .add(AddressField::StreetName, "Main Street")
        .add(AddressField::StreetNumber, "12")
        .build();
    let mut card = VCard::new();
    card.add_property(VCardProperty::text(PropertyKey::Fn, "X"));
    card.add_property(VCardProperty::new(PropertyKey::Adr, address));

    let mut options = SerializeOptions::new(VCardVersion::V4_0);
    options.write_rfc9554_extensions = true;
    let cards = parse(&serialize(&[card], &options));
    let parsed = cards[0].addresses()[0].clone();
    assert_eq!(parsed.street_name(), ["Main Street"]);
    assert_eq!(parsed.street_number(), ["12"]);
    assert!(parsed.street().is_empty());
}

#[test]
fn v3_to_v4() {
    let output = unfold(&convert(VCARD_V3_FULL, VCardVersion::V4_0));

    assert!(output.contains("VERSION:4.0\r\n"));
    assert!(output.contains("EMAIL;TYPE=internet;PREF=1:john@example.com\r\n"));
    assert!(output.contains(
        "ADR;TYPE=home;LABEL=\"42 Elm St^nShelbyville, IL 62565\":;;42 Elm St;Shelbyville;IL;62565;USA\r\n"
    ));
    assert!(output.contains("ANNIVERSARY:20010908\r\n"));
    assert!(output.contains("GEO:geo:39.41,-88.79\r\n"));
    assert!(output.contains("TZ;VALUE=utc-offset:-0500\r\n"));
    assert!(output.contains("PHOTO:data:image/jpeg;base64,/9j/4AAQ\r\n"));
    assert!(output.contains("UID;VALUE=text:john-smith-1\r\n"));
    assert!(!output.contains("CLASS"));
    assert!(!output.contains("SORT-STRING"));
    assert!(!output.contains("\r\nLABEL"));
}

#[test]
fn v4_to_v3() {
    let output = unfold(&convert(VCARD_V4_FULL, VCardVersion::V3_0));

    assert!(output.contains("VERSION:3.0\r\n"));
    assert!(output.contains("EMAIL;TYPE=WORK,PREF:jane@example.com\r\n"));
    assert!(output.contains("EMAIL;TYPE=HOME:jane.doe@example.org\r\n"));
    assert!(output.contains("ADR;TYPE=WORK:;;100 Main St;Springfield;IL;62701;USA\r\n"));
    assert!(output.contains("LABEL;TYPE=WORK:100 Main St\\nSpringfield\\, IL\r\n"));
    assert!(output.contains("BDAY:1980-01-15\r\n"));
    assert!(output.contains("X-ANNIVERSARY:--06-12\r\n"));
    assert!(output.contains("X-GENDER:Female\r\n"));
    assert!(output.contains("X-ADDRESSBOOKSERVER-KIND:individual\r\n"));
    assert!(output.contains("GEO:39.78;-89.65\r\n"));
    assert!(output.contains("PHOTO;ENCODING=b;TYPE=PNG:iVBORw0KGgo=\r\n"));
    assert!(output.contains("REV:2024-01-15T10:30:00Z\r\n"));
    assert!(!output.contains("LANG"));
    assert!(!output.contains("\r\nKIND:"));
}

#[test]
fn v4_to_v21_uses_quoted_printable() {
    let input = "\
BEGIN:VCARD\r\n\
VERSION:4.0\r\n\
FN:Zoë\r\n\
NOTE:two\\nlines\r\n\
TEL;TYPE=cell;PREF=1:+1-555\r\n\
END:VCARD\r\n";
    let output = convert(input, VCardVersion::V2_1);

    assert!(output.starts_with("BEGIN:VCARD\r\nVERSION:2.1\r\nN:;;;;\r\n"));
    assert!(output.contains("FN;ENCODING=QUOTED-PRINTABLE;CHARSET=UTF-8:Zo=C3=AB\r\n"));
    assert!(output.contains("NOTE;ENCODING=QUOTED-PRINTABLE;CHARSET=UTF-8:two=0D=0Alines\r\n"));
    assert!(output.contains("TEL;CELL;PREF:+1-555\r\n"));

    let card = &parse(&output)[0];
    assert_eq!(card.formatted_name(), Some("Zoë"));
    assert_eq!(card.get_property(&PropertyKey::Note).unwrap().as_text(), Some("two\nlines"));
}

#[test]
fn v21_agent_to_v4() {
    let cards = parse(&convert(VCARD_V21_AGENT, VCardVersion::V4_0));
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[1].formatted_name(), Some("Harry Helper"));

    let uid = cards[1].uid().unwrap();
    assert!(matches!(uid, ContactId::Uuid(_)));
    let related = cards[0].get_property(&PropertyKey::Related).unwrap();
    assert!(related.has_type(types::AGENT));
    assert_eq!(related.value.as_relation().and_then(Relation::contact_id), Some(uid));
}

#[test]
fn v3_agent_to_v21() {
    let output = convert(VCARD_V3_AGENT, VCardVersion::V2_1);
    assert!(output.contains(
        "AGENT:\r\nBEGIN:VCARD\r\nVERSION:2.1\r\nN:Helper;Harry;;;\r\nFN:Harry Helper\r\nEND:VCARD\r\n"
    ));

    let card = &parse(&output)[0];
    match card.get_property(&PropertyKey::Related).unwrap().value.as_relation() {
        Some(Relation::VCard(agent)) => assert_eq!(agent.formatted_name(), Some("Harry Helper")),
        other => panic!("agent not embedded: {other:?}"),
    }
}

#[test]
fn v21_agent_to_v3() {
    let output = unfold(&convert(VCARD_V21_AGENT, VCardVersion::V3_0));
    assert!(output.contains("AGENT:BEGIN:VCARD\\nVERSION:3.0\\nN:Helper\\;Harry\\;\\;\\;\\nFN:Harry Helper\\n"));
    assert_eq!(parse(&output).len(), 1);
}

#[test]
fn time_zone_names_become_offsets() {
    let mut card = VCard::new();
    card.add_property(VCardProperty::text(PropertyKey::Fn, "Tokyo"));
    card.add_property(VCardProperty::new(
        PropertyKey::Tz,
        TimeZoneId::Name("Asia/Tokyo".into()),
    ));

    let v4 = serialize(&[card.clone()], &SerializeOptions::new(VCardVersion::V4_0));
    assert!(v4.contains("TZ:Asia/Tokyo\r\n"));
    let v3 = serialize(&[card.clone()], &SerializeOptions::new(VCardVersion::V3_0));
    assert!(v3.contains("TZ:+09:00\r\n"));
    let v21 = serialize(&[card], &SerializeOptions::new(VCardVersion::V2_1));
    assert!(v21.contains("TZ:+09:00\r\n"));
}

#[test]
fn vendor_properties_are_folded_in() {
    let input = "\
BEGIN:VCARD\r\n\
VERSION:3.0\r\n\
FN:Vendor\r\n\
X-JABBER:vendor@example.com\r\n\
X-SPOUSE:Pat\r\n\
X-GENDER:Male\r\n\
END:VCARD\r\n";
    let output = convert(input, VCardVersion::V4_0);
    assert!(output.contains("IMPP;SERVICE-TYPE=Jabber:xmpp:vendor@example.com\r\n"));
    assert!(output.contains("RELATED;TYPE=spouse;VALUE=text:Pat\r\n"));
    assert!(output.contains("GENDER:M\r\n"));

    let back = convert(&output, VCardVersion::V3_0);
    assert!(back.contains("X-SPOUSE:Pat\r\n"));
    assert!(back.contains("X-GENDER:Male\r\n"));
}

#[test]
fn product_id_is_written_after_version() {
    let mut options = SerializeOptions::new(VCardVersion::V3_0);
    options.product_id = Some("-//Example//rolodex//EN".into());
    let output = serialize(&parse(VCARD_V4_MINIMAL), &options);
    assert!(output.starts_with(
        "BEGIN:VCARD\r\nVERSION:3.0\r\nPRODID:-//Example//rolodex//EN\r\nN:;;;;\r\nFN:John Doe\r\n"
    ));
}
