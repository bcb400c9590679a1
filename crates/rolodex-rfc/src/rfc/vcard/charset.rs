//! Character set handling for CHARSET parameters and whole VCF files.

use encoding_rs::{Encoding, UTF_8};

use crate::error::{RfcError, RfcResult};

/// Looks up an encoding by its WHATWG label (`utf-8`, `ISO-8859-1`, `windows-1252`, …).
///
/// ## Errors
/// Returns [`RfcError::UnsupportedEncoding`] for unknown labels.
pub fn encoding_for_label(label: &str) -> RfcResult<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| RfcError::UnsupportedEncoding(label.to_string()))
}

/// Decodes a property value's bytes with its declared CHARSET.
///
/// Without a label the bytes are read as UTF-8. Unknown labels fall back to
/// UTF-8; malformed sequences become U+FFFD.
#[must_use]
pub fn decode_value(bytes: &[u8], charset: Option<&str>) -> String {
    let encoding = match charset {
        None => UTF_8,
        Some(label) => encoding_for_label(label).unwrap_or_else(|_| {
            tracing::warn!(charset = label, "Unknown CHARSET, decoding as UTF-8");
            UTF_8
        }),
    };
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::debug!(encoding = encoding.name(), "Malformed bytes in value replaced");
    }
    text.into_owned()
}

/// Decodes a whole VCF file.
///
/// A byte order mark wins over `label`; without either the file is read as
/// UTF-8. The BOM itself is removed.
///
/// ## Errors
/// Returns [`RfcError::UnsupportedEncoding`] if `label` is unknown.
pub fn decode_document(bytes: &[u8], label: Option<&str>) -> RfcResult<String> {
    let fallback = match label {
        Some(label) => encoding_for_label(label)?,
        None => UTF_8,
    };
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => (encoding, &bytes[bom_len..]),
        None => (fallback, bytes),
    };
    let (text, had_errors) = encoding.decode_without_bom_handling(body);
    if had_errors {
        tracing::warn!(encoding = encoding.name(), "Malformed bytes in document replaced");
    }
    Ok(text.into_owned())
}
