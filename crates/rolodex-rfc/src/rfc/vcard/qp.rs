//! Quoted-printable transfer encoding (RFC 2045 §6.7) as used by vCard 2.1.

use std::fmt::Write as _;

/// Decodes a quoted-printable value to bytes.
///
/// Malformed escapes are kept literally. Soft line breaks (`=` at the end of
/// a line) are removed.
#[must_use]
pub fn decode(input: &str) -> Vec<u8> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b != b'=' {
            out.push(b);
            i += 1;
            continue;
        }

        match (bytes.get(i + 1), bytes.get(i + 2)) {
            (Some(b'\r'), Some(b'\n')) => i += 3,
            (Some(b'\n'), _) => i += 2,
            (Some(&hi), Some(&lo)) => match (hex_value(hi), hex_value(lo)) {
                (Some(hi), Some(lo)) => {
                    out.push((hi << 4) | lo);
                    i += 3;
                }
                _ => {
                    out.push(b'=');
                    i += 1;
                }
            },
            // trailing '=' is a soft break at the end of input
            (None, _) => i += 1,
            (Some(_), None) => {
                out.push(b'=');
                i += 1;
            }
        }
    }

    out
}

/// Encodes text as quoted-printable without line breaks.
///
/// Line feeds become `=0D=0A`; folding with soft breaks is left to the
/// serializer.
#[must_use]
pub fn encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len() * 3);
    let bytes = input.as_bytes();

    for (i, &b) in bytes.iter().enumerate() {
        let last = i + 1 == bytes.len();
        match b {
            b'\n' => out.push_str("=0D=0A"),
            b' ' | b'\t' if !last => out.push(char::from(b)),
            b'!'..=b'<' | b'>'..=b'~' => out.push(char::from(b)),
            _ => {
                write!(out, "={b:02X}").ok();
            }
        }
    }

    out
}

/// Returns whether a value must be quoted-printable encoded in vCard 2.1:
/// it contains non-ASCII or control characters.
#[must_use]
pub fn needs_encoding(value: &str) -> bool {
    value
        .bytes()
        .any(|b| !b.is_ascii() || (b.is_ascii_control() && b != b'\t'))
}

const fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'A'..=b'F' => Some(b - b'A' + 10),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}
