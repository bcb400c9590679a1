//! vCard text escaping.
//!
//! The inverse of [`unmask`](crate::rfc::vcard::parse::unmask), dispatched
//! on the version the same way.

use crate::rfc::vcard::core::VCardVersion;

/// Escapes a text value or one component of a compound value.
///
/// vCard 3.0 and 4.0 escape backslash, newline, comma and semicolon.
/// vCard 2.1 only escapes backslash and semicolon; newlines are left for
/// quoted-printable encoding. Carriage returns are dropped in every version.
#[must_use]
pub fn mask(s: &str, version: VCardVersion) -> String {
    let full = version >= VCardVersion::V3_0;
    let mut result = String::with_capacity(s.len());

    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            ';' => result.push_str("\\;"),
            ',' if full => result.push_str("\\,"),
            '\n' if full => result.push_str("\\n"),
            '\r' => {}
            _ => result.push(c),
        }
    }

    result
}

/// Escapes a parameter value for serialization.
///
/// vCard 4.0 uses RFC 6868 caret encoding. Older versions have no escape
/// mechanism, so double quotes become single quotes and line breaks become
/// spaces. Returns `(value, needs_quotes)`.
#[must_use]
pub fn escape_param_value(s: &str, version: VCardVersion) -> (String, bool) {
    let caret = version == VCardVersion::V4_0;
    let mut result = String::with_capacity(s.len());
    let mut needs_quotes = false;

    for c in s.chars() {
        match c {
            '^' if caret => result.push_str("^^"),
            '\n' if caret => result.push_str("^n"),
            '\n' => result.push(' '),
            '"' if caret => {
                result.push_str("^'");
                needs_quotes = true;
            }
            '"' => {
                result.push('\'');
                needs_quotes = true;
            }
            ':' | ';' | ',' => {
                result.push(c);
                needs_quotes = true;
            }
            _ if c.is_control() => {}
            _ => result.push(c),
        }
    }

    (result, needs_quotes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::vcard::parse::unmask;

    const V3: VCardVersion = VCardVersion::V3_0;
    const V4: VCardVersion = VCardVersion::V4_0;

    #[test]
    fn mask_plain_text_is_unchanged() {
        for version in [VCardVersion::V2_1, V3, V4] {
            assert_eq!(mask("hello world", version), "hello world");
        }
    }

    #[test]
    fn mask_newline() {
        assert_eq!(mask("line1\nline2", V4), "line1\\nline2");
        assert_eq!(mask("line1\r\nline2", V3), "line1\\nline2");
    }

    #[test]
    fn mask_special() {
        assert_eq!(mask("a,b;c\\d", V3), "a\\,b\\;c\\\\d");
    }

    #[test]
    fn mask_version_2_1_is_restricted() {
        assert_eq!(mask("a,b;c\\d\ne", VCardVersion::V2_1), "a,b\\;c\\\\d\ne");
    }

    #[test]
    fn unmask_reverses_mask() {
        let samples = ["plain", "a;b,c", "back\\slash", "multi\nline", "\\n literal", "tail\\"];
        for version in [VCardVersion::V2_1, V3, V4] {
            for sample in samples {
                assert_eq!(unmask(&mask(sample, version), version), sample, "{version}");
            }
        }
    }

    #[test]
    fn escape_param_no_quotes() {
        let (val, needs_quotes) = escape_param_value("simple", V4);
        assert_eq!(val, "simple");
        assert!(!needs_quotes);
    }

    #[test]
    fn escape_param_with_colon() {
        let (val, needs_quotes) = escape_param_value("value:with:colons", V4);
        assert_eq!(val, "value:with:colons");
        assert!(needs_quotes);
    }

    #[test]
    fn escape_param_with_newline() {
        assert_eq!(escape_param_value("line1\nline2", V4).0, "line1^nline2");
        assert_eq!(escape_param_value("line1\nline2", V3).0, "line1 line2");
    }

    #[test]
    fn escape_param_with_quote() {
        let (val, needs_quotes) = escape_param_value("say \"hello\"", V4);
        assert_eq!(val, "say ^'hello^'");
        assert!(needs_quotes);

        let (val, _) = escape_param_value("say \"hello\"", V3);
        assert_eq!(val, "say 'hello'");
    }

    #[test]
    fn escape_param_with_caret() {
        assert_eq!(escape_param_value("a^b", V4).0, "a^^b");
        assert_eq!(escape_param_value("a^b", V3).0, "a^b");
    }
}
