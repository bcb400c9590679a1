//! Content line folding (RFC 6350 §3.2).

/// Maximum line length in octets (not including CRLF).
const MAX_LINE_OCTETS: usize = 75;

/// Maximum quoted-printable line length, including the soft break `=`.
const MAX_QP_LINE_OCTETS: usize = 76;

/// Folds a content line to comply with the 75-octet limit.
///
/// Lines are folded by inserting CRLF followed by a single space. A fold
/// never splits a UTF-8 multi-byte sequence or a backslash escape. The
/// result carries no trailing CRLF.
#[must_use]
pub fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }

    let mut result = String::with_capacity(line.len() + (line.len() / MAX_LINE_OCTETS + 1) * 3);
    let mut width = 0;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        let escaped = (c == '\\').then(|| chars.next()).flatten();
        let unit_len = c.len_utf8() + escaped.map_or(0, char::len_utf8);

        if width > 0 && width + unit_len > MAX_LINE_OCTETS {
            result.push_str("\r\n ");
            width = 1;
        }
        result.push(c);
        if let Some(next) = escaped {
            result.push(next);
        }
        width += unit_len;
    }

    result
}

/// Folds a quoted-printable line with `=` soft line breaks.
///
/// `head` is everything up to and including the `:`; `value` is the
/// encoded value. Physical lines stay within 76 octets including the soft
/// break, an `=XX` triplet is never split, and breaks only occur inside the
/// value. Continuation lines have no leading space.
#[must_use]
pub fn fold_quoted_printable(head: &str, value: &str) -> String {
    let mut result = String::with_capacity(head.len() + value.len() + value.len() / 24);
    result.push_str(head);
    let mut width = head.len();
    let bytes = value.as_bytes();
    let mut pos = 0;

    while pos < bytes.len() {
        let unit_len = if bytes[pos] == b'=' { 3 } else { 1 };
        let end = (pos + unit_len).min(bytes.len());
        let last = end == bytes.len();
        // the final unit needs no room for a soft break
        let limit = if last {
            MAX_QP_LINE_OCTETS
        } else {
            MAX_QP_LINE_OCTETS - 1
        };

        if width + (end - pos) > limit {
            result.push_str("=\r\n");
            width = 0;
        }
        result.push_str(&value[pos..end]);
        width += end - pos;
        pos = end;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unfold(folded: &str) -> String {
        folded.replace("\r\n ", "")
    }

    #[test]
    fn short_line_unchanged() {
        assert_eq!(fold_line("FN:Short"), "FN:Short");
    }

    #[test]
    fn fold_exactly_75() {
        let line = "X".repeat(75);
        assert_eq!(fold_line(&line), line);
    }

    #[test]
    fn fold_at_75_octets() {
        let line = "A".repeat(80);
        let result = fold_line(&line);

        let lines: Vec<&str> = result.split("\r\n").collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), 75);
        assert_eq!(lines[1], format!(" {}", "A".repeat(5)));
    }

    #[test]
    fn fold_multiple_times() {
        let line = "X".repeat(200);
        let result = fold_line(&line);

        assert!(result.split("\r\n").all(|l| l.len() <= 75));
        assert_eq!(unfold(&result), line);
    }

    #[test]
    fn fold_respects_utf8() {
        // the two-byte character starts at octet 75
        let line = format!("{}é{}", "A".repeat(74), "B".repeat(10));
        let result = fold_line(&line);

        let lines: Vec<&str> = result.split("\r\n").collect();
        assert_eq!(lines[0], "A".repeat(74));
        assert!(lines[1].starts_with(" é"));
        assert_eq!(unfold(&result), line);
        assert_eq!(fold_line(&unfold(&result)), result);
    }

    #[test]
    fn fold_keeps_escapes_together() {
        let line = format!("{}\\nrest", "A".repeat(74));
        let result = fold_line(&line);

        assert!(result.starts_with(&format!("{}\r\n \\n", "A".repeat(74))));
        assert_eq!(unfold(&result), line);
    }

    #[test]
    fn quoted_printable_short_value() {
        assert_eq!(fold_quoted_printable("NOTE:", "abc"), "NOTE:abc");
    }

    #[test]
    fn quoted_printable_soft_breaks() {
        let value = "=C3=A9".repeat(30);
        let result = fold_quoted_printable("NOTE;ENCODING=QUOTED-PRINTABLE:", &value);

        for line in result.split("\r\n") {
            assert!(line.len() <= 76, "{line}");
        }
        let joined: String = result.split("=\r\n").collect();
        assert_eq!(joined, format!("NOTE;ENCODING=QUOTED-PRINTABLE:{value}"));
        // every continuation starts with a complete triplet
        assert!(result.split("=\r\n").skip(1).all(|l| l.starts_with("=C3") || l.starts_with("=A9")));
    }
}
