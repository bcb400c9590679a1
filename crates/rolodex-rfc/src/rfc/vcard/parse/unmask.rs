//! Splitting of compound values and removal of backslash escapes.

use crate::rfc::vcard::core::VCardVersion;

/// How [`split_unescaped`] treats empty pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMode {
    /// Keep empty pieces (positional compound values such as N or ADR).
    Keep,
    /// Drop empty pieces (lists such as NICKNAME or CATEGORIES).
    DropEmpty,
}

/// Splits `span` on every `delimiter` that is not escaped with a backslash.
///
/// The pieces keep their escape sequences, so they can be split again on
/// another delimiter before being unmasked.
#[must_use]
pub fn split_unescaped(span: &str, delimiter: char, mode: SplitMode) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut chars = span.char_indices();

    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            // skip the escaped character
            chars.next();
        } else if c == delimiter {
            parts.push(&span[start..i]);
            start = i + c.len_utf8();
        }
    }
    parts.push(&span[start..]);

    if mode == SplitMode::DropEmpty {
        parts.retain(|p| !p.is_empty());
    }
    parts
}

/// Removes backslash escapes.
///
/// All versions recognise `\\`, `\;` and `\n`/`\N`; vCard 3.0 and 4.0 also
/// `\,`. Any other backslash sequence is kept as it is.
#[must_use]
pub fn unmask(s: &str, version: VCardVersion) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    let full = version >= VCardVersion::V3_0;

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.peek() {
            Some('\\') => {
                chars.next();
                result.push('\\');
            }
            Some(';') => {
                chars.next();
                result.push(';');
            }
            Some(',') if full => {
                chars.next();
                result.push(',');
            }
            Some('n' | 'N') => {
                chars.next();
                result.push('\n');
            }
            _ => result.push(c),
        }
    }

    result
}

/// Splits a list value on unescaped commas and unmasks each item.
#[must_use]
pub fn split_list(span: &str, version: VCardVersion) -> Vec<String> {
    split_unescaped(span, ',', SplitMode::DropEmpty)
        .into_iter()
        .map(|item| unmask(item, version))
        .filter(|item| !item.trim().is_empty())
        .collect()
}
