//! Content line decoder.
//!
//! Splits one unfolded line into group, name, parameters and raw value.
//! The three vCard versions disagree on parameter syntax:
//!
//! - 2.1 allows bare parameter values (`TEL;HOME;VOICE:…`), which are TYPE
//!   values, or ENCODING values for the transfer encodings.
//! - 3.0 and 4.0 use `NAME=value[,value]*` with optional double quotes.
//! - 4.0 additionally applies RFC 6868 caret escapes.

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::vcard::core::{VCardParameter, VCardVersion};

/// A parsed content line before value interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    /// Property group (e.g., "item1" in "item1.TEL").
    pub group: Option<String>,
    /// Property name (uppercase).
    pub name: String,
    /// Parameters in order of appearance.
    pub params: Vec<VCardParameter>,
    /// Raw value string: not unescaped, not transfer-decoded.
    pub value: String,
}

impl ContentLine {
    /// Returns the first parameter with the given name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&VCardParameter> {
        self.params.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

/// Parses a single content line into its components.
///
/// Format: `[group.]name[;param[=value]]*:value`
///
/// ## Errors
/// Returns an error if the line has no colon separator or an invalid name.
pub fn parse_content_line(
    line: &str,
    line_num: usize,
    version: VCardVersion,
) -> ParseResult<ContentLine> {
    let colon_pos = find_value_separator(line).ok_or_else(|| {
        ParseError::new(
            ParseErrorKind::InvalidPropertyName,
            line_num,
            "missing colon separator",
        )
    })?;

    let (name_params, value) = line.split_at(colon_pos);
    let value = &value[1..];

    let (group, name_params) = parse_group(name_params);

    let (name, params_str) = match name_params.split_once(';') {
        Some((name, params)) => (name, Some(params)),
        None => (name_params, None),
    };
    let name = name.trim();

    if name.is_empty()
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ParseError::new(
            ParseErrorKind::InvalidPropertyName,
            line_num,
            format!("invalid property name: {name}"),
        ));
    }

    let params = params_str
        .map(|s| parse_parameters(s, version))
        .unwrap_or_default();

    Ok(ContentLine {
        group: group.map(String::from),
        name: name.to_ascii_uppercase(),
        params,
        value: value.to_string(),
    })
}

/// Finds the colon that separates name/params from value.
///
/// Colons inside quoted parameter values are skipped.
fn find_value_separator(line: &str) -> Option<usize> {
    let mut in_quotes = false;

    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ':' if !in_quotes => return Some(i),
            _ => {}
        }
    }

    None
}

/// Parses the optional group prefix of the property name.
fn parse_group(s: &str) -> (Option<&str>, &str) {
    let key_end = s.find(';').unwrap_or(s.len());
    if let Some(dot_pos) = s[..key_end].find('.') {
        let potential_group = &s[..dot_pos];
        if !potential_group.is_empty()
            && potential_group
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return (Some(potential_group), &s[dot_pos + 1..]);
        }
    }
    (None, s)
}

/// Parses the parameter part (after the first `;`).
fn parse_parameters(s: &str, version: VCardVersion) -> Vec<VCardParameter> {
    let mut params = Vec::new();
    let mut remaining = s;

    while !remaining.is_empty() {
        let name_end = remaining.find(['=', ';']).unwrap_or(remaining.len());
        let name = remaining[..name_end].trim();

        if remaining[name_end..].starts_with('=') {
            let (values, rest) = parse_param_values(&remaining[name_end + 1..], version);
            if !name.is_empty() {
                params.push(VCardParameter::multi(name, values));
            }
            remaining = rest;
        } else {
            if !name.is_empty() {
                params.push(bare_parameter(name));
            }
            remaining = remaining.get(name_end + 1..).unwrap_or("");
        }
    }

    params
}

/// Interprets a parameter given without a name.
fn bare_parameter(token: &str) -> VCardParameter {
    if ["QUOTED-PRINTABLE", "BASE64", "8BIT", "7BIT"]
        .iter()
        .any(|e| token.eq_ignore_ascii_case(e))
    {
        VCardParameter::new("ENCODING", token)
    } else {
        VCardParameter::new("TYPE", token)
    }
}

/// Parses parameter values (comma-separated, possibly quoted) and returns the
/// text after the terminating `;`.
fn parse_param_values(s: &str, version: VCardVersion) -> (Vec<String>, &str) {
    let caret = version == VCardVersion::V4_0;
    let mut values = Vec::new();
    let mut current_value = String::new();
    let mut in_quotes = false;
    let mut chars = s.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => values.push(std::mem::take(&mut current_value)),
            ';' if !in_quotes => {
                values.push(current_value);
                return (values, &s[i + 1..]);
            }
            '^' if caret => match chars.peek().map(|&(_, next)| next) {
                Some('n' | 'N') => {
                    chars.next();
                    current_value.push('\n');
                }
                Some('\'') => {
                    chars.next();
                    current_value.push('"');
                }
                Some('^') => {
                    chars.next();
                    current_value.push('^');
                }
                _ => current_value.push('^'),
            },
            _ => current_value.push(c),
        }
    }

    values.push(current_value);
    (values, "")
}
