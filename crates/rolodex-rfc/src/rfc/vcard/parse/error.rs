//! Content-line level parse errors.
//!
//! These never leave the document parser: a line that fails to parse is
//! logged and dropped.

use std::fmt;

use thiserror::Error;

/// Result type for line-level parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// An error that occurred while decoding one content line or value.
#[derive(Debug, Clone, Error)]
#[error("line {line}: {kind}: {message}")]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Line number where the error occurred (1-based, logical lines).
    pub line: usize,
    /// Additional context or message.
    pub message: String,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, line: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            message: message.into(),
        }
    }

    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid_value(line: usize, message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::InvalidValue, line, message)
    }

    /// Creates an invalid date or time error.
    #[must_use]
    pub fn invalid_date_time(line: usize, message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::InvalidDateTime, line, message)
    }
}

/// The kind of parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Invalid property value.
    InvalidValue,
    /// Invalid property name.
    InvalidPropertyName,
    /// Invalid parameter.
    InvalidParameter,
    /// Invalid structured value.
    InvalidStructuredValue,
    /// Invalid date or time.
    InvalidDateTime,
    /// Value could not be transfer-decoded.
    EncodingError,
    /// BEGIN without matching END.
    UnexpectedEof,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue => write!(f, "invalid value"),
            Self::InvalidPropertyName => write!(f, "invalid property name"),
            Self::InvalidParameter => write!(f, "invalid parameter"),
            Self::InvalidStructuredValue => write!(f, "invalid structured value"),
            Self::InvalidDateTime => write!(f, "invalid date/time"),
            Self::EncodingError => write!(f, "encoding error"),
            Self::UnexpectedEof => write!(f, "unexpected end of input"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_line_and_kind() {
        let err = ParseError::new(ParseErrorKind::InvalidPropertyName, 7, "missing colon");
        assert_eq!(err.to_string(), "line 7: invalid property name: missing colon");
    }
}
