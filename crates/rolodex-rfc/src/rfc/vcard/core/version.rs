//! vCard version handling.

use std::fmt;

/// The vCard versions this crate reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum VCardVersion {
    /// vCard 2.1 (Versit, 1996).
    V2_1,
    /// vCard 3.0 (RFC 2426).
    V3_0,
    /// vCard 4.0 (RFC 6350).
    #[default]
    V4_0,
}

impl VCardVersion {
    /// Parses the value of a `VERSION` property.
    ///
    /// Unknown values yield `None`; the caller decides on a fallback.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "2.1" | "2.0" => Some(Self::V2_1),
            "3.0" => Some(Self::V3_0),
            "4.0" => Some(Self::V4_0),
            _ => None,
        }
    }

    /// Returns the `VERSION` property value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V2_1 => "2.1",
            Self::V3_0 => "3.0",
            Self::V4_0 => "4.0",
        }
    }

    /// Separator used between the sub-values of one compound slot.
    ///
    /// vCard 2.1 has no list syntax, so repeated sub-values are joined by a space.
    #[must_use]
    pub const fn sub_value_separator(self) -> char {
        match self {
            Self::V2_1 => ' ',
            Self::V3_0 | Self::V4_0 => ',',
        }
    }
}

impl fmt::Display for VCardVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
