//! Serializer options.

use std::sync::Arc;

use crate::rfc::vcard::core::{ChronoTzConverter, TimeZoneConverter, VCardVersion};

/// Controls how cards are written.
#[derive(Debug, Clone)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "independent output switches"
)]
pub struct SerializeOptions {
    /// Target version; the version stored in each card is ignored.
    pub version: VCardVersion,
    /// Write the RFC 9554 components of N and ADR (4.0 only).
    pub write_rfc9554_extensions: bool,
    /// Write properties the target version lacks under their vendor `X-` key.
    pub write_x_extensions: bool,
    /// Write unknown (`X-` and vendor) properties.
    pub write_non_standard: bool,
    /// Write properties without a value.
    pub write_empty_properties: bool,
    /// PRODID written after VERSION, replacing any PRODID of the card.
    pub product_id: Option<String>,
    /// Converts TZ names to UTC offsets for versions without named zones.
    pub tz_converter: Option<Arc<dyn TimeZoneConverter>>,
}

impl SerializeOptions {
    /// Default options for `version`.
    #[must_use]
    pub fn new(version: VCardVersion) -> Self {
        Self {
            version,
            ..Self::default()
        }
    }

    pub(crate) fn converter(&self) -> Option<&dyn TimeZoneConverter> {
        self.tz_converter.as_deref()
    }
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            version: VCardVersion::V4_0,
            write_rfc9554_extensions: false,
            write_x_extensions: true,
            write_non_standard: true,
            write_empty_properties: false,
            product_id: None,
            tz_converter: Some(Arc::new(ChronoTzConverter)),
        }
    }
}
