//! vCard serialization (vCard 2.1, RFC 2426, RFC 6350).
//!
//! This module provides serializers for vCard content:
//! - Escape: Text and parameter value escaping
//! - Fold: Content line folding at 75 octets, and quoted-printable soft breaks
//! - Values: Formatting of structured and typed values per version
//! - Serializer: Full document serialization with canonical ordering
//!
//! ## Usage
//!
//! ```rust
//! use rolodex_rfc::rfc::vcard::build::{SerializeOptions, serialize};
//! use rolodex_rfc::rfc::vcard::core::{PropertyKey, VCard, VCardProperty, VCardVersion};
//!
//! let mut card = VCard::new();
//! card.add_property(VCardProperty::text(PropertyKey::Fn, "Jane Doe"));
//!
//! let output = serialize(&[card], &SerializeOptions::new(VCardVersion::V3_0));
//! assert!(output.contains("VERSION:3.0\r\n"));
//! assert!(output.contains("FN:Jane Doe\r\n"));
//! ```

mod escape;
mod fold;
mod options;
mod params;
mod serializer;
mod values;

pub use escape::{escape_param_value, mask};
pub use fold::{fold_line, fold_quoted_printable};
pub use options::SerializeOptions;
pub use serializer::{serialize, serialize_single, write_to};
pub use values::{
    format_address, format_date_and_or_time, format_gender, format_geo, format_name,
    format_organization, format_string_collection, format_text, format_timestamp,
    format_utc_offset,
};
