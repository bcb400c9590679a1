//! vCard core types.
//!
//! This module provides the object model shared by the parser and the
//! serializer:
//!
//! - [`VCard`] - Complete vCard representation
//! - [`VCardProperty`] - Individual property with parameters and value
//! - [`ParameterSection`] - Typed property parameters
//! - [`PropertyValue`] - Property value variants
//!
//! ## Structured Types
//!
//! - [`Name`] - N property, including RFC 9554 components
//! - [`Address`] - ADR property, including RFC 9554 components
//! - [`Organization`], [`Gender`], [`GeoCoordinate`], [`TimeZoneId`]
//! - [`ContactId`], [`Relation`], [`DataValue`], [`AppId`]
//!
//! ## Example
//!
//! ```rust
//! use rolodex_rfc::rfc::vcard::core::{PropertyKey, VCard, VCardProperty};
//!
//! let mut card = VCard::new();
//! card.add_property(VCardProperty::text(PropertyKey::Fn, "John Doe"));
//! card.add_property(VCardProperty::text(PropertyKey::Email, "john@example.com"));
//! assert_eq!(card.formatted_name(), Some("John Doe"));
//! ```

mod address;
mod data;
mod datetime;
mod geo;
mod name;
mod parameter;
mod property;
mod relation;
mod structured;
mod timezone;
mod value;
mod vcard;
mod version;

pub use address::{Address, AddressBuilder, AddressField};
pub use data::{DataValue, keyword_for_media_type, media_type_for_keyword};
pub use datetime::{DateAndOrTime, Timestamp, YEARLESS_YEAR};
pub use geo::{DEFAULT_MIN_DISTANCE_METERS, GeoCoordinate};
pub use name::{Name, NameBuilder, NameField};
pub use parameter::{Encoding, ParameterSection, Pid, VCardParameter, types};
pub use property::{PropertyKey, VCardProperty};
pub use relation::{ContactId, Relation};
pub use structured::{Access, AppId, Gender, GramGender, Kind, Organization, Sex};
pub use timezone::{ChronoTzConverter, TimeZoneConverter, TimeZoneId};
pub use value::PropertyValue;
pub use vcard::VCard;
pub use version::VCardVersion;
