//! vCard implementation (vCard 2.1, RFC 2426, RFC 6350, RFC 9554).
//!
//! This module provides types, parsing, and serialization for vCard data.
//!
//! ## Overview
//!
//! vCard is a standard format for contact information. This implementation
//! reads vCard 2.1, 3.0 and 4.0 documents into one version-independent
//! object model and writes that model back in any of the three versions.
//!
//! ## Usage
//!
//! ### Parsing
//!
//! ```rust
//! use rolodex_rfc::rfc::vcard::parse;
//!
//! let input = "\
//! BEGIN:VCARD\r\n\
//! VERSION:4.0\r\n\
//! FN:John Doe\r\n\
//! EMAIL:john@example.com\r\n\
//! END:VCARD\r\n";
//!
//! let cards = parse(input);
//! assert_eq!(cards[0].formatted_name(), Some("John Doe"));
//! ```
//!
//! ### Serializing
//!
//! ```rust
//! use rolodex_rfc::rfc::vcard::{PropertyKey, SerializeOptions, VCard, VCardProperty, serialize};
//!
//! let mut card = VCard::new();
//! card.add_property(VCardProperty::text(PropertyKey::Fn, "Jane Doe"));
//! card.add_property(VCardProperty::text(PropertyKey::Email, "jane@example.com"));
//!
//! let output = serialize(&[card], &SerializeOptions::default());
//! assert!(output.contains("FN:Jane Doe"));
//! ```
//!
//! ## Tolerance
//!
//! Lines that cannot be decoded are dropped with a `debug` log; the rest of
//! the card is kept. Only I/O and encoding lookups fail outright.
//!
//! ## Submodules
//!
//! - [`core`] - Core types (`VCard`, `VCardProperty`, `PropertyValue`, etc.)
//! - [`parse`] - Parsing functions and error types
//! - [`build`] - Serialization functions and options
//! - [`link`] - Cross references between cards of a document
//! - [`io`] - Reading and writing files
//! - [`charset`], [`qp`] - Transfer decoding helpers

pub mod build;
pub mod charset;
pub mod core;
pub mod io;
pub mod link;
pub mod parse;
pub mod qp;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use build::{SerializeOptions, serialize, serialize_single, write_to};
pub use core::{
    Address, ContactId, DataValue, DateAndOrTime, Gender, Name, Organization, PropertyKey,
    PropertyValue, Relation, TimeZoneId, VCard, VCardProperty, VCardVersion,
};
pub use parse::{ParseError, ParseResult, VcfReader, parse, parse_single};
