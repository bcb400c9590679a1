//! vCard (VCF 2.1 / 3.0 / 4.0) parsing and serialization.
//!
//! The engine lives in [`rfc::vcard`]; [`error`] holds the crate-level error
//! type returned by the operations that can fail outright (I/O, encoding
//! lookup, out-of-range values).

pub mod error;
pub mod rfc;
