//! vCard parsing (vCard 2.1, RFC 2426, RFC 6350).
//!
//! ## Usage
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
//! let cards = parse::parse(input);
//! assert_eq!(cards[0].formatted_name(), Some("John Doe"));
//! ```
//!
//! ## Pipeline
//!
//! 1. [`RowReader`] unfolds physical lines into logical lines.
//! 2. [`parse_content_line`] splits a line into group, name, parameters and
//!    raw value, following the parameter syntax of the card's version.
//! 3. [`build_property`] transfer-decodes the value and hands it to the
//!    codec for its key; vendor `X-` keys are folded into standard ones.
//! 4. The document parser assembles cards, nested AGENT cards and LABEL
//!    attachments, dropping lines that fail to decode.

mod dispatch;
mod error;
mod lexer;
mod parser;
mod reader;
mod unmask;
mod values;

pub use dispatch::{build_parameters, build_property};
pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use lexer::{ContentLine, parse_content_line};
pub use parser::{VcfReader, parse, parse_single};
pub use reader::{RowReader, split_lines};
pub use unmask::{SplitMode, split_list, split_unescaped, unmask};
pub use values::{
    DataHints, is_absolute_uri, parse_address, parse_app_id, parse_contact_id, parse_data,
    parse_date_and_or_time, parse_gender, parse_geo, parse_name, parse_organization,
    parse_string_collection, parse_text, parse_time_zone, parse_timestamp, parse_utc_offset,
    parse_vendor_gender,
};
