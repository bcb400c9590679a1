//! vCard parameter types (RFC 6350 §5).

use crate::error::{RfcError, RfcResult};

use super::geo::GeoCoordinate;
use super::timezone::TimeZoneId;

/// A raw vCard parameter as it appears on a content line.
///
/// Parameters can have multiple values (e.g., TYPE=home,work).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VCardParameter {
    /// Parameter name (normalized to uppercase).
    pub name: String,
    /// Parameter values.
    pub values: Vec<String>,
}

impl VCardParameter {
    /// Creates a new parameter with a single value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values: vec![value.into()],
        }
    }

    /// Creates a parameter with multiple values.
    #[must_use]
    pub fn multi(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values,
        }
    }

    /// Returns the first value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    /// Returns whether the parameter has the specified value (case-insensitive).
    #[must_use]
    pub fn has_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v.eq_ignore_ascii_case(value))
    }
}

/// Transfer encoding declared by the ENCODING parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// `BASE64` (2.1) or `b` (3.0).
    Base64,
    /// `QUOTED-PRINTABLE` (2.1, tolerated in 3.0).
    QuotedPrintable,
    /// `8BIT` (2.1).
    EightBit,
    /// `7BIT` (2.1).
    SevenBit,
}

impl Encoding {
    /// Parses an ENCODING value, case-insensitively.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "B" | "BASE64" => Some(Self::Base64),
            "QUOTED-PRINTABLE" | "QP" => Some(Self::QuotedPrintable),
            "8BIT" => Some(Self::EightBit),
            "7BIT" => Some(Self::SevenBit),
            _ => None,
        }
    }
}

/// A PID parameter entry (`local[.client]`, RFC 6350 §5.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pid {
    /// Property-local identifier.
    pub local_id: u32,
    /// Identifier of the CLIENTPIDMAP entry, if any.
    pub client_id: Option<u32>,
}

impl Pid {
    /// Parses one PID value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let (local, client) = match value.trim().split_once('.') {
            Some((local, client)) => (local, Some(client)),
            None => (value.trim(), None),
        };
        let local_id = local.parse().ok()?;
        let client_id = match client {
            Some(c) => Some(c.parse().ok()?),
            None => None,
        };
        Some(Self {
            local_id,
            client_id,
        })
    }
}

impl std::fmt::Display for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.client_id {
            Some(client) => write!(f, "{}.{client}", self.local_id),
            None => write!(f, "{}", self.local_id),
        }
    }
}

/// The parameters attached to one property.
///
/// Known parameters are typed; everything else is preserved verbatim in
/// [`ParameterSection::non_standard`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSection {
    /// ALTID.
    pub alt_id: Option<String>,
    /// TYPE values, lower-cased.
    pub types: Vec<String>,
    /// ENCODING.
    pub encoding: Option<Encoding>,
    /// CHARSET (2.1 / 3.0).
    pub charset: Option<String>,
    /// VALUE data type, lower-cased.
    pub data_type: Option<String>,
    /// PREF (1-100, lower is preferred).
    pub pref: Option<u8>,
    /// LANGUAGE.
    pub language: Option<String>,
    /// GEO (ADR).
    pub geo: Option<GeoCoordinate>,
    /// TZ (ADR).
    pub tz: Option<TimeZoneId>,
    /// LABEL (ADR).
    pub label: Option<String>,
    /// PID.
    pub pids: Vec<Pid>,
    /// SORT-AS.
    pub sort_as: Vec<String>,
    /// MEDIATYPE.
    pub media_type: Option<String>,
    /// CALSCALE.
    pub calscale: Option<String>,
    /// INDEX (RFC 6715).
    pub index: Option<u32>,
    /// LEVEL (RFC 6715).
    pub level: Option<String>,
    /// CC (RFC 8605).
    pub country_code: Option<String>,
    /// AUTHOR (RFC 9554).
    pub author: Option<String>,
    /// AUTHOR-NAME (RFC 9554).
    pub author_name: Option<String>,
    /// CREATED (RFC 9554), kept as its raw timestamp text.
    pub created: Option<String>,
    /// DERIVED (RFC 9554).
    pub derived: bool,
    /// PHONETIC (RFC 9554).
    pub phonetic: Option<String>,
    /// PROP-ID (RFC 9554).
    pub prop_id: Option<String>,
    /// SCRIPT (RFC 9554).
    pub script: Option<String>,
    /// SERVICE-TYPE (RFC 9554).
    pub service_type: Option<String>,
    /// USERNAME (RFC 9554).
    pub username: Option<String>,
    /// Parameters without a typed field, in order of appearance.
    pub non_standard: Vec<VCardParameter>,
}

impl ParameterSection {
    /// Creates an empty parameter section.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets PREF, rejecting values outside 1-100.
    ///
    /// ## Errors
    /// Returns [`RfcError::ValueOutOfRange`] for values outside 1-100.
    pub fn set_pref(&mut self, pref: u8) -> RfcResult<()> {
        if !(1..=100).contains(&pref) {
            return Err(RfcError::ValueOutOfRange(format!("PREF {pref}")));
        }
        self.pref = Some(pref);
        Ok(())
    }

    /// Returns whether TYPE contains `value` (case-insensitive).
    #[must_use]
    pub fn has_type(&self, value: &str) -> bool {
        self.types.iter().any(|t| t.eq_ignore_ascii_case(value))
    }

    /// Adds a TYPE value unless already present.
    pub fn add_type(&mut self, value: impl Into<String>) {
        let value = value.into().to_ascii_lowercase();
        if !self.has_type(&value) {
            self.types.push(value);
        }
    }

    /// Returns whether the VALUE parameter equals `data_type` (case-insensitive).
    #[must_use]
    pub fn is_data_type(&self, data_type: &str) -> bool {
        self.data_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case(data_type))
    }

    /// Returns a non-standard parameter by name.
    #[must_use]
    pub fn get_non_standard(&self, name: &str) -> Option<&VCardParameter> {
        self.non_standard
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

/// Common TYPE values as constants.
pub mod types {
    // Address types
    pub const HOME: &str = "home";
    pub const WORK: &str = "work";

    // Telephone types
    pub const TEXT: &str = "text";
    pub const VOICE: &str = "voice";
    pub const FAX: &str = "fax";
    pub const CELL: &str = "cell";
    pub const VIDEO: &str = "video";
    pub const PAGER: &str = "pager";
    pub const TEXTPHONE: &str = "textphone";

    // Related types
    pub const CONTACT: &str = "contact";
    pub const ACQUAINTANCE: &str = "acquaintance";
    pub const FRIEND: &str = "friend";
    pub const MET: &str = "met";
    pub const CO_WORKER: &str = "co-worker";
    pub const COLLEAGUE: &str = "colleague";
    pub const CO_RESIDENT: &str = "co-resident";
    pub const NEIGHBOR: &str = "neighbor";
    pub const CHILD: &str = "child";
    pub const PARENT: &str = "parent";
    pub const SIBLING: &str = "sibling";
    pub const SPOUSE: &str = "spouse";
    pub const KIN: &str = "kin";
    pub const MUSE: &str = "muse";
    pub const CRUSH: &str = "crush";
    pub const DATE: &str = "date";
    pub const SWEETHEART: &str = "sweetheart";
    pub const ME: &str = "me";
    pub const AGENT: &str = "agent";
    pub const EMERGENCY: &str = "emergency";

    // Vendor relation types
    pub const ASSISTANT: &str = "x-assistant";
    pub const MANAGER: &str = "x-manager";

    // vCard 2.1 / 3.0 preference marker
    pub const PREF: &str = "pref";
}
