//! Typed property values.

use super::address::Address;
use super::data::DataValue;
use super::datetime::{DateAndOrTime, Timestamp};
use super::geo::GeoCoordinate;
use super::name::Name;
use super::relation::{ContactId, Relation};
use super::structured::{Access, AppId, Gender, GramGender, Kind, Organization};
use super::timezone::TimeZoneId;

/// A vCard property value.
///
/// Each property key has exactly one value variant; see
/// [`PropertyKey`](super::property::PropertyKey).
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Access classification (CLASS).
    Access(Access),

    /// Delivery address (ADR).
    Address(Address),

    /// Client PID map entry (CLIENTPIDMAP).
    AppId(AppId),

    /// Contact identifier (UID).
    ContactId(ContactId),

    /// Inline or referenced data (PHOTO, LOGO, SOUND, KEY).
    Data(DataValue),

    /// Date and/or time (BDAY, ANNIVERSARY, DEATHDATE).
    DateAndOrTime(DateAndOrTime),

    /// Gender (GENDER).
    Gender(Gender),

    /// Geographic position (GEO).
    Geo(GeoCoordinate),

    /// Grammatical gender (GRAMGENDER).
    Gram(GramGender),

    /// Object kind (KIND).
    Kind(Kind),

    /// Structured name (N).
    Name(Name),

    /// Unknown property, kept with its undecoded value.
    NonStandard(String),

    /// Organization (ORG).
    Organization(Organization),

    /// The fixed `VCARD` profile (PROFILE).
    Profile,

    /// Relation to another contact (RELATED, MEMBER).
    Relation(Relation),

    /// Comma-separated list (NICKNAME, CATEGORIES).
    StringCollection(Vec<String>),

    /// Text, or a URI for URI-valued properties.
    Text(String),

    /// UTC timestamp (REV, CREATED).
    TimeStamp(Timestamp),

    /// Time zone (TZ).
    TimeZone(TimeZoneId),
}

impl PropertyValue {
    /// Returns whether the value carries no information.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Access(_)
            | Self::AppId(_)
            | Self::Geo(_)
            | Self::Gram(_)
            | Self::Kind(_)
            | Self::Profile
            | Self::TimeStamp(_)
            | Self::TimeZone(TimeZoneId::Offset(_)) => false,
            Self::Address(a) => a.is_empty(),
            Self::ContactId(id) => id.is_empty(),
            Self::Data(d) => d.is_empty(),
            Self::DateAndOrTime(d) => d.is_empty(),
            Self::Gender(g) => g.is_empty(),
            Self::Name(n) => n.is_empty(),
            Self::NonStandard(s) | Self::Text(s) | Self::TimeZone(TimeZoneId::Name(s)) => {
                s.trim().is_empty()
            }
            Self::Organization(o) => o.is_empty(),
            Self::Relation(r) => r.is_empty(),
            Self::StringCollection(items) => items.iter().all(|s| s.trim().is_empty()),
        }
    }

    /// Returns the value as text if applicable.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::NonStandard(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as a structured name if applicable.
    #[must_use]
    pub fn as_name(&self) -> Option<&Name> {
        match self {
            Self::Name(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the value as an address if applicable.
    #[must_use]
    pub fn as_address(&self) -> Option<&Address> {
        match self {
            Self::Address(a) => Some(a),
            _ => None,
        }
    }

    /// Returns the value as an organization if applicable.
    #[must_use]
    pub fn as_organization(&self) -> Option<&Organization> {
        match self {
            Self::Organization(o) => Some(o),
            _ => None,
        }
    }

    /// Returns the value as a date/time if applicable.
    #[must_use]
    pub fn as_date_and_or_time(&self) -> Option<&DateAndOrTime> {
        match self {
            Self::DateAndOrTime(d) => Some(d),
            _ => None,
        }
    }

    /// Returns the value as a relation if applicable.
    #[must_use]
    pub fn as_relation(&self) -> Option<&Relation> {
        match self {
            Self::Relation(r) => Some(r),
            _ => None,
        }
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<Name> for PropertyValue {
    fn from(n: Name) -> Self {
        Self::Name(n)
    }
}

impl From<Address> for PropertyValue {
    fn from(a: Address) -> Self {
        Self::Address(a)
    }
}

impl From<Organization> for PropertyValue {
    fn from(o: Organization) -> Self {
        Self::Organization(o)
    }
}

impl From<Gender> for PropertyValue {
    fn from(g: Gender) -> Self {
        Self::Gender(g)
    }
}

impl From<DateAndOrTime> for PropertyValue {
    fn from(d: DateAndOrTime) -> Self {
        Self::DateAndOrTime(d)
    }
}

impl From<GeoCoordinate> for PropertyValue {
    fn from(g: GeoCoordinate) -> Self {
        Self::Geo(g)
    }
}

impl From<Relation> for PropertyValue {
    fn from(r: Relation) -> Self {
        Self::Relation(r)
    }
}

impl From<DataValue> for PropertyValue {
    fn from(d: DataValue) -> Self {
        Self::Data(d)
    }
}

impl From<ContactId> for PropertyValue {
    fn from(id: ContactId) -> Self {
        Self::ContactId(id)
    }
}

impl From<Kind> for PropertyValue {
    fn from(k: Kind) -> Self {
        Self::Kind(k)
    }
}

impl From<Timestamp> for PropertyValue {
    fn from(t: Timestamp) -> Self {
        Self::TimeStamp(t)
    }
}

impl From<TimeZoneId> for PropertyValue {
    fn from(tz: TimeZoneId) -> Self {
        Self::TimeZone(tz)
    }
}
