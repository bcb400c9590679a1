//! Time zone values (TZ property and TZ parameter).

use chrono::{FixedOffset, Offset, Utc};
use chrono_tz::Tz;

/// A time zone, either by name or as a fixed UTC offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeZoneId {
    /// An IANA time zone name such as `Europe/Berlin`, or other free text.
    Name(String),
    /// A UTC offset.
    Offset(FixedOffset),
}

impl TimeZoneId {
    /// Returns the UTC offset, converting a name with `converter` when needed.
    #[must_use]
    pub fn to_utc_offset(&self, converter: Option<&dyn TimeZoneConverter>) -> Option<FixedOffset> {
        match self {
            Self::Offset(offset) => Some(*offset),
            Self::Name(name) => converter.and_then(|c| c.try_convert_to_utc_offset(name)),
        }
    }
}

/// Converts time zone names to UTC offsets.
///
/// Only needed when writing TZ values for vCard versions that require offsets.
pub trait TimeZoneConverter: std::fmt::Debug + Send + Sync {
    /// Returns the current UTC offset of the zone `name`, if it is known.
    fn try_convert_to_utc_offset(&self, name: &str) -> Option<FixedOffset>;
}

/// [`TimeZoneConverter`] backed by the IANA database compiled into `chrono-tz`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoTzConverter;

impl TimeZoneConverter for ChronoTzConverter {
    fn try_convert_to_utc_offset(&self, name: &str) -> Option<FixedOffset> {
        let tz: Tz = name.trim().parse().ok()?;
        Some(Utc::now().with_timezone(&tz).offset().fix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utc_converts_to_zero_offset() {
        let offset = ChronoTzConverter.try_convert_to_utc_offset("UTC").unwrap();
        assert_eq!(offset.local_minus_utc(), 0);
    }

    #[test]
    fn fixed_zone_without_dst() {
        // Asia/Kolkata has no daylight saving time
        let offset = ChronoTzConverter
            .try_convert_to_utc_offset("Asia/Kolkata")
            .unwrap();
        assert_eq!(offset.local_minus_utc(), 5 * 3600 + 30 * 60);
    }

    #[test]
    fn unknown_zone_is_none() {
        assert!(ChronoTzConverter
            .try_convert_to_utc_offset("Mars/Olympus_Mons")
            .is_none());
        let tz = TimeZoneId::Name("Mars/Olympus_Mons".into());
        assert!(tz.to_utc_offset(Some(&ChronoTzConverter)).is_none());
        assert!(tz.to_utc_offset(None).is_none());
    }
}
