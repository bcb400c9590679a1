//! Date and time values (RFC 6350 §4.3).

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Year used to store dates that have no year (recurring dates such as
/// birthdays with an unknown year).
///
/// It is a leap year, so February 29 is representable.
pub const YEARLESS_YEAR: i32 = 4;

/// A DATE-AND-OR-TIME value (BDAY, ANNIVERSARY, DEATHDATE).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateAndOrTime {
    /// A calendar date. Year [`YEARLESS_YEAR`] marks a date without year.
    Date(NaiveDate),
    /// A date with a time of day.
    DateTime {
        /// Local date and time.
        date_time: NaiveDateTime,
        /// UTC offset, if the value carried one.
        offset: Option<FixedOffset>,
    },
    /// A time of day without date.
    Time {
        /// Local time.
        time: NaiveTime,
        /// UTC offset, if the value carried one.
        offset: Option<FixedOffset>,
    },
    /// Free text (`VALUE=text`, or anything that is not a date or time).
    Text(String),
}

impl DateAndOrTime {
    /// Creates a date without year.
    #[must_use]
    pub fn yearless(month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(YEARLESS_YEAR, month, day).map(Self::Date)
    }

    /// Returns whether this is a date (or date-time) without year.
    #[must_use]
    pub fn is_yearless(&self) -> bool {
        self.date().is_some_and(|d| d.year() == YEARLESS_YEAR)
    }

    /// Returns the date part, if any.
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            Self::DateTime { date_time, .. } => Some(date_time.date()),
            Self::Time { .. } | Self::Text(_) => None,
        }
    }

    /// Returns whether this value carries no information.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }
}

impl From<NaiveDate> for DateAndOrTime {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

/// A UTC timestamp (REV, CREATED).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    /// Wraps a UTC date-time.
    #[must_use]
    pub const fn new(value: DateTime<Utc>) -> Self {
        Self(value)
    }

    /// The current time, truncated to whole seconds.
    #[must_use]
    pub fn now() -> Self {
        let now = Utc::now();
        Self(
            DateTime::from_timestamp(now.timestamp(), 0).unwrap_or(now),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yearless_leap_day_is_representable() {
        let value = DateAndOrTime::yearless(2, 29).unwrap();
        assert!(value.is_yearless());
        assert_eq!(value.date().map(|d| (d.month(), d.day())), Some((2, 29)));
    }

    #[test]
    fn full_date_is_not_yearless() {
        let value = DateAndOrTime::Date(NaiveDate::from_ymd_opt(1990, 6, 15).unwrap());
        assert!(!value.is_yearless());
    }

    #[test]
    fn blank_text_is_empty() {
        assert!(DateAndOrTime::Text("  ".into()).is_empty());
        assert!(!DateAndOrTime::Text("circa 1800".into()).is_empty());
    }
}
