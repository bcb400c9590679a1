//! vCard value parsers.
//!
//! Every parser receives the raw value after transfer decoding but before
//! unmasking, so compound values can be split on unescaped delimiters first.

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use chrono::{FixedOffset, NaiveDate, NaiveTime};
use uuid::Uuid;

use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::unmask::{SplitMode, split_list, split_unescaped, unmask};
use crate::rfc::vcard::core::{
    Address, AppId, ContactId, DataValue, DateAndOrTime, Encoding, Gender, GeoCoordinate, Name,
    Organization, Sex, TimeZoneId, Timestamp, VCardVersion, YEARLESS_YEAR,
};
use crate::rfc::vcard::{charset, qp};

/// Base64 engine that accepts input with or without padding.
const BASE64_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Parses a plain text value.
#[must_use]
pub fn parse_text(raw: &str, version: VCardVersion) -> String {
    unmask(raw, version)
}

/// Parses a comma separated list (NICKNAME, CATEGORIES, ...). Empty items
/// are dropped.
#[must_use]
pub fn parse_string_collection(raw: &str, version: VCardVersion) -> Vec<String> {
    split_list(raw, version)
}

/// Splits a positional compound value into `N` slots.
///
/// vCard 2.1 has no list separator, so each slot holds at most one value.
fn split_slots<const N: usize>(raw: &str, version: VCardVersion) -> [Vec<String>; N] {
    let mut slots: [Vec<String>; N] = std::array::from_fn(|_| Vec::new());
    for (slot, span) in slots
        .iter_mut()
        .zip(split_unescaped(raw, ';', SplitMode::Keep))
    {
        *slot = if version == VCardVersion::V2_1 {
            let value = unmask(span, version);
            if value.trim().is_empty() {
                Vec::new()
            } else {
                vec![value]
            }
        } else {
            split_list(span, version)
        };
    }
    slots
}

/// Parses a structured name (N property).
///
/// Up to seven slots: the five of RFC 6350 followed by the RFC 9554
/// secondary surnames and generations.
#[must_use]
pub fn parse_name(raw: &str, version: VCardVersion) -> Name {
    Name::from_slots(split_slots(raw, version))
}

/// Parses an address (ADR property).
///
/// Up to eighteen slots: the seven of RFC 6350 followed by the RFC 9554
/// granular components.
#[must_use]
pub fn parse_address(raw: &str, version: VCardVersion) -> Address {
    Address::from_slots(split_slots(raw, version))
}

/// Parses an organization (ORG property): name followed by units.
#[must_use]
pub fn parse_organization(raw: &str, version: VCardVersion) -> Organization {
    let mut parts = split_unescaped(raw, ';', SplitMode::Keep).into_iter();
    let name = parts
        .next()
        .map(|s| unmask(s, version))
        .unwrap_or_default();
    let units = parts
        .map(|s| unmask(s, version))
        .filter(|s| !s.is_empty())
        .collect();
    Organization { name, units }
}

/// Parses a gender (GENDER property): `sex;identity`.
#[must_use]
pub fn parse_gender(raw: &str, version: VCardVersion) -> Gender {
    let parts = split_unescaped(raw, ';', SplitMode::Keep);

    let sex = parts
        .first()
        .and_then(|s| s.trim().chars().next())
        .and_then(Sex::from_char);

    let identity = parts
        .get(1)
        .map(|s| unmask(s, version))
        .filter(|s| !s.trim().is_empty());

    Gender { sex, identity }
}

/// Parses a vendor gender value (`X-GENDER`, `X-WAB-GENDER`).
#[must_use]
pub fn parse_vendor_gender(raw: &str, version: VCardVersion) -> Gender {
    let text = unmask(raw, version);
    match Sex::from_vendor(text.trim()) {
        Some(sex) => Gender::sex(sex),
        None => Gender::identity(text.trim()),
    }
}

/// Parses a client PID map (CLIENTPIDMAP property): `local-id;uri`.
///
/// ## Errors
/// Returns an error if the local id is not a number or the URI is missing.
pub fn parse_app_id(raw: &str, line: usize) -> ParseResult<AppId> {
    let (id, uri) = raw.split_once(';').ok_or_else(|| {
        ParseError::new(
            ParseErrorKind::InvalidStructuredValue,
            line,
            "CLIENTPIDMAP requires a local id and a URI",
        )
    })?;

    let local_id: u32 = id
        .trim()
        .parse()
        .ok()
        .ok_or_else(|| ParseError::invalid_value(line, format!("invalid CLIENTPIDMAP id: {id}")))?;

    let uri = uri.trim();
    if uri.is_empty() {
        return Err(ParseError::invalid_value(line, "empty CLIENTPIDMAP URI"));
    }

    Ok(AppId::new(local_id, uri))
}

/// Parses a geographic position (GEO property or GEO parameter).
///
/// Accepts `geo:lat,long[;u=...]` URIs as well as the older `lat;long` form.
///
/// ## Errors
/// Returns an error if the coordinates are missing, not numbers, or out of
/// range.
pub fn parse_geo(raw: &str, line: usize) -> ParseResult<GeoCoordinate> {
    let value = raw.replace('\\', "");
    let value = value.trim();

    let (lat, long) = match strip_prefix_ignore_case(value, "geo:") {
        Some(uri) => {
            let coordinates = uri.split(';').next().unwrap_or(uri);
            coordinates.split_once(',')
        }
        None => value.split_once([';', ',']),
    }
    .ok_or_else(|| ParseError::invalid_value(line, format!("invalid GEO value: {value}")))?;

    let parse_number = |s: &str| {
        s.trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| ParseError::invalid_value(line, format!("invalid coordinate: {s}")))
    };

    GeoCoordinate::new(parse_number(lat)?, parse_number(long)?)
        .map_err(|err| ParseError::invalid_value(line, err.to_string()))
}

/// Parses a DATE-AND-OR-TIME value (BDAY, ANNIVERSARY, DEATHDATE).
///
/// `VALUE=text` forces text. Otherwise a date-time, a date or a time is
/// recognised, and anything else is kept as text.
#[must_use]
pub fn parse_date_and_or_time(
    raw: &str,
    version: VCardVersion,
    value_type: Option<&str>,
) -> DateAndOrTime {
    let text = unmask(raw, version);
    if value_type.is_some_and(|t| t.eq_ignore_ascii_case("text")) {
        return DateAndOrTime::Text(text);
    }

    let s = text.trim();
    let time_only =
        value_type.is_some_and(|t| t.eq_ignore_ascii_case("time")) || s.starts_with(['T', 't']);

    let parsed = if time_only {
        parse_time(s.trim_start_matches(['T', 't']))
            .map(|(time, offset)| DateAndOrTime::Time { time, offset })
    } else if let Some((date, time)) = s.split_once(['T', 't']) {
        parse_date(date).zip(parse_time(time)).map(|(date, (time, offset))| {
            DateAndOrTime::DateTime {
                date_time: date.and_time(time),
                offset,
            }
        })
    } else {
        parse_date(s).map(DateAndOrTime::Date)
    };

    parsed.unwrap_or(DateAndOrTime::Text(text))
}

/// Parses a UTC timestamp (REV, CREATED) in basic or extended format.
///
/// A value without offset is taken as UTC; a date without time as midnight.
///
/// ## Errors
/// Returns an error if the value is not a date or date-time.
pub fn parse_timestamp(raw: &str, line: usize) -> ParseResult<Timestamp> {
    let s = raw.trim();
    let invalid = || ParseError::invalid_date_time(line, format!("invalid timestamp: {s}"));

    let (date, clock) = match s.split_once(['T', 't']) {
        Some((date, time)) => (date, Some(time)),
        None => (s, None),
    };

    let date = parse_date(date).ok_or_else(invalid)?;
    let (time, offset) = match clock {
        Some(clock) => parse_time(clock).ok_or_else(invalid)?,
        None => (NaiveTime::MIN, None),
    };

    let local = date.and_time(time);
    let utc = match offset {
        Some(offset) => (local - offset).and_utc(),
        None => local.and_utc(),
    };

    Ok(Timestamp::new(utc))
}

/// Parses a time zone (TZ property or TZ parameter).
///
/// UTC offsets are recognised; anything else is kept as a zone name.
#[must_use]
pub fn parse_time_zone(raw: &str, version: VCardVersion) -> TimeZoneId {
    let text = unmask(raw, version);
    let text = text.trim();
    match parse_utc_offset(text) {
        Some(offset) => TimeZoneId::Offset(offset),
        None => TimeZoneId::Name(text.to_string()),
    }
}

/// Recognises a UTC offset: `Z`, `±HH`, `±HHMM` or `±HH:MM`.
#[must_use]
pub fn parse_utc_offset(value: &str) -> Option<FixedOffset> {
    let s = value.trim();
    if s.eq_ignore_ascii_case("z") {
        return FixedOffset::east_opt(0);
    }
    if !s.is_ascii() {
        return None;
    }

    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };

    let (hours, minutes) = match rest.len() {
        2 => (rest, "00"),
        4 => rest.split_at(2),
        5 if rest.as_bytes()[2] == b':' => (&rest[..2], &rest[3..]),
        _ => return None,
    };

    let hours = digits(hours).filter(|h| *h < 24)?;
    let minutes = digits(minutes).filter(|m| *m < 60)?;
    let seconds = i32::try_from(hours * 3600 + minutes * 60).ok()?;

    FixedOffset::east_opt(sign * seconds)
}

/// Parses a contact reference (UID, MEMBER, RELATED).
///
/// A UUID (bare or `urn:uuid:`) always wins. Then `VALUE=text` forces text,
/// an absolute URI becomes a URI, and anything else is text.
#[must_use]
pub fn parse_contact_id(
    raw: &str,
    version: VCardVersion,
    value_type: Option<&str>,
) -> ContactId {
    let text = unmask(raw, version);
    let trimmed = text.trim();

    let uuid_text = strip_prefix_ignore_case(trimmed, "urn:uuid:").unwrap_or(trimmed);
    if let Ok(uuid) = Uuid::try_parse(uuid_text) {
        return ContactId::Uuid(uuid);
    }

    if value_type.is_some_and(|t| t.eq_ignore_ascii_case("text")) {
        return ContactId::Text(text);
    }

    if is_absolute_uri(trimmed) {
        ContactId::Uri(trimmed.to_string())
    } else {
        ContactId::Text(text)
    }
}

/// Parameters that steer the interpretation of a binary value.
#[derive(Debug, Clone, Default)]
pub struct DataHints<'a> {
    /// Declared transfer encoding.
    pub encoding: Option<Encoding>,
    /// Declared CHARSET, used when the value turns out to be text.
    pub charset: Option<&'a str>,
    /// Declared VALUE type.
    pub value_type: Option<&'a str>,
    /// Media type from MEDIATYPE or a TYPE keyword such as `JPEG`.
    pub media_type: Option<String>,
}

/// Parses a binary-or-reference value (PHOTO, LOGO, SOUND, KEY).
///
/// `raw` is the value as it appeared on the line, before any transfer
/// decoding.
///
/// ## Errors
/// Returns an error if inline Base64 data cannot be decoded.
pub fn parse_data(
    raw: &str,
    version: VCardVersion,
    hints: &DataHints<'_>,
    line: usize,
) -> ParseResult<DataValue> {
    let quoted_printable = hints.encoding == Some(Encoding::QuotedPrintable);
    let trimmed = raw.trim();

    if let Some(url) = strip_prefix_ignore_case(trimmed, "data:") {
        return parse_data_url(url, line);
    }

    if hints.encoding == Some(Encoding::Base64) {
        return Ok(DataValue::Bytes {
            data: decode_base64(trimmed, line)?,
            media_type: hints.media_type.clone(),
        });
    }

    let text = if quoted_printable {
        charset::decode_value(&qp::decode(trimmed), hints.charset)
    } else {
        trimmed.to_string()
    };

    match hints.value_type.map(str::to_ascii_lowercase).as_deref() {
        Some("uri" | "url") => return Ok(DataValue::Uri(text.trim().to_string())),
        Some("text") => return Ok(DataValue::Text(unmask(&text, version))),
        _ => {}
    }

    if quoted_printable && hints.media_type.is_some() {
        return Ok(DataValue::Bytes {
            data: qp::decode(trimmed),
            media_type: hints.media_type.clone(),
        });
    }

    if is_absolute_uri(text.trim()) {
        Ok(DataValue::Uri(text.trim().to_string()))
    } else {
        Ok(DataValue::Text(unmask(&text, version)))
    }
}

/// Parses the part of a `data:` URL after the scheme.
fn parse_data_url(url: &str, line: usize) -> ParseResult<DataValue> {
    let (meta, payload) = url
        .split_once(',')
        .ok_or_else(|| ParseError::invalid_value(line, "data URL without payload"))?;

    let mut meta_parts = meta.split(';');
    let media_type = meta_parts
        .next()
        .map(str::trim)
        .filter(|m| m.contains('/'))
        .map(str::to_ascii_lowercase);
    let base64 = meta_parts.any(|p| p.trim().eq_ignore_ascii_case("base64"));

    let data = if base64 {
        decode_base64(payload, line)?
    } else {
        percent_decode(payload)
    };

    Ok(DataValue::Bytes { data, media_type })
}

fn decode_base64(value: &str, line: usize) -> ParseResult<Vec<u8>> {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    BASE64_LENIENT
        .decode(compact)
        .map_err(|err| ParseError::new(ParseErrorKind::EncodingError, line, err.to_string()))
}

/// Decodes `%XX` escapes; malformed escapes are kept literally.
fn percent_decode(value: &str) -> Vec<u8> {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        let decoded = (bytes[i] == b'%')
            .then(|| bytes.get(i + 1..i + 3))
            .flatten()
            .filter(|hex| hex.iter().all(u8::is_ascii_hexdigit))
            .and_then(|hex| std::str::from_utf8(hex).ok())
            .and_then(|hex| u8::from_str_radix(hex, 16).ok());

        if let Some(b) = decoded {
            out.push(b);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    out
}

/// Returns whether `value` looks like an absolute URI (`scheme:rest`, no
/// whitespace).
#[must_use]
pub fn is_absolute_uri(value: &str) -> bool {
    let Some((scheme, rest)) = value.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        && !rest.is_empty()
        && !value.contains(char::is_whitespace)
}

/// Strips an ASCII prefix, ignoring case.
pub(crate) fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &s[prefix.len()..])
}

/// Parses a date: `YYYYMMDD`, `YYYY-MM-DD`, `YYYY-MM`, `YYYY`, `--MMDD` or
/// `--MM-DD`. Partial dates map to the first day; year-less dates use
/// [`YEARLESS_YEAR`].
fn parse_date(s: &str) -> Option<NaiveDate> {
    if !s.is_ascii() {
        return None;
    }

    if let Some(rest) = s.strip_prefix("--") {
        let (month, day) = match rest.len() {
            4 => rest.split_at(2),
            5 if rest.as_bytes()[2] == b'-' => (&rest[..2], &rest[3..]),
            _ => return None,
        };
        return NaiveDate::from_ymd_opt(YEARLESS_YEAR, digits(month)?, digits(day)?);
    }

    let bytes = s.as_bytes();
    let (year, month, day) = match s.len() {
        4 => (s, "01", "01"),
        7 if bytes[4] == b'-' => (&s[..4], &s[5..], "01"),
        8 => (&s[..4], &s[4..6], &s[6..]),
        10 if bytes[4] == b'-' && bytes[7] == b'-' => (&s[..4], &s[5..7], &s[8..]),
        _ => return None,
    };

    let year = i32::try_from(digits(year)?).ok()?;
    NaiveDate::from_ymd_opt(year, digits(month)?, digits(day)?)
}

/// Parses a time with optional UTC offset: `HH`, `HHMM`, `HHMMSS` or the
/// extended forms with colons. Fractional seconds are ignored.
fn parse_time(s: &str) -> Option<(NaiveTime, Option<FixedOffset>)> {
    if !s.is_ascii() {
        return None;
    }

    let (clock, offset) = if let Some(clock) = s.strip_suffix(['Z', 'z']) {
        (clock, Some(FixedOffset::east_opt(0)?))
    } else if let Some(pos) = s.rfind(['+', '-']).filter(|&pos| pos > 0) {
        (&s[..pos], Some(parse_utc_offset(&s[pos..])?))
    } else {
        (s, None)
    };

    let clock = clock.split(['.', ',']).next().unwrap_or(clock);
    let compact: String = clock.chars().filter(|&c| c != ':').collect();
    let (hour, minute, second) = match compact.len() {
        2 => (compact.as_str(), "00", "00"),
        4 => (&compact[..2], &compact[2..], "00"),
        6 => (&compact[..2], &compact[2..4], &compact[4..]),
        _ => return None,
    };

    let time = NaiveTime::from_hms_opt(digits(hour)?, digits(minute)?, digits(second)?)?;
    Some((time, offset))
}

/// Parses a string of ASCII digits. Signs are not accepted.
fn digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, TimeZone, Utc};

    use super::*;

    const V3: VCardVersion = VCardVersion::V3_0;
    const V4: VCardVersion = VCardVersion::V4_0;

    #[test]
    fn name_with_lists_and_escapes() {
        let name = parse_name(r"Public;John;Quinlan,Q.;Mr.;Esq\,Jr.", V4);
        assert_eq!(name.surnames(), ["Public"]);
        assert_eq!(name.given(), ["John"]);
        assert_eq!(name.additional(), ["Quinlan", "Q."]);
        assert_eq!(name.prefixes(), ["Mr."]);
        assert_eq!(name.suffixes(), ["Esq,Jr."]);
    }

    #[test]
    fn name_with_rfc9554_slots() {
        let name = parse_name("Garcia,Lopez;Maria;;;Jr.;Lopez;Jr.", V4);
        assert_eq!(name.surnames(), ["Garcia"]);
        assert_eq!(name.surnames2(), ["Lopez"]);
        assert_eq!(name.generations(), ["Jr."]);
        assert!(name.suffixes().is_empty());
    }

    #[test]
    fn name_version_2_1_keeps_commas() {
        let name = parse_name("Doe;John,Paul;;;", VCardVersion::V2_1);
        assert_eq!(name.given(), ["John,Paul"]);
    }

    #[test]
    fn address_components() {
        let addr = parse_address(";;123 Main St;Anytown;CA;12345;USA", V4);
        assert_eq!(addr.street(), ["123 Main St"]);
        assert_eq!(addr.locality(), ["Anytown"]);
        assert_eq!(addr.country(), ["USA"]);
        assert!(addr.po_box().is_empty());
    }

    #[test]
    fn address_escaped_semicolon_stays_in_slot() {
        let addr = parse_address(r";;Suite 5\; Floor 2;Town;;;", V3);
        assert_eq!(addr.street(), ["Suite 5; Floor 2"]);
        assert_eq!(addr.locality(), ["Town"]);
    }

    #[test]
    fn organization_with_units() {
        let org = parse_organization(r"ABC\, Inc.;North American Division;Marketing", V4);
        assert_eq!(org.name, "ABC, Inc.");
        assert_eq!(org.units, vec!["North American Division", "Marketing"]);
    }

    #[test]
    fn gender_forms() {
        let gender = parse_gender("M", V4);
        assert_eq!(gender.sex, Some(Sex::Male));
        assert!(gender.identity.is_none());

        let gender = parse_gender(";it's complicated", V4);
        assert!(gender.sex.is_none());
        assert_eq!(gender.identity.as_deref(), Some("it's complicated"));
    }

    #[test]
    fn vendor_gender() {
        assert_eq!(parse_vendor_gender("Male", V3).sex, Some(Sex::Male));
        assert_eq!(parse_vendor_gender("1", V3).sex, Some(Sex::Female));
        assert_eq!(
            parse_vendor_gender("fluid", V3).identity.as_deref(),
            Some("fluid")
        );
    }

    #[test]
    fn app_id() {
        let app = parse_app_id("1;urn:uuid:3df403f4-5924-4bb7-b077-3c711d9eb34b", 1).unwrap();
        assert_eq!(app.local_id, 1);
        assert_eq!(app.uri, "urn:uuid:3df403f4-5924-4bb7-b077-3c711d9eb34b");
        assert!(parse_app_id("x;urn:a", 1).is_err());
        assert!(parse_app_id("1", 1).is_err());
    }

    #[test]
    fn geo_forms() {
        let geo = parse_geo("geo:37.386013,-122.082932", 1).unwrap();
        assert!((geo.latitude() - 37.386_013).abs() < 1e-9);
        assert!((geo.longitude() + 122.082_932).abs() < 1e-9);

        let geo = parse_geo("geo:37.386013,-122.082932;u=10", 1).unwrap();
        assert!((geo.latitude() - 37.386_013).abs() < 1e-9);

        let geo = parse_geo("37.386013;-122.082932", 1).unwrap();
        assert!((geo.longitude() + 122.082_932).abs() < 1e-9);

        assert!(parse_geo("somewhere", 1).is_err());
        assert!(parse_geo("120;10", 1).is_err());
    }

    #[test]
    fn dates() {
        let expected = NaiveDate::from_ymd_opt(1996, 4, 15).unwrap();
        assert_eq!(
            parse_date_and_or_time("19960415", V4, None),
            DateAndOrTime::Date(expected)
        );
        assert_eq!(
            parse_date_and_or_time("1996-04-15", V3, None),
            DateAndOrTime::Date(expected)
        );
    }

    #[test]
    fn partial_dates() {
        let date = parse_date_and_or_time("--0229", V4, None);
        assert!(date.is_yearless());
        assert_eq!(date.date().map(|d| (d.month(), d.day())), Some((2, 29)));

        let date = parse_date_and_or_time("--04-15", V3, None);
        assert!(date.is_yearless());

        assert_eq!(
            parse_date_and_or_time("1996", V4, None),
            DateAndOrTime::Date(NaiveDate::from_ymd_opt(1996, 1, 1).unwrap())
        );
        assert_eq!(
            parse_date_and_or_time("1996-04", V4, None),
            DateAndOrTime::Date(NaiveDate::from_ymd_opt(1996, 4, 1).unwrap())
        );
    }

    #[test]
    fn date_times_and_times() {
        let value = parse_date_and_or_time("19961022T140000Z", V4, None);
        let DateAndOrTime::DateTime { date_time, offset } = value else {
            panic!("expected date-time, got {value:?}");
        };
        assert_eq!(date_time.to_string(), "1996-10-22 14:00:00");
        assert_eq!(offset, FixedOffset::east_opt(0));

        let value = parse_date_and_or_time("1996-10-22T14:00:00-05:00", V3, None);
        let DateAndOrTime::DateTime { offset, .. } = value else {
            panic!("expected date-time, got {value:?}");
        };
        assert_eq!(offset, FixedOffset::west_opt(5 * 3600));

        let value = parse_date_and_or_time("T102200", V4, None);
        assert_eq!(
            value,
            DateAndOrTime::Time {
                time: NaiveTime::from_hms_opt(10, 22, 0).unwrap(),
                offset: None
            }
        );
    }

    #[test]
    fn date_text_fallback() {
        assert_eq!(
            parse_date_and_or_time("circa 1800", V4, None),
            DateAndOrTime::Text("circa 1800".into())
        );
        assert_eq!(
            parse_date_and_or_time("19960415", V4, Some("text")),
            DateAndOrTime::Text("19960415".into())
        );
        assert_eq!(
            parse_date_and_or_time("--04", V4, None),
            DateAndOrTime::Text("--04".into())
        );
    }

    #[test]
    fn timestamps() {
        let expected = Utc.with_ymd_and_hms(1995, 10, 31, 22, 27, 10).unwrap();
        assert_eq!(parse_timestamp("19951031T222710Z", 1).unwrap().0, expected);
        assert_eq!(
            parse_timestamp("1995-10-31T22:27:10Z", 1).unwrap().0,
            expected
        );
        assert_eq!(
            parse_timestamp("1995-10-31T17:27:10-05:00", 1).unwrap().0,
            expected
        );
        assert!(parse_timestamp("yesterday", 1).is_err());
    }

    #[test]
    fn utc_offsets() {
        assert_eq!(parse_utc_offset("Z"), FixedOffset::east_opt(0));
        assert_eq!(parse_utc_offset("+05"), FixedOffset::east_opt(5 * 3600));
        assert_eq!(parse_utc_offset("-0530"), FixedOffset::west_opt(5 * 3600 + 1800));
        assert_eq!(parse_utc_offset("+01:00"), FixedOffset::east_opt(3600));
        assert_eq!(parse_utc_offset("Europe/Berlin"), None);
        assert_eq!(parse_utc_offset("+1"), None);
        assert_eq!(parse_utc_offset("+25:00"), None);
    }

    #[test]
    fn time_zones() {
        assert_eq!(
            parse_time_zone("-05:00", V3),
            TimeZoneId::Offset(FixedOffset::west_opt(5 * 3600).unwrap())
        );
        assert_eq!(
            parse_time_zone("America/New_York", V4),
            TimeZoneId::Name("America/New_York".into())
        );
    }

    #[test]
    fn contact_id_precedence() {
        let id = parse_contact_id("urn:uuid:f81d4fae-7dec-11d0-a765-00a0c91e6bf6", V4, None);
        assert!(matches!(id, ContactId::Uuid(_)));

        let id = parse_contact_id("f81d4fae-7dec-11d0-a765-00a0c91e6bf6", V4, Some("text"));
        assert!(matches!(id, ContactId::Uuid(_)));

        let id = parse_contact_id("http://example.com/jane", V4, None);
        assert_eq!(id, ContactId::Uri("http://example.com/jane".into()));

        let id = parse_contact_id("http://example.com/jane", V4, Some("text"));
        assert_eq!(id, ContactId::Text("http://example.com/jane".into()));

        let id = parse_contact_id("Jane Doe", V4, None);
        assert_eq!(id, ContactId::Text("Jane Doe".into()));
    }

    #[test]
    fn data_url() {
        let value = parse_data(
            "data:image/png;base64,iVBORw0KGgo=",
            V4,
            &DataHints::default(),
            1,
        )
        .unwrap();
        assert_eq!(value.media_type(), Some("image/png"));
        let DataValue::Bytes { data, .. } = value else {
            panic!("expected bytes");
        };
        assert_eq!(data, b"\x89PNG\r\n\x1a\n");

        let value = parse_data("data:,a%20b", V4, &DataHints::default(), 1).unwrap();
        assert_eq!(
            value,
            DataValue::Bytes {
                data: b"a b".to_vec(),
                media_type: None
            }
        );
    }

    #[test]
    fn data_inline_base64_without_padding() {
        let hints = DataHints {
            encoding: Some(Encoding::Base64),
            media_type: Some("image/jpeg".into()),
            ..DataHints::default()
        };
        let value = parse_data("AQID\n BA", V3, &hints, 1).unwrap();
        assert_eq!(
            value,
            DataValue::Bytes {
                data: vec![1, 2, 3, 4],
                media_type: Some("image/jpeg".into())
            }
        );
    }

    #[test]
    fn data_invalid_base64_is_an_error() {
        let hints = DataHints {
            encoding: Some(Encoding::Base64),
            ..DataHints::default()
        };
        let err = parse_data("!!!", V3, &hints, 3).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::EncodingError);
        assert_eq!(err.line, 3);
    }

    #[test]
    fn data_references_and_text() {
        let value = parse_data("http://example.com/photo.jpg", V4, &DataHints::default(), 1)
            .unwrap();
        assert_eq!(value, DataValue::Uri("http://example.com/photo.jpg".into()));

        let hints = DataHints {
            value_type: Some("URL"),
            ..DataHints::default()
        };
        let value = parse_data("photo.jpg", VCardVersion::V2_1, &hints, 1).unwrap();
        assert_eq!(value, DataValue::Uri("photo.jpg".into()));

        let value = parse_data("not a uri", V4, &DataHints::default(), 1).unwrap();
        assert_eq!(value, DataValue::Text("not a uri".into()));
    }

    #[test]
    fn data_quoted_printable_with_media_type_is_binary() {
        let hints = DataHints {
            encoding: Some(Encoding::QuotedPrintable),
            media_type: Some("image/gif".into()),
            ..DataHints::default()
        };
        let value = parse_data("GIF=00=FF", VCardVersion::V2_1, &hints, 1).unwrap();
        assert_eq!(
            value,
            DataValue::Bytes {
                data: b"GIF\x00\xFF".to_vec(),
                media_type: Some("image/gif".into())
            }
        );
    }

    #[test]
    fn absolute_uri_detection() {
        assert!(is_absolute_uri("mailto:jane@example.com"));
        assert!(is_absolute_uri("urn:isbn:0451450523"));
        assert!(!is_absolute_uri("Jane: friend"));
        assert!(!is_absolute_uri("1:2"));
        assert!(!is_absolute_uri("plain"));
    }

    #[test]
    fn string_collection_drops_empties() {
        assert_eq!(
            parse_string_collection(r"friends,,work\,colleagues", V3),
            vec!["friends", "work,colleagues"]
        );
    }
}
