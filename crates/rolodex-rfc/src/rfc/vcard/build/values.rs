//! vCard value formatters, the inverse of the value parsers.

use std::fmt::Write as _;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{FixedOffset, NaiveDate, NaiveTime};

use super::escape::mask;
use crate::rfc::vcard::core::{
    Address, AddressField, AppId, ContactId, DateAndOrTime, Gender, GeoCoordinate, Name,
    NameField, Organization, Timestamp, VCardVersion,
};

/// Formats a plain text value.
#[must_use]
pub fn format_text(text: &str, version: VCardVersion) -> String {
    mask(text, version)
}

/// Formats a comma separated list.
#[must_use]
pub fn format_string_collection(items: &[String], version: VCardVersion) -> String {
    items
        .iter()
        .filter(|item| !item.trim().is_empty())
        .map(|item| mask(item, version))
        .collect::<Vec<_>>()
        .join(",")
}

/// Joins positional slots.
///
/// Sub-values are joined with the version's separator. Trailing empty slots
/// beyond `base` are omitted.
fn join_slots(slots: &[Vec<String>], base: usize, version: VCardVersion) -> String {
    let separator = version.sub_value_separator().to_string();
    let used = slots
        .iter()
        .rposition(|slot| !slot.is_empty())
        .map_or(0, |last| last + 1)
        .max(base)
        .min(slots.len());

    slots[..used]
        .iter()
        .map(|slot| {
            slot.iter()
                .map(|value| mask(value, version))
                .collect::<Vec<_>>()
                .join(&separator)
        })
        .collect::<Vec<_>>()
        .join(";")
}

/// Formats a structured name (N property).
///
/// The legacy surname and suffix slots carry the RFC 9554 secondary
/// surnames and generations as well. With `rfc9554` (4.0 only) the two
/// extension slots are written after them.
#[must_use]
pub fn format_name(name: &Name, version: VCardVersion, rfc9554: bool) -> String {
    let mut slots = vec![
        name.legacy_surnames(),
        name.given().to_vec(),
        name.additional().to_vec(),
        name.prefixes().to_vec(),
        name.legacy_suffixes(),
    ];
    if rfc9554 && version == VCardVersion::V4_0 {
        slots.push(name.surnames2().to_vec());
        slots.push(name.generations().to_vec());
    }
    join_slots(&slots, NameField::LEGACY_COUNT, version)
}

/// Formats an address (ADR property).
///
/// The legacy street and extended slots carry a composition of the RFC 9554
/// components. With `rfc9554` (4.0 only) those components are written after
/// the seven legacy slots.
#[must_use]
pub fn format_address(address: &Address, version: VCardVersion, rfc9554: bool) -> String {
    let mut slots = vec![
        address.po_box().to_vec(),
        address.legacy_extended(),
        address.legacy_street(),
        address.locality().to_vec(),
        address.region().to_vec(),
        address.postal_code().to_vec(),
        address.country().to_vec(),
    ];
    if rfc9554 && version == VCardVersion::V4_0 {
        slots.extend(
            AddressField::ALL[AddressField::LEGACY_COUNT..]
                .iter()
                .map(|field| address.get(*field).to_vec()),
        );
    }
    join_slots(&slots, AddressField::LEGACY_COUNT, version)
}

/// Formats an organization (ORG property).
#[must_use]
pub fn format_organization(org: &Organization, version: VCardVersion) -> String {
    let mut out = mask(&org.name, version);
    for unit in &org.units {
        out.push(';');
        out.push_str(&mask(unit, version));
    }
    out
}

/// Formats a gender (GENDER property): `sex;identity`.
#[must_use]
pub fn format_gender(gender: &Gender, version: VCardVersion) -> String {
    let mut out = String::new();
    if let Some(sex) = gender.sex {
        out.push(sex.as_char());
    }
    if let Some(identity) = gender.identity.as_deref().filter(|i| !i.trim().is_empty()) {
        out.push(';');
        out.push_str(&mask(identity, version));
    }
    out
}

/// Formats a geographic position: `geo:lat,long` for 4.0, `lat;long`
/// before.
#[must_use]
pub fn format_geo(geo: &GeoCoordinate, version: VCardVersion) -> String {
    match version {
        VCardVersion::V4_0 => format!("geo:{},{}", geo.latitude(), geo.longitude()),
        VCardVersion::V2_1 | VCardVersion::V3_0 => {
            format!("{};{}", geo.latitude(), geo.longitude())
        }
    }
}

/// Formats a UTC offset: `Z`, then `±HHMM` for 4.0 and `±HH:MM` before.
#[must_use]
pub fn format_utc_offset(offset: FixedOffset, version: VCardVersion) -> String {
    let seconds = offset.local_minus_utc();
    if seconds == 0 {
        return "Z".to_string();
    }
    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.unsigned_abs() / 60;
    let (hours, minutes) = (minutes / 60, minutes % 60);
    match version {
        VCardVersion::V4_0 => format!("{sign}{hours:02}{minutes:02}"),
        VCardVersion::V2_1 | VCardVersion::V3_0 => format!("{sign}{hours:02}:{minutes:02}"),
    }
}

/// Formats a DATE-AND-OR-TIME value.
///
/// 4.0 uses the basic format, older versions the extended one. Year-less
/// dates omit the year. Returns `None` for text below 4.0, which cannot be
/// represented there.
#[must_use]
pub fn format_date_and_or_time(value: &DateAndOrTime, version: VCardVersion) -> Option<String> {
    let mut out = String::new();
    match value {
        DateAndOrTime::Date(date) => write_date(*date, value.is_yearless(), version, &mut out),
        DateAndOrTime::DateTime { date_time, offset } => {
            write_date(date_time.date(), value.is_yearless(), version, &mut out);
            out.push('T');
            write_time(date_time.time(), *offset, version, &mut out);
        }
        DateAndOrTime::Time { time, offset } => {
            out.push('T');
            write_time(*time, *offset, version, &mut out);
        }
        DateAndOrTime::Text(text) if version == VCardVersion::V4_0 => {
            out.push_str(&mask(text, version));
        }
        DateAndOrTime::Text(_) => return None,
    }
    Some(out)
}

fn write_date(date: NaiveDate, yearless: bool, version: VCardVersion, out: &mut String) {
    let pattern = match (version, yearless) {
        (VCardVersion::V4_0, true) => "--%m%d",
        (VCardVersion::V4_0, false) => "%Y%m%d",
        (_, true) => "--%m-%d",
        (_, false) => "%Y-%m-%d",
    };
    write!(out, "{}", date.format(pattern)).ok();
}

fn write_time(time: NaiveTime, offset: Option<FixedOffset>, version: VCardVersion, out: &mut String) {
    let pattern = match version {
        VCardVersion::V4_0 => "%H%M%S",
        VCardVersion::V2_1 | VCardVersion::V3_0 => "%H:%M:%S",
    };
    write!(out, "{}", time.format(pattern)).ok();
    if let Some(offset) = offset {
        out.push_str(&format_utc_offset(offset, version));
    }
}

/// Formats a UTC timestamp (REV, CREATED).
#[must_use]
pub fn format_timestamp(timestamp: &Timestamp, version: VCardVersion) -> String {
    let pattern = match version {
        VCardVersion::V4_0 => "%Y%m%dT%H%M%SZ",
        VCardVersion::V2_1 | VCardVersion::V3_0 => "%Y-%m-%dT%H:%M:%SZ",
    };
    timestamp.0.format(pattern).to_string()
}

/// Formats a contact reference. URIs are written verbatim, text is masked.
#[must_use]
pub fn format_contact_id(id: &ContactId, version: VCardVersion) -> String {
    match id {
        ContactId::Uuid(_) | ContactId::Uri(_) => id.to_string(),
        ContactId::Text(text) => mask(text, version),
    }
}

/// Formats a client PID map entry (CLIENTPIDMAP property).
#[must_use]
pub fn format_app_id(app_id: &AppId) -> String {
    format!("{};{}", app_id.local_id, app_id.uri)
}

/// Encodes binary data as Base64.
#[must_use]
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Formats binary data as a `data:` URL (vCard 4.0).
#[must_use]
pub fn format_data_url(data: &[u8], media_type: Option<&str>) -> String {
    format!("data:{};base64,{}", media_type.unwrap_or_default(), encode_base64(data))
}
