//! vCard serialization.

use std::io;

use super::escape::mask;
use super::fold::{fold_line, fold_quoted_printable};
use super::options::SerializeOptions;
use super::params::{ParamList, collect_parameters};
use super::values::{
    encode_base64, format_address, format_app_id, format_contact_id, format_data_url,
    format_date_and_or_time, format_gender, format_geo, format_name, format_organization,
    format_string_collection, format_text, format_timestamp, format_utc_offset,
};
use crate::error::RfcResult;
use crate::rfc::vcard::core::{
    Address, ContactId, DataValue, DateAndOrTime, Gender, Name, PropertyKey, PropertyValue,
    Relation, Sex, TimeZoneId, VCard, VCardProperty, VCardVersion, keyword_for_media_type,
    media_type_for_keyword, types,
};
use crate::rfc::vcard::parse::is_absolute_uri;
use crate::rfc::vcard::{link, qp};

/// Serializes one or more vCards to a string.
///
/// ## Summary
/// Every card is written in `options.version`, whatever version it was read
/// as. For vCard 4.0, embedded cards are first split out into documents of
/// their own and referenced by UID.
#[must_use]
#[tracing::instrument(skip(cards, options), fields(count = cards.len(), version = %options.version))]
pub fn serialize(cards: &[VCard], options: &SerializeOptions) -> String {
    let mut output = String::new();

    if options.version == VCardVersion::V4_0 {
        for card in &link::reference(cards.to_vec()) {
            CardWriter::new(options, &mut output).card(card);
        }
    } else {
        for card in cards {
            CardWriter::new(options, &mut output).card(card);
        }
    }

    tracing::debug!(output_len = output.len(), "serialized vCards");
    output
}

/// Serializes a single vCard to a string.
///
/// Embedded cards are not split out; at 4.0 they are referenced by their
/// UID if they have one.
#[must_use]
pub fn serialize_single(card: &VCard, options: &SerializeOptions) -> String {
    let mut output = String::new();
    CardWriter::new(options, &mut output).card(card);
    output
}

/// Serializes cards to a writer.
///
/// ## Errors
/// Returns [`RfcError::Io`](crate::error::RfcError::Io) if writing fails.
pub fn write_to<W: io::Write>(
    writer: &mut W,
    cards: &[VCard],
    options: &SerializeOptions,
) -> RfcResult<()> {
    writer.write_all(serialize(cards, options).as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Writes the lines of one card.
struct CardWriter<'a> {
    options: &'a SerializeOptions,
    version: VCardVersion,
    output: &'a mut String,
}

impl<'a> CardWriter<'a> {
    fn new(options: &'a SerializeOptions, output: &'a mut String) -> Self {
        Self {
            options,
            version: options.version,
            output,
        }
    }

    fn card(&mut self, card: &VCard) {
        self.output.push_str("BEGIN:VCARD\r\n");
        self.output.push_str("VERSION:");
        self.output.push_str(self.version.as_str());
        self.output.push_str("\r\n");

        if let Some(product_id) = &self.options.product_id {
            let params = ParamList::new(self.version);
            self.emit(None, "PRODID", params, &format_text(product_id, self.version));
        }
        self.placeholders(card);

        for prop in canonical_property_order(&card.properties) {
            if self.options.product_id.is_some() && prop.key == PropertyKey::ProdId {
                continue;
            }
            let preferred = prop.pref().is_some()
                && card
                    .preferred(&prop.key)
                    .is_some_and(|best| std::ptr::eq(best, prop));
            self.property(prop, preferred);
        }

        self.output.push_str("END:VCARD\r\n");
    }

    /// Writes FN and N when the target version requires them and the card
    /// has none.
    fn placeholders(&mut self, card: &VCard) {
        let has = |key: &PropertyKey| card.get_properties(key).any(|p| !p.is_empty());

        if self.version >= VCardVersion::V3_0 && !has(&PropertyKey::Fn) {
            let text = fallback_formatted_name(card);
            tracing::debug!(fallback = %text, "writing FN placeholder");
            let params = ParamList::new(self.version);
            self.emit(None, "FN", params, &format_text(&text, self.version));
        }
        if self.version <= VCardVersion::V3_0 && !has(&PropertyKey::N) {
            let params = ParamList::new(self.version);
            let value = format_name(&Name::default(), self.version, false);
            self.emit(None, "N", params, &value);
        }
    }

    fn property(&mut self, prop: &VCardProperty, preferred: bool) {
        if prop.is_empty()
            && prop.params.label.is_none()
            && !self.options.write_empty_properties
        {
            tracing::trace!(key = %prop.key, "skipping empty property");
            return;
        }

        let params = collect_parameters(&prop.params, &prop.key, self.version, preferred);

        match &prop.key {
            PropertyKey::Extension(name) => {
                if self.options.write_non_standard {
                    self.extension(prop, name, params);
                }
            }
            PropertyKey::Related if self.version < VCardVersion::V4_0 => {
                self.legacy_relation(prop, params);
            }
            PropertyKey::Label if self.version == VCardVersion::V4_0 => {
                self.label_as_address(prop);
            }
            key if !key.supports(self.version) => self.vendor_fallback(prop, params),
            key => {
                self.standard(prop, key.name(), params);
                if key == &PropertyKey::Adr && self.version < VCardVersion::V4_0 {
                    self.label_for_address(prop);
                }
            }
        }
    }

    fn standard(&mut self, prop: &VCardProperty, name: &str, mut params: ParamList) {
        match self.value(prop, &mut params) {
            Some(value) => self.emit(prop.group.as_deref(), name, params, &value),
            None => tracing::debug!(
                key = %prop.key,
                version = %self.version,
                "value not representable, property skipped"
            ),
        }
    }

    /// Formats the value of a standard property, adding the parameters it
    /// implies. `None` means the value cannot be written in this version.
    fn value(&self, prop: &VCardProperty, params: &mut ParamList) -> Option<String> {
        let version = self.version;
        let rfc9554 = self.options.write_rfc9554_extensions;

        let value = match &prop.value {
            PropertyValue::Text(text) => {
                if let Some(data_type) = &prop.params.data_type {
                    params.set_value_type(data_type);
                }
                if prop.key.is_uri_valued() || prop.params.is_data_type("uri") {
                    raw_text(text, version)
                } else {
                    format_text(text, version)
                }
            }
            PropertyValue::NonStandard(text) => raw_text(text, version),
            PropertyValue::StringCollection(items) => format_string_collection(items, version),
            PropertyValue::Name(name) => format_name(name, version, rfc9554),
            PropertyValue::Address(address) => format_address(address, version, rfc9554),
            PropertyValue::Organization(org) => format_organization(org, version),
            PropertyValue::Gender(gender) => format_gender(gender, version),
            PropertyValue::Geo(geo) => format_geo(geo, version),
            PropertyValue::Access(access) => access.as_str().to_string(),
            PropertyValue::Kind(kind) => kind.as_str().to_string(),
            PropertyValue::Gram(gram) => gram.as_str().to_string(),
            PropertyValue::AppId(app_id) => format_app_id(app_id),
            PropertyValue::Profile => "VCARD".to_string(),
            PropertyValue::TimeStamp(timestamp) => format_timestamp(timestamp, version),
            PropertyValue::DateAndOrTime(value) => {
                if matches!(value, DateAndOrTime::Text(_)) {
                    params.set_value_type("text");
                }
                format_date_and_or_time(value, version)?
            }
            PropertyValue::TimeZone(tz) => self.time_zone(tz, params)?,
            PropertyValue::ContactId(id) => self.contact_id(id, params),
            PropertyValue::Relation(Relation::Id(id)) => self.contact_id(id, params),
            PropertyValue::Relation(Relation::VCard(card)) => {
                // embedded cards are referenced by their UID
                let uid = card.uid()?;
                self.contact_id(uid, params)
            }
            PropertyValue::Data(data) => self.data(data, prop, params),
        };

        Some(value)
    }

    fn contact_id(&self, id: &ContactId, params: &mut ParamList) -> String {
        if self.version == VCardVersion::V4_0 && matches!(id, ContactId::Text(_)) {
            params.set_value_type("text");
        }
        format_contact_id(id, self.version)
    }

    /// TZ: names are kept at 4.0 and converted to UTC offsets before.
    fn time_zone(&self, tz: &TimeZoneId, params: &mut ParamList) -> Option<String> {
        match (tz, self.version) {
            (TimeZoneId::Name(name), VCardVersion::V4_0) => Some(format_text(name, self.version)),
            (TimeZoneId::Offset(offset), VCardVersion::V4_0) => {
                params.set_value_type("utc-offset");
                Some(format_utc_offset(*offset, self.version))
            }
            (TimeZoneId::Offset(offset), _) => Some(format_utc_offset(*offset, self.version)),
            (TimeZoneId::Name(name), version) => {
                match tz.to_utc_offset(self.options.converter()) {
                    Some(offset) => Some(format_utc_offset(offset, version)),
                    None if version == VCardVersion::V3_0 => {
                        params.set_value_type("text");
                        Some(format_text(name, version))
                    }
                    None => None,
                }
            }
        }
    }

    /// PHOTO, LOGO, SOUND and KEY.
    fn data(&self, data: &DataValue, prop: &VCardProperty, params: &mut ParamList) -> String {
        match data {
            DataValue::Bytes { data, media_type } => match self.version {
                VCardVersion::V4_0 => format_data_url(data, media_type.as_deref()),
                VCardVersion::V2_1 | VCardVersion::V3_0 => {
                    let encoding = if self.version == VCardVersion::V3_0 {
                        "b"
                    } else {
                        "BASE64"
                    };
                    params.push("ENCODING", encoding);
                    if let Some(media_type) = media_type {
                        params.add_type(&media_keyword(media_type));
                    }
                    encode_base64(data)
                }
            },
            DataValue::Uri(uri) => {
                if self.version < VCardVersion::V4_0 {
                    params.set_value_type("uri");
                    if let Some(media_type) = &prop.params.media_type {
                        params.add_type(&media_keyword(media_type));
                    }
                } else if !is_absolute_uri(uri) {
                    params.set_value_type("uri");
                }
                uri.clone()
            }
            DataValue::Text(text) => {
                params.set_value_type("text");
                format_text(text, self.version)
            }
        }
    }

    fn extension(&mut self, prop: &VCardProperty, name: &str, mut params: ParamList) {
        let value = match &prop.value {
            PropertyValue::NonStandard(text) => Some(raw_text(text, self.version)),
            _ => self.value(prop, &mut params),
        };
        if let Some(value) = value {
            self.emit(prop.group.as_deref(), name, params, &value);
        }
    }

    /// RELATED below 4.0: an agent becomes AGENT, spouse, assistant and
    /// manager relations become vendor properties.
    fn legacy_relation(&mut self, prop: &VCardProperty, mut params: ParamList) {
        let PropertyValue::Relation(relation) = &prop.value else {
            return;
        };

        if prop.has_type(types::AGENT) {
            params.remove_type(types::AGENT);
            self.agent(prop, relation, params);
            return;
        }

        let vendor = [
            (types::SPOUSE, "X-SPOUSE"),
            (types::ASSISTANT, "X-ASSISTANT"),
            (types::MANAGER, "X-MANAGER"),
        ]
        .into_iter()
        .find(|(kind, _)| prop.has_type(kind));

        match vendor {
            Some((kind, name)) if self.options.write_x_extensions => {
                params.remove_type(kind);
                let value = match relation {
                    Relation::Id(id) => format_contact_id(id, self.version),
                    Relation::VCard(card) => {
                        let text = card
                            .formatted_name()
                            .map(str::to_string)
                            .or_else(|| card.uid().map(ToString::to_string))
                            .unwrap_or_default();
                        format_text(&text, self.version)
                    }
                };
                self.emit(prop.group.as_deref(), name, params, &value);
            }
            _ => tracing::debug!(version = %self.version, "RELATED not representable, skipped"),
        }
    }

    /// AGENT: 2.1 nests the card after the line, 3.0 embeds it escaped.
    fn agent(&mut self, prop: &VCardProperty, relation: &Relation, mut params: ParamList) {
        let group = prop.group.as_deref();
        match relation {
            Relation::Id(id) => {
                if !matches!(id, ContactId::Text(_)) {
                    params.set_value_type("uri");
                }
                let value = format_contact_id(id, self.version);
                self.emit(group, "AGENT", params, &value);
            }
            Relation::VCard(card) if self.version == VCardVersion::V2_1 => {
                self.emit(group, "AGENT", params, "");
                CardWriter::new(self.options, &mut *self.output).card(card);
            }
            Relation::VCard(card) => {
                let mut nested = String::new();
                CardWriter::new(self.options, &mut nested).card(card);
                let value = mask(&nested, self.version);
                self.emit(group, "AGENT", params, &value);
            }
        }
    }

    /// A stand-alone LABEL at 4.0: an empty ADR carrying the LABEL parameter.
    fn label_as_address(&mut self, prop: &VCardProperty) {
        let Some(label) = prop.as_text() else {
            return;
        };
        let mut params = collect_parameters(&prop.params, &PropertyKey::Adr, self.version, false);
        params.push("LABEL", label);
        let value = format_address(&Address::default(), self.version, false);
        self.emit(prop.group.as_deref(), "ADR", params, &value);
    }

    /// The LABEL parameter of an ADR below 4.0: a LABEL property with the
    /// same group and types.
    fn label_for_address(&mut self, prop: &VCardProperty) {
        let Some(label) = &prop.params.label else {
            return;
        };
        let mut params = ParamList::new(self.version);
        for value in &prop.params.types {
            params.add_type(value);
        }
        let value = format_text(label, self.version);
        self.emit(prop.group.as_deref(), "LABEL", params, &value);
    }

    /// Properties the target version lacks, written under their vendor key.
    fn vendor_fallback(&mut self, prop: &VCardProperty, mut params: ParamList) {
        let vendor_key = match &prop.key {
            PropertyKey::Anniversary => Some("X-ANNIVERSARY"),
            PropertyKey::Gender => Some("X-GENDER"),
            PropertyKey::Kind => Some("X-ADDRESSBOOKSERVER-KIND"),
            PropertyKey::Member => Some("X-ADDRESSBOOKSERVER-MEMBER"),
            _ => None,
        };

        let Some(name) = vendor_key.filter(|_| self.options.write_x_extensions) else {
            tracing::debug!(
                key = %prop.key,
                version = %self.version,
                "property not defined for version, skipped"
            );
            return;
        };

        let value = match &prop.value {
            PropertyValue::Gender(gender) => Some(vendor_gender(gender, self.version)),
            _ => self.value(prop, &mut params),
        };
        if let Some(value) = value {
            self.emit(prop.group.as_deref(), name, params, &value);
        }
    }

    /// Writes one content line, quoted-printable encoded where vCard 2.1
    /// needs it, folded, with CRLF.
    fn emit(&mut self, group: Option<&str>, name: &str, mut params: ParamList, value: &str) {
        let quoted = self.version == VCardVersion::V2_1 && qp::needs_encoding(value);
        if quoted {
            params.push("ENCODING", "QUOTED-PRINTABLE");
            params.push("CHARSET", "UTF-8");
        }

        let mut line = String::new();
        if let Some(group) = group {
            line.push_str(group);
            line.push('.');
        }
        line.push_str(name);
        params.write(&mut line);
        line.push(':');

        if quoted {
            self.output
                .push_str(&fold_quoted_printable(&line, &qp::encode(value)));
        } else {
            line.push_str(value);
            self.output.push_str(&fold_line(&line));
        }
        self.output.push_str("\r\n");
    }
}

/// Orders properties: ungrouped first, then groups in order of first
/// appearance; within those, keys in order of first appearance, then by
/// ascending PREF with unset last. The sort is stable.
fn canonical_property_order(props: &[VCardProperty]) -> Vec<&VCardProperty> {
    let mut groups: Vec<&str> = Vec::new();
    let mut keys: Vec<&PropertyKey> = Vec::new();
    for prop in props {
        if let Some(group) = prop.group.as_deref()
            && !groups.contains(&group)
        {
            groups.push(group);
        }
        if !keys.contains(&&prop.key) {
            keys.push(&prop.key);
        }
    }

    let mut ordered: Vec<&VCardProperty> = props.iter().collect();
    ordered.sort_by_key(|prop| {
        let group_rank = prop
            .group
            .as_deref()
            .and_then(|group| groups.iter().position(|g| *g == group))
            .map_or(0, |i| i + 1);
        let key_rank = keys.iter().position(|k| **k == prop.key).unwrap_or(usize::MAX);
        let pref = prop.pref().map_or(u16::MAX, u16::from);
        (group_rank, key_rank, pref)
    });

    ordered
}

/// Text written without escaping (URIs, unknown properties). Line breaks
/// only survive as quoted-printable in vCard 2.1, so later versions get
/// `\n`.
fn raw_text(text: &str, version: VCardVersion) -> String {
    match version {
        VCardVersion::V2_1 => text.to_string(),
        VCardVersion::V3_0 | VCardVersion::V4_0 => {
            text.replace("\r\n", "\n").replace(['\r', '\n'], "\\n")
        }
    }
}

/// A TYPE keyword for a media type: `JPEG` for `image/jpeg`, else the media
/// type itself.
fn media_keyword(media_type: &str) -> String {
    let keyword = keyword_for_media_type(media_type);
    if media_type_for_keyword(&keyword).is_some() {
        keyword
    } else {
        media_type.to_string()
    }
}

/// The value of an `X-GENDER` property.
fn vendor_gender(gender: &Gender, version: VCardVersion) -> String {
    match (gender.sex, gender.identity.as_deref()) {
        (Some(Sex::Male), _) => "Male".to_string(),
        (Some(Sex::Female), _) => "Female".to_string(),
        (Some(sex), _) => sex.as_char().to_string(),
        (None, Some(identity)) => format_text(identity, version),
        (None, None) => String::new(),
    }
}

/// FN for cards that have none: the name, else the organization, else the
/// first email address.
fn fallback_formatted_name(card: &VCard) -> String {
    card.name()
        .map(Name::display_name)
        .filter(|name| !name.is_empty())
        .or_else(|| {
            card.organization()
                .map(|org| org.name.clone())
                .filter(|name| !name.is_empty())
        })
        .or_else(|| card.emails().first().map(|email| (*email).to_string()))
        .unwrap_or_default()
}
