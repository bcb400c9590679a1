//! Parameter rendering.
//!
//! Parameters are collected into a [`ParamList`] first, so the serializer can
//! add the ones it derives from the value (VALUE, ENCODING, CHARSET, media
//! type keywords) before the line is written.

use super::escape::escape_param_value;
use super::values::format_utc_offset;
use crate::rfc::vcard::core::{ParameterSection, PropertyKey, TimeZoneId, VCardVersion, types};

/// Ordered parameters of one output line.
#[derive(Debug, Clone)]
pub(crate) struct ParamList {
    version: VCardVersion,
    entries: Vec<(String, Vec<String>)>,
}

impl ParamList {
    pub(crate) fn new(version: VCardVersion) -> Self {
        Self {
            version,
            entries: Vec::new(),
        }
    }

    /// Appends a parameter with one value.
    pub(crate) fn push(&mut self, name: &str, value: impl Into<String>) {
        self.entries.push((name.to_string(), vec![value.into()]));
    }

    /// Appends a parameter with several values; nothing if `values` is empty.
    pub(crate) fn push_values(&mut self, name: &str, values: Vec<String>) {
        if !values.is_empty() {
            self.entries.push((name.to_string(), values));
        }
    }

    /// Adds a TYPE value, upper-case before 4.0.
    pub(crate) fn add_type(&mut self, value: &str) {
        let value = match self.version {
            VCardVersion::V4_0 => value.to_ascii_lowercase(),
            VCardVersion::V2_1 | VCardVersion::V3_0 => value.to_ascii_uppercase(),
        };
        match self.entries.iter_mut().find(|(name, _)| name == "TYPE") {
            Some((_, values)) if values.contains(&value) => {}
            Some((_, values)) => values.push(value),
            None => self.entries.push(("TYPE".to_string(), vec![value])),
        }
    }

    /// Removes a TYPE value (case-insensitive).
    pub(crate) fn remove_type(&mut self, value: &str) {
        for (_, values) in self.entries.iter_mut().filter(|(name, _)| name == "TYPE") {
            values.retain(|v| !v.eq_ignore_ascii_case(value));
        }
        self.entries
            .retain(|(name, values)| name != "TYPE" || !values.is_empty());
    }

    /// Sets VALUE, replacing any earlier one. vCard 2.1 calls `uri` `URL`.
    pub(crate) fn set_value_type(&mut self, value_type: &str) {
        let value_type = match self.version {
            VCardVersion::V2_1 if value_type.eq_ignore_ascii_case("uri") => "URL".to_string(),
            VCardVersion::V2_1 => value_type.to_ascii_uppercase(),
            VCardVersion::V3_0 | VCardVersion::V4_0 => value_type.to_ascii_lowercase(),
        };
        self.entries.retain(|(name, _)| name != "VALUE");
        self.entries.push(("VALUE".to_string(), vec![value_type]));
    }

    /// Writes `;NAME=value,...` for every entry.
    ///
    /// vCard 2.1 TYPE values are written as bare tokens (`;HOME;VOICE`).
    pub(crate) fn write(&self, out: &mut String) {
        for (name, values) in &self.entries {
            if self.version == VCardVersion::V2_1 && name == "TYPE" {
                for value in values {
                    out.push(';');
                    out.push_str(value);
                }
                continue;
            }

            out.push(';');
            out.push_str(name);
            out.push('=');
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                let (escaped, needs_quotes) = escape_param_value(value, self.version);
                if needs_quotes {
                    out.push('"');
                    out.push_str(&escaped);
                    out.push('"');
                } else {
                    out.push_str(&escaped);
                }
            }
        }
    }
}

/// Collects the parameters of a property that exist in `version`.
///
/// Transfer parameters (ENCODING, CHARSET) and VALUE are left to the
/// serializer. Below 4.0 a PREF becomes `TYPE=pref` when `preferred` is
/// set.
pub(crate) fn collect_parameters(
    params: &ParameterSection,
    key: &PropertyKey,
    version: VCardVersion,
    preferred: bool,
) -> ParamList {
    let v4 = version == VCardVersion::V4_0;
    let mut list = ParamList::new(version);

    if v4 && let Some(alt_id) = &params.alt_id {
        list.push("ALTID", alt_id.as_str());
    }
    for value in &params.types {
        list.add_type(value);
    }
    match params.pref {
        Some(pref) if v4 => list.push("PREF", pref.to_string()),
        Some(_) if preferred => list.add_type(types::PREF),
        _ => {}
    }
    if let Some(language) = &params.language {
        list.push("LANGUAGE", language.as_str());
    }

    if v4 {
        push_v4_parameters(&mut list, params, key);
    }

    if let Some(service_type) = &params.service_type {
        let name = if v4 { "SERVICE-TYPE" } else { "X-SERVICE-TYPE" };
        list.push(name, service_type.as_str());
    }
    for param in &params.non_standard {
        list.push_values(&param.name.to_ascii_uppercase(), param.values.clone());
    }

    list
}

fn push_v4_parameters(list: &mut ParamList, params: &ParameterSection, key: &PropertyKey) {
    if let Some(geo) = &params.geo {
        list.push("GEO", format!("geo:{},{}", geo.latitude(), geo.longitude()));
    }
    match &params.tz {
        Some(TimeZoneId::Name(name)) => list.push("TZ", name.as_str()),
        Some(TimeZoneId::Offset(offset)) => {
            list.push("TZ", format_utc_offset(*offset, VCardVersion::V4_0));
        }
        None => {}
    }
    if *key == PropertyKey::Adr
        && let Some(label) = &params.label
    {
        list.push("LABEL", label.as_str());
    }
    list.push_values("PID", params.pids.iter().map(ToString::to_string).collect());
    list.push_values("SORT-AS", params.sort_as.clone());
    if let Some(media_type) = &params.media_type {
        list.push("MEDIATYPE", media_type.as_str());
    }
    if let Some(index) = params.index {
        list.push("INDEX", index.to_string());
    }

    let optional = [
        ("CALSCALE", &params.calscale),
        ("LEVEL", &params.level),
        ("CC", &params.country_code),
        ("AUTHOR", &params.author),
        ("AUTHOR-NAME", &params.author_name),
        ("CREATED", &params.created),
        ("PHONETIC", &params.phonetic),
        ("PROP-ID", &params.prop_id),
        ("SCRIPT", &params.script),
        ("USERNAME", &params.username),
    ];
    for (name, value) in optional {
        if let Some(value) = value {
            list.push(name, value.as_str());
        }
    }
    if params.derived {
        list.push("DERIVED", "true");
    }
}
