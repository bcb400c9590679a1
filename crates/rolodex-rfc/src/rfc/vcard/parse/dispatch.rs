//! Property construction: content line → typed [`VCardProperty`].
//!
//! Standard keys map to their value codec. Vendor keys written by other
//! address books (Evolution, KAddressBook, Outlook, Apple) are folded into
//! the standard property they stand for; everything else is kept verbatim as
//! a non-standard property.

use super::error::{ParseError, ParseResult};
use super::lexer::ContentLine;
use super::parser::parse_embedded;
use super::unmask::unmask;
use super::values::{
    DataHints, is_absolute_uri, parse_address, parse_app_id, parse_contact_id, parse_data,
    parse_date_and_or_time, parse_gender, parse_geo, parse_name, parse_organization,
    parse_string_collection, parse_text, parse_time_zone, parse_timestamp, parse_vendor_gender,
};
use crate::rfc::vcard::core::{
    Access, ContactId, DataValue, Encoding, GramGender, Kind, ParameterSection, Pid, PropertyKey,
    PropertyValue, Relation, VCardParameter, VCardProperty, VCardVersion,
    media_type_for_keyword, types,
};
use crate::rfc::vcard::{charset, qp};

/// What a vendor key stands for.
#[derive(Debug, Clone, Copy)]
enum VendorKey {
    /// Instant messenger handle: IMPP with this URI scheme and service type.
    Impp {
        scheme: &'static str,
        service: &'static str,
    },
    Anniversary,
    /// RELATED text with this TYPE.
    Related(&'static str),
    Gender,
    Kind,
    Member,
    SocialProfile,
    Url,
    /// vCard 2.1/3.0 AGENT.
    Agent,
}

const fn impp(scheme: &'static str, service: &'static str) -> VendorKey {
    VendorKey::Impp { scheme, service }
}

/// Vendor keys and the standard property they are folded into.
const VENDOR_KEYS: &[(&str, VendorKey)] = &[
    ("X-AIM", impp("aim:", "AIM")),
    ("X-ICQ", impp("icq:", "ICQ")),
    ("X-JABBER", impp("xmpp:", "Jabber")),
    ("X-GOOGLE-TALK", impp("xmpp:", "GoogleTalk")),
    ("X-GTALK", impp("xmpp:", "GoogleTalk")),
    ("X-MSN", impp("msnim:", "MSN")),
    ("X-YAHOO", impp("ymsgr:", "Yahoo")),
    ("X-SKYPE", impp("skype:", "Skype")),
    ("X-SKYPE-USERNAME", impp("skype:", "Skype")),
    ("X-GADUGADU", impp("gg:", "GaduGadu")),
    ("X-QQ", impp("qq:", "QQ")),
    ("X-GROUPWISE", impp("groupwise:", "GroupWise")),
    ("X-MS-IMADDRESS", impp("im:", "MSIM")),
    ("X-KADDRESSBOOK-X-IMADDRESS", impp("im:", "IM")),
    ("X-SIP", impp("sip:", "SIP")),
    ("X-MATRIX", impp("matrix:", "Matrix")),
    ("X-TWITTER", impp("x-twitter:", "Twitter")),
    ("X-ANNIVERSARY", VendorKey::Anniversary),
    ("X-EVOLUTION-ANNIVERSARY", VendorKey::Anniversary),
    ("X-KADDRESSBOOK-X-ANNIVERSARY", VendorKey::Anniversary),
    ("X-MS-ANNIVERSARY", VendorKey::Anniversary),
    ("X-SPOUSE", VendorKey::Related(types::SPOUSE)),
    ("X-EVOLUTION-SPOUSE", VendorKey::Related(types::SPOUSE)),
    ("X-KADDRESSBOOK-X-SPOUSENAME", VendorKey::Related(types::SPOUSE)),
    ("X-MS-SPOUSE", VendorKey::Related(types::SPOUSE)),
    ("X-ASSISTANT", VendorKey::Related(types::ASSISTANT)),
    ("X-EVOLUTION-ASSISTANT", VendorKey::Related(types::ASSISTANT)),
    ("X-KADDRESSBOOK-X-ASSISTANTSNAME", VendorKey::Related(types::ASSISTANT)),
    ("X-MS-ASSISTANT", VendorKey::Related(types::ASSISTANT)),
    ("X-MANAGER", VendorKey::Related(types::MANAGER)),
    ("X-EVOLUTION-MANAGER", VendorKey::Related(types::MANAGER)),
    ("X-KADDRESSBOOK-X-MANAGERSNAME", VendorKey::Related(types::MANAGER)),
    ("X-MS-MANAGER", VendorKey::Related(types::MANAGER)),
    ("X-GENDER", VendorKey::Gender),
    ("X-WAB-GENDER", VendorKey::Gender),
    ("X-ADDRESSBOOKSERVER-KIND", VendorKey::Kind),
    ("X-ADDRESSBOOKSERVER-MEMBER", VendorKey::Member),
    ("X-SOCIALPROFILE", VendorKey::SocialProfile),
    ("X-BLOG", VendorKey::Url),
    ("X-EVOLUTION-BLOG-URL", VendorKey::Url),
    ("X-KADDRESSBOOK-BLOGFEED", VendorKey::Url),
    ("X-MS-HOMEPAGE", VendorKey::Url),
    ("AGENT", VendorKey::Agent),
];

fn vendor_key(name: &str) -> Option<VendorKey> {
    VENDOR_KEYS
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, vendor)| *vendor)
}

/// Builds a typed property from a decoded content line.
///
/// ## Errors
/// Returns an error if the value cannot be decoded for the property's type.
pub fn build_property(
    line: ContentLine,
    version: VCardVersion,
    line_num: usize,
) -> ParseResult<VCardProperty> {
    let ContentLine {
        group,
        name,
        params,
        value: raw,
    } = line;
    let mut params = build_parameters(params);
    let key = PropertyKey::from_name(&name);

    let (key, value) = match key {
        PropertyKey::Photo | PropertyKey::Logo | PropertyKey::Sound | PropertyKey::Key => {
            let value = build_data(&raw, version, &mut params, line_num)?;
            (key, PropertyValue::Data(value))
        }
        PropertyKey::Extension(name) => {
            let text = transfer_decode(&raw, &mut params);
            match vendor_key(&name) {
                Some(vendor) => build_vendor(vendor, &text, version, &mut params, line_num)?,
                None => (PropertyKey::Extension(name), PropertyValue::NonStandard(text)),
            }
        }
        key => {
            let text = transfer_decode(&raw, &mut params);
            let value = build_standard(&key, &text, version, &params, line_num)?;
            (key, value)
        }
    };

    Ok(VCardProperty {
        group,
        key,
        params,
        value,
    })
}

/// Removes the transfer encoding of a text value.
///
/// Transfer encoding and charset are properties of the wire form, so they
/// are cleared from the parameters; the serializer chooses them again.
fn transfer_decode(raw: &str, params: &mut ParameterSection) -> String {
    let text = if params.encoding == Some(Encoding::QuotedPrintable) {
        charset::decode_value(&qp::decode(raw), params.charset.as_deref()).replace("\r\n", "\n")
    } else {
        raw.to_string()
    };
    params.encoding = None;
    params.charset = None;
    text
}

fn invalid(line_num: usize, key: &PropertyKey, text: &str) -> ParseError {
    ParseError::invalid_value(line_num, format!("invalid {key} value: {text}"))
}

fn build_standard(
    key: &PropertyKey,
    text: &str,
    version: VCardVersion,
    params: &ParameterSection,
    line_num: usize,
) -> ParseResult<PropertyValue> {
    let value_type = params.data_type.as_deref();

    let value = match key {
        PropertyKey::Adr => PropertyValue::Address(parse_address(text, version)),
        PropertyKey::Anniversary | PropertyKey::Bday | PropertyKey::DeathDate => {
            PropertyValue::DateAndOrTime(parse_date_and_or_time(text, version, value_type))
        }
        PropertyKey::Categories | PropertyKey::Nickname => {
            PropertyValue::StringCollection(parse_string_collection(text, version))
        }
        PropertyKey::Class => PropertyValue::Access(
            Access::parse(text.trim()).ok_or_else(|| invalid(line_num, key, text))?,
        ),
        PropertyKey::ClientPidMap => PropertyValue::AppId(parse_app_id(text, line_num)?),
        PropertyKey::Created | PropertyKey::Rev => {
            PropertyValue::TimeStamp(parse_timestamp(text, line_num)?)
        }
        PropertyKey::Gender => PropertyValue::Gender(parse_gender(text, version)),
        PropertyKey::GramGender => PropertyValue::Gram(
            GramGender::parse(text.trim()).ok_or_else(|| invalid(line_num, key, text))?,
        ),
        PropertyKey::Geo => PropertyValue::Geo(parse_geo(text, line_num)?),
        PropertyKey::Kind => PropertyValue::Kind(
            Kind::parse(text.trim()).ok_or_else(|| invalid(line_num, key, text))?,
        ),
        PropertyKey::Member | PropertyKey::Related => PropertyValue::Relation(Relation::Id(
            parse_contact_id(text, version, value_type),
        )),
        PropertyKey::Uid => PropertyValue::ContactId(parse_contact_id(text, version, value_type)),
        PropertyKey::N => PropertyValue::Name(parse_name(text, version)),
        PropertyKey::Org => PropertyValue::Organization(parse_organization(text, version)),
        PropertyKey::Profile => PropertyValue::Profile,
        PropertyKey::Tz => PropertyValue::TimeZone(parse_time_zone(text, version)),
        // URIs are written without escapes
        _ if key.is_uri_valued() || params.is_data_type("uri") => {
            PropertyValue::Text(text.to_string())
        }
        _ => PropertyValue::Text(parse_text(text, version)),
    };

    Ok(value)
}

fn build_vendor(
    vendor: VendorKey,
    text: &str,
    version: VCardVersion,
    params: &mut ParameterSection,
    line_num: usize,
) -> ParseResult<(PropertyKey, PropertyValue)> {
    let value_type = params.data_type.clone();

    let built = match vendor {
        VendorKey::Impp { scheme, service } => {
            let handle = unmask(text, version);
            let handle = handle.trim();
            let uri = if is_absolute_uri(handle) {
                handle.to_string()
            } else {
                format!("{scheme}{handle}")
            };
            params
                .service_type
                .get_or_insert_with(|| service.to_string());
            (PropertyKey::Impp, PropertyValue::Text(uri))
        }
        VendorKey::Anniversary => (
            PropertyKey::Anniversary,
            PropertyValue::DateAndOrTime(parse_date_and_or_time(
                text,
                version,
                value_type.as_deref(),
            )),
        ),
        VendorKey::Related(kind) => {
            params.add_type(kind);
            (
                PropertyKey::Related,
                PropertyValue::Relation(Relation::Id(ContactId::Text(unmask(text, version)))),
            )
        }
        VendorKey::Gender => (
            PropertyKey::Gender,
            PropertyValue::Gender(parse_vendor_gender(text, version)),
        ),
        VendorKey::Kind => (
            PropertyKey::Kind,
            PropertyValue::Kind(
                Kind::parse(text.trim())
                    .ok_or_else(|| invalid(line_num, &PropertyKey::Kind, text))?,
            ),
        ),
        VendorKey::Member => (
            PropertyKey::Member,
            PropertyValue::Relation(Relation::Id(parse_contact_id(
                text,
                version,
                value_type.as_deref(),
            ))),
        ),
        VendorKey::SocialProfile => (
            PropertyKey::SocialProfile,
            PropertyValue::Text(unmask(text, version)),
        ),
        VendorKey::Url => (PropertyKey::Url, PropertyValue::Text(unmask(text, version))),
        VendorKey::Agent => {
            params.add_type(types::AGENT);
            params.data_type = None;
            let relation = build_agent(text, version, value_type.as_deref(), line_num)?;
            (PropertyKey::Related, PropertyValue::Relation(relation))
        }
    };

    Ok(built)
}

/// Builds the relation of a 3.0 AGENT line: an escaped embedded card, or a
/// reference.
fn build_agent(
    text: &str,
    version: VCardVersion,
    value_type: Option<&str>,
    line_num: usize,
) -> ParseResult<Relation> {
    let unmasked = unmask(text, version);
    if unmasked
        .trim_start()
        .get(..11)
        .is_some_and(|head| head.eq_ignore_ascii_case("BEGIN:VCARD"))
    {
        return parse_embedded(&unmasked)
            .map(Relation::from)
            .ok_or_else(|| invalid(line_num, &PropertyKey::Related, "embedded AGENT card"));
    }
    Ok(Relation::Id(parse_contact_id(text, version, value_type)))
}

/// Builds PHOTO, LOGO, SOUND and KEY values.
///
/// A TYPE keyword naming a media type (`JPEG`, `image/png`) is moved into the
/// value; the transfer parameters are cleared.
fn build_data(
    raw: &str,
    version: VCardVersion,
    params: &mut ParameterSection,
    line_num: usize,
) -> ParseResult<DataValue> {
    let mut media_type = params.media_type.clone();
    if let Some(pos) = params
        .types
        .iter()
        .position(|t| t.contains('/') || media_type_for_keyword(t).is_some())
    {
        let keyword = params.types.remove(pos);
        let from_keyword =
            media_type_for_keyword(&keyword).map_or_else(|| keyword.clone(), str::to_string);
        media_type.get_or_insert(from_keyword);
    }

    let hints = DataHints {
        encoding: params.encoding,
        charset: params.charset.as_deref(),
        value_type: params.data_type.as_deref(),
        media_type: media_type.clone(),
    };
    let value = parse_data(raw, version, &hints, line_num)?;

    params.encoding = None;
    params.charset = None;
    params.data_type = None;
    params.media_type = match value {
        DataValue::Bytes { .. } => None,
        DataValue::Uri(_) | DataValue::Text(_) => media_type,
    };

    Ok(value)
}

/// Sorts raw parameters into a typed [`ParameterSection`].
///
/// Values that do not parse are kept as non-standard parameters.
#[must_use]
pub fn build_parameters(params: Vec<VCardParameter>) -> ParameterSection {
    let mut section = ParameterSection::default();

    for param in params {
        let name = param.name.to_ascii_uppercase();
        let joined = param.values.join(",");
        let text = Some(joined.clone());

        match name.as_str() {
            "ALTID" => section.alt_id = text,
            "TYPE" => {
                for value in param.values.iter().flat_map(|v| v.split(',')) {
                    let value = value.trim();
                    if value.eq_ignore_ascii_case(types::PREF) {
                        section.pref.get_or_insert(1);
                    } else if !value.is_empty() {
                        section.add_type(value);
                    }
                }
            }
            "ENCODING" => match Encoding::parse(joined.trim()) {
                Some(encoding) => section.encoding = Some(encoding),
                None => section.non_standard.push(param),
            },
            "CHARSET" => section.charset = text,
            "VALUE" => section.data_type = Some(joined.trim().to_ascii_lowercase()),
            "PREF" => {
                let applied = joined
                    .trim()
                    .parse::<u8>()
                    .ok()
                    .is_some_and(|pref| section.set_pref(pref).is_ok());
                if !applied {
                    tracing::debug!(value = %joined, "ignoring PREF outside 1-100");
                }
            }
            "LANGUAGE" => section.language = text,
            "GEO" => match parse_geo(&joined, 0) {
                Ok(geo) => section.geo = Some(geo),
                Err(_) => section.non_standard.push(param),
            },
            "TZ" => section.tz = Some(parse_time_zone(&joined, VCardVersion::V4_0)),
            "LABEL" => section.label = text,
            "PID" => section.pids.extend(param.values.iter().filter_map(|v| Pid::parse(v))),
            "SORT-AS" => section.sort_as.extend(param.values.iter().cloned()),
            "MEDIATYPE" => section.media_type = Some(joined.trim().to_ascii_lowercase()),
            "CALSCALE" => section.calscale = text,
            "INDEX" => match joined.trim().parse() {
                Ok(index) => section.index = Some(index),
                Err(_) => section.non_standard.push(param),
            },
            "LEVEL" => section.level = text,
            "CC" => section.country_code = text,
            "AUTHOR" => section.author = text,
            "AUTHOR-NAME" => section.author_name = text,
            "CREATED" => section.created = text,
            "DERIVED" => section.derived = joined.trim().eq_ignore_ascii_case("true"),
            "PHONETIC" => section.phonetic = text,
            "PROP-ID" => section.prop_id = text,
            "SCRIPT" => section.script = text,
            "SERVICE-TYPE" | "X-SERVICE-TYPE" => section.service_type = text,
            "USERNAME" => section.username = text,
            _ => section.non_standard.push(param),
        }
    }

    section
}
