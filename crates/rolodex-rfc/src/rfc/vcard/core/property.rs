//! vCard property types (RFC 6350).

use std::fmt;

use super::parameter::ParameterSection;
use super::value::PropertyValue;
use super::version::VCardVersion;

macro_rules! property_keys {
    ( $( $(#[$meta:meta])* $variant:ident => $name:literal ),+ $(,)? ) => {
        /// The key of a property.
        ///
        /// Known keys are variants; anything else is kept as
        /// [`PropertyKey::Extension`] with its upper-cased name.
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum PropertyKey {
            $( $(#[$meta])* $variant, )+
            /// A key this crate does not model, such as `X-FOO`.
            Extension(String),
        }

        impl PropertyKey {
            /// Looks a key up by name, case-insensitively.
            #[must_use]
            pub fn from_name(name: &str) -> Self {
                $( if name.eq_ignore_ascii_case($name) { return Self::$variant; } )+
                Self::Extension(name.to_ascii_uppercase())
            }

            /// Returns the canonical upper-case name.
            #[must_use]
            pub fn name(&self) -> &str {
                match self {
                    $( Self::$variant => $name, )+
                    Self::Extension(name) => name,
                }
            }
        }
    };
}

property_keys! {
    /// ADR.
    Adr => "ADR",
    /// ANNIVERSARY (4.0).
    Anniversary => "ANNIVERSARY",
    /// BDAY.
    Bday => "BDAY",
    /// BIRTHPLACE (RFC 6474).
    BirthPlace => "BIRTHPLACE",
    /// CALADRURI.
    CalAdrUri => "CALADRURI",
    /// CALURI.
    CalUri => "CALURI",
    /// CATEGORIES.
    Categories => "CATEGORIES",
    /// CLASS (3.0).
    Class => "CLASS",
    /// CLIENTPIDMAP (4.0).
    ClientPidMap => "CLIENTPIDMAP",
    /// CONTACT-URI (RFC 8605).
    ContactUri => "CONTACT-URI",
    /// CREATED (RFC 9554).
    Created => "CREATED",
    /// DEATHDATE (RFC 6474).
    DeathDate => "DEATHDATE",
    /// DEATHPLACE (RFC 6474).
    DeathPlace => "DEATHPLACE",
    /// EMAIL.
    Email => "EMAIL",
    /// EXPERTISE (RFC 6715).
    Expertise => "EXPERTISE",
    /// FBURL.
    FbUrl => "FBURL",
    /// FN.
    Fn => "FN",
    /// GENDER (4.0).
    Gender => "GENDER",
    /// GEO.
    Geo => "GEO",
    /// GRAMGENDER (RFC 9554).
    GramGender => "GRAMGENDER",
    /// HOBBY (RFC 6715).
    Hobby => "HOBBY",
    /// IMPP.
    Impp => "IMPP",
    /// INTEREST (RFC 6715).
    Interest => "INTEREST",
    /// KEY.
    Key => "KEY",
    /// KIND (4.0).
    Kind => "KIND",
    /// LABEL (2.1, 3.0).
    Label => "LABEL",
    /// LANG (4.0).
    Lang => "LANG",
    /// LANGUAGE (RFC 9554).
    Language => "LANGUAGE",
    /// LOGO.
    Logo => "LOGO",
    /// MAILER (2.1, 3.0).
    Mailer => "MAILER",
    /// MEMBER (4.0).
    Member => "MEMBER",
    /// N.
    N => "N",
    /// NAME (3.0).
    Name => "NAME",
    /// NICKNAME.
    Nickname => "NICKNAME",
    /// NOTE.
    Note => "NOTE",
    /// ORG.
    Org => "ORG",
    /// ORG-DIRECTORY (RFC 6715).
    OrgDirectory => "ORG-DIRECTORY",
    /// PHOTO.
    Photo => "PHOTO",
    /// PRODID.
    ProdId => "PRODID",
    /// PROFILE (3.0).
    Profile => "PROFILE",
    /// PRONOUNS (RFC 9554).
    Pronouns => "PRONOUNS",
    /// RELATED (4.0); AGENT below 4.0.
    Related => "RELATED",
    /// REV.
    Rev => "REV",
    /// ROLE.
    Role => "ROLE",
    /// SOCIALPROFILE (RFC 9554).
    SocialProfile => "SOCIALPROFILE",
    /// SORT-STRING (3.0).
    SortString => "SORT-STRING",
    /// SOUND.
    Sound => "SOUND",
    /// SOURCE.
    Source => "SOURCE",
    /// TEL.
    Tel => "TEL",
    /// TITLE.
    Title => "TITLE",
    /// TZ.
    Tz => "TZ",
    /// UID.
    Uid => "UID",
    /// URL.
    Url => "URL",
    /// XML (4.0).
    Xml => "XML",
}

impl PropertyKey {
    /// Returns whether the property is defined for `version`.
    ///
    /// Extension keys are available in every version.
    #[must_use]
    pub fn supports(&self, version: VCardVersion) -> bool {
        match self {
            Self::Anniversary
            | Self::BirthPlace
            | Self::ClientPidMap
            | Self::ContactUri
            | Self::Created
            | Self::DeathDate
            | Self::DeathPlace
            | Self::Expertise
            | Self::Gender
            | Self::GramGender
            | Self::Hobby
            | Self::Interest
            | Self::Kind
            | Self::Lang
            | Self::Language
            | Self::Member
            | Self::OrgDirectory
            | Self::Pronouns
            | Self::SocialProfile
            | Self::Xml => version == VCardVersion::V4_0,
            Self::Label | Self::Mailer => version < VCardVersion::V4_0,
            Self::Class | Self::Name | Self::Profile | Self::SortString => {
                version == VCardVersion::V3_0
            }
            // RELATED is written as AGENT below 4.0
            _ => true,
        }
    }

    /// Returns whether the value is a URI that must not be escaped.
    #[must_use]
    pub fn is_uri_valued(&self) -> bool {
        matches!(
            self,
            Self::CalAdrUri
                | Self::CalUri
                | Self::ContactUri
                | Self::FbUrl
                | Self::Impp
                | Self::OrgDirectory
                | Self::SocialProfile
                | Self::Source
                | Self::Url
        )
    }

    /// Returns whether this is an extension key.
    #[must_use]
    pub fn is_extension(&self) -> bool {
        matches!(self, Self::Extension(_))
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A vCard property.
#[derive(Debug, Clone, PartialEq)]
pub struct VCardProperty {
    /// Optional property group (e.g., "item1" in "item1.TEL").
    pub group: Option<String>,
    /// Property key.
    pub key: PropertyKey,
    /// Parameters.
    pub params: ParameterSection,
    /// Typed value.
    pub value: PropertyValue,
}

impl VCardProperty {
    /// Creates a property without group or parameters.
    #[must_use]
    pub fn new(key: PropertyKey, value: impl Into<PropertyValue>) -> Self {
        Self {
            group: None,
            key,
            params: ParameterSection::default(),
            value: value.into(),
        }
    }

    /// Creates a property with a text value.
    #[must_use]
    pub fn text(key: PropertyKey, value: impl Into<String>) -> Self {
        Self::new(key, PropertyValue::Text(value.into()))
    }

    /// Creates a property with a text value and group.
    #[must_use]
    pub fn grouped_text(
        group: impl Into<String>,
        key: PropertyKey,
        value: impl Into<String>,
    ) -> Self {
        Self {
            group: Some(group.into()),
            ..Self::text(key, value)
        }
    }

    /// Replaces the parameter section.
    #[must_use]
    pub fn with_params(mut self, params: ParameterSection) -> Self {
        self.params = params;
        self
    }

    /// Returns whether the value carries no information.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Returns whether this property has the specified TYPE value.
    #[must_use]
    pub fn has_type(&self, type_value: &str) -> bool {
        self.params.has_type(type_value)
    }

    /// Returns the PREF value if present (1-100, lower is preferred).
    #[must_use]
    pub fn pref(&self) -> Option<u8> {
        self.params.pref
    }

    /// Returns the value as text if it is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        self.value.as_text()
    }
}
