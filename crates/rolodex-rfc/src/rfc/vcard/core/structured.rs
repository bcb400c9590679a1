//! Small structured vCard values: ORG, GENDER, KIND, GRAMGENDER, CLASS and
//! CLIENTPIDMAP.

use std::fmt;

/// Organization (ORG property, RFC 6350 §6.6.4).
///
/// First value is the organizational name, subsequent values are
/// organizational units in order of decreasing specificity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Organization {
    /// Organization name.
    pub name: String,
    /// Organizational units (department, division, etc.).
    pub units: Vec<String>,
}

impl Organization {
    /// Creates an organization with just a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            units: Vec::new(),
        }
    }

    /// Creates an organization with name and units.
    #[must_use]
    pub fn with_units(name: impl Into<String>, units: Vec<String>) -> Self {
        Self {
            name: name.into(),
            units,
        }
    }

    /// Returns whether the organization is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.units.iter().all(String::is_empty)
    }
}

/// Gender (GENDER property, RFC 6350 §6.2.7).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Gender {
    /// Sex component: M, F, O, N, or U.
    pub sex: Option<Sex>,
    /// Gender identity text (free-form).
    pub identity: Option<String>,
}

impl Gender {
    /// Creates a gender with just sex.
    #[must_use]
    pub fn sex(sex: Sex) -> Self {
        Self {
            sex: Some(sex),
            identity: None,
        }
    }

    /// Creates a gender with just identity text.
    #[must_use]
    pub fn identity(text: impl Into<String>) -> Self {
        Self {
            sex: None,
            identity: Some(text.into()),
        }
    }

    /// Creates a gender with both sex and identity.
    #[must_use]
    pub fn full(sex: Sex, identity: impl Into<String>) -> Self {
        Self {
            sex: Some(sex),
            identity: Some(identity.into()),
        }
    }

    /// Returns whether neither component is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sex.is_none() && self.identity.as_deref().is_none_or(str::is_empty)
    }
}

/// Sex component of GENDER property (RFC 6350 §6.2.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Other.
    Other,
    /// None or not applicable.
    None,
    /// Unknown.
    Unknown,
}

impl Sex {
    /// Parses from single character.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'M' | 'm' => Some(Self::Male),
            'F' | 'f' => Some(Self::Female),
            'O' | 'o' => Some(Self::Other),
            'N' | 'n' => Some(Self::None),
            'U' | 'u' => Some(Self::Unknown),
            _ => Option::None,
        }
    }

    /// Parses the sex values used by vendor extensions (`Male`, `Female`,
    /// or the single-letter form). Outlook's `X-WAB-GENDER` uses `1`/`2`.
    #[must_use]
    pub fn from_vendor(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("male") || value == "2" {
            return Some(Self::Male);
        }
        if value.eq_ignore_ascii_case("female") || value == "1" {
            return Some(Self::Female);
        }
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), Option::None) => Self::from_char(c),
            _ => Option::None,
        }
    }

    /// Returns the single-character representation.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Male => 'M',
            Self::Female => 'F',
            Self::Other => 'O',
            Self::None => 'N',
            Self::Unknown => 'U',
        }
    }
}

/// Declares a closed keyword enum with case-insensitive parsing.
macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Parses the keyword, case-insensitively. Unknown keywords yield `None`.
            #[must_use]
            pub fn parse(value: &str) -> Option<Self> {
                let value = value.trim();
                $( if value.eq_ignore_ascii_case($text) { return Some(Self::$variant); } )+
                None
            }

            /// Returns the canonical lower-case keyword.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $text, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

keyword_enum! {
    /// Kind of object the vCard represents (KIND property, RFC 6350 §6.1.4).
    Kind {
        /// A single person.
        Individual => "individual",
        /// A group of persons or entities.
        Group => "group",
        /// An organization.
        Org => "org",
        /// A named geographical place.
        Location => "location",
        /// A software application (RFC 6473).
        Application => "application",
    }
}

keyword_enum! {
    /// Grammatical gender (GRAMGENDER property, RFC 9554 §3.2).
    GramGender {
        /// Animate.
        Animate => "animate",
        /// Common.
        Common => "common",
        /// Feminine.
        Feminine => "feminine",
        /// Inanimate.
        Inanimate => "inanimate",
        /// Masculine.
        Masculine => "masculine",
        /// Neuter.
        Neuter => "neuter",
    }
}

keyword_enum! {
    /// Access classification (CLASS property, RFC 2426 §3.7.1).
    Access {
        /// Public.
        Public => "public",
        /// Private.
        Private => "private",
        /// Confidential.
        Confidential => "confidential",
    }
}

/// Client PID map entry (CLIENTPIDMAP property, RFC 6350 §6.7.7).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppId {
    /// Source ID (integer ≥ 1).
    pub local_id: u32,
    /// URI identifying the source.
    pub uri: String,
}

impl AppId {
    /// Creates a new client PID map entry.
    #[must_use]
    pub fn new(local_id: u32, uri: impl Into<String>) -> Self {
        Self {
            local_id,
            uri: uri.into(),
        }
    }
}
