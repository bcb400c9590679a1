//! Contact identifiers and relations (UID, RELATED, MEMBER, AGENT).

use std::fmt;

use uuid::Uuid;

use super::vcard::VCard;

/// Identifier of a contact: the value of UID, or a reference in RELATED and
/// MEMBER.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContactId {
    /// A UUID, written as `urn:uuid:…` at 4.0.
    Uuid(Uuid),
    /// Any other absolute URI.
    Uri(String),
    /// Free text.
    Text(String),
}

impl ContactId {
    /// Creates a random UUID identifier.
    #[must_use]
    pub fn new_uuid() -> Self {
        Self::Uuid(Uuid::new_v4())
    }

    /// Returns whether the identifier is blank text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Uuid(_) => false,
            Self::Uri(s) | Self::Text(s) => s.trim().is_empty(),
        }
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uuid(uuid) => write!(f, "urn:uuid:{uuid}"),
            Self::Uri(s) | Self::Text(s) => f.write_str(s),
        }
    }
}

/// A relation to another contact.
#[derive(Debug, Clone, PartialEq)]
pub enum Relation {
    /// A reference by identifier.
    Id(ContactId),
    /// An embedded contact (vCard 2.1/3.0 AGENT, or a resolved reference).
    VCard(Box<VCard>),
}

impl Relation {
    /// Returns the referenced identifier: the reference itself, or the UID of
    /// the embedded card.
    #[must_use]
    pub fn contact_id(&self) -> Option<&ContactId> {
        match self {
            Self::Id(id) => Some(id),
            Self::VCard(card) => card.uid(),
        }
    }

    /// Returns whether the relation carries nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Id(id) => id.is_empty(),
            Self::VCard(card) => card.properties.is_empty(),
        }
    }
}

impl From<ContactId> for Relation {
    fn from(id: ContactId) -> Self {
        Self::Id(id)
    }
}

impl From<VCard> for Relation {
    fn from(card: VCard) -> Self {
        Self::VCard(Box::new(card))
    }
}
