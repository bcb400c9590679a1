//! vCard wrapper type.

use super::address::Address;
use super::name::Name;
use super::property::{PropertyKey, VCardProperty};
use super::relation::ContactId;
use super::structured::{Kind, Organization};
use super::value::PropertyValue;
use super::version::VCardVersion;

/// A complete vCard.
#[derive(Debug, Clone, PartialEq)]
pub struct VCard {
    /// vCard version the card was read as (or will be written as by default).
    pub version: VCardVersion,
    /// All properties in order of insertion.
    pub properties: Vec<VCardProperty>,
}

impl VCard {
    /// Creates a new vCard 4.0.
    #[must_use]
    pub fn new() -> Self {
        Self::with_version(VCardVersion::V4_0)
    }

    /// Creates a vCard with the specified version.
    #[must_use]
    pub fn with_version(version: VCardVersion) -> Self {
        Self {
            version,
            properties: Vec::new(),
        }
    }

    /// Adds a property to the vCard.
    pub fn add_property(&mut self, prop: VCardProperty) {
        self.properties.push(prop);
    }

    /// Removes all properties with the given key.
    pub fn remove_properties(&mut self, key: &PropertyKey) {
        self.properties.retain(|p| &p.key != key);
    }

    /// Returns all properties with the given key, in insertion order.
    ///
    /// The properties borrow from the card only, not from `key`.
    pub fn get_properties<'a, 'k>(
        &'a self,
        key: &'k PropertyKey,
    ) -> impl Iterator<Item = &'a VCardProperty> + use<'a, 'k> {
        self.properties.iter().filter(move |p| &p.key == key)
    }

    /// Returns the first property with the given key.
    #[must_use]
    pub fn get_property(&self, key: &PropertyKey) -> Option<&VCardProperty> {
        self.properties.iter().find(|p| &p.key == key)
    }

    /// Returns the preferred property with the given key: the lowest PREF,
    /// properties without PREF last, ties broken by insertion order.
    #[must_use]
    pub fn preferred(&self, key: &PropertyKey) -> Option<&VCardProperty> {
        self.get_properties(key)
            .enumerate()
            .min_by_key(|(index, p)| (p.pref().unwrap_or(u8::MAX), *index))
            .map(|(_, p)| p)
    }

    /// Returns the preferred FN (formatted name) value.
    #[must_use]
    pub fn formatted_name(&self) -> Option<&str> {
        self.preferred(&PropertyKey::Fn)?.as_text()
    }

    /// Returns the N (structured name) value.
    #[must_use]
    pub fn name(&self) -> Option<&Name> {
        self.preferred(&PropertyKey::N)?.value.as_name()
    }

    /// Returns the UID value.
    #[must_use]
    pub fn uid(&self) -> Option<&ContactId> {
        match &self.get_property(&PropertyKey::Uid)?.value {
            PropertyValue::ContactId(id) => Some(id),
            _ => None,
        }
    }

    /// Replaces the UID.
    pub fn set_uid(&mut self, uid: ContactId) {
        self.remove_properties(&PropertyKey::Uid);
        self.add_property(VCardProperty::new(
            PropertyKey::Uid,
            PropertyValue::ContactId(uid),
        ));
    }

    /// Returns the KIND value.
    #[must_use]
    pub fn kind(&self) -> Option<Kind> {
        match self.get_property(&PropertyKey::Kind)?.value {
            PropertyValue::Kind(kind) => Some(kind),
            _ => None,
        }
    }

    /// Returns all EMAIL property values.
    #[must_use]
    pub fn emails(&self) -> Vec<&str> {
        self.get_properties(&PropertyKey::Email)
            .filter_map(VCardProperty::as_text)
            .collect()
    }

    /// Returns all TEL property values.
    #[must_use]
    pub fn telephones(&self) -> Vec<&str> {
        self.get_properties(&PropertyKey::Tel)
            .filter_map(VCardProperty::as_text)
            .collect()
    }

    /// Returns all ADR (address) values.
    #[must_use]
    pub fn addresses(&self) -> Vec<&Address> {
        self.get_properties(&PropertyKey::Adr)
            .filter_map(|p| p.value.as_address())
            .collect()
    }

    /// Returns the ORG (organization) value.
    #[must_use]
    pub fn organization(&self) -> Option<&Organization> {
        self.preferred(&PropertyKey::Org)?.value.as_organization()
    }

    /// Returns whether this vCard is for a group.
    #[must_use]
    pub fn is_group(&self) -> bool {
        self.kind() == Some(Kind::Group)
    }
}

impl Default for VCard {
    fn default() -> Self {
        Self::new()
    }
}
