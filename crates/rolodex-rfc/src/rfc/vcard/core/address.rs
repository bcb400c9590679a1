//! Delivery address (ADR property, RFC 6350 §6.3.1, RFC 9554 §2.1).

/// The components of an address, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressField {
    /// Post office box.
    PoBox,
    /// Extended address (e.g., apartment or suite number).
    Extended,
    /// Street address.
    Street,
    /// Locality (city).
    Locality,
    /// Region (state or province).
    Region,
    /// Postal code.
    PostalCode,
    /// Country name.
    Country,
    /// Room, suite number or identifier (RFC 9554).
    Room,
    /// Apartment number (RFC 9554).
    Apartment,
    /// Floor or level (RFC 9554).
    Floor,
    /// Street number (RFC 9554).
    StreetNumber,
    /// Street name (RFC 9554).
    StreetName,
    /// Building, tower or condominium (RFC 9554).
    Building,
    /// Block name or number (RFC 9554).
    Block,
    /// Subdistrict (RFC 9554).
    SubDistrict,
    /// District (RFC 9554).
    District,
    /// Publicly known landmark (RFC 9554).
    Landmark,
    /// Cardinal direction or quadrant (RFC 9554).
    Direction,
}

impl AddressField {
    /// All fields in wire order.
    pub const ALL: [Self; 18] = [
        Self::PoBox,
        Self::Extended,
        Self::Street,
        Self::Locality,
        Self::Region,
        Self::PostalCode,
        Self::Country,
        Self::Room,
        Self::Apartment,
        Self::Floor,
        Self::StreetNumber,
        Self::StreetName,
        Self::Building,
        Self::Block,
        Self::SubDistrict,
        Self::District,
        Self::Landmark,
        Self::Direction,
    ];

    /// Number of components before RFC 9554.
    pub const LEGACY_COUNT: usize = 7;

    /// Position of the field in the ADR value.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns whether the field was introduced by RFC 9554.
    #[must_use]
    pub const fn is_rfc9554(self) -> bool {
        self.index() >= Self::LEGACY_COUNT
    }
}

/// Structured delivery address.
///
/// The street and extended components hold what was stated explicitly.
/// Writers limited to the seven legacy components get that value, or a
/// composition of the RFC 9554 components when none is stated. A stated value
/// equal to the composition carries no information and is not stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    slots: [Vec<String>; 18],
}

impl Address {
    /// Starts building an address.
    #[must_use]
    pub fn builder() -> AddressBuilder {
        AddressBuilder::default()
    }

    /// Creates an address from positional slots as read from a vCard.
    ///
    /// Legacy street and extended components that merely repeat the
    /// composition of the RFC 9554 components are dropped.
    #[must_use]
    pub(crate) fn from_slots(slots: [Vec<String>; 18]) -> Self {
        let mut address = Self { slots };
        address.drop_composed_copies();
        address
    }

    /// Returns the stored values of one component.
    #[must_use]
    pub fn get(&self, field: AddressField) -> &[String] {
        &self.slots[field.index()]
    }

    /// Post office box.
    #[must_use]
    pub fn po_box(&self) -> &[String] {
        self.get(AddressField::PoBox)
    }

    /// Extended address.
    #[must_use]
    pub fn extended(&self) -> &[String] {
        self.get(AddressField::Extended)
    }

    /// Street address.
    #[must_use]
    pub fn street(&self) -> &[String] {
        self.get(AddressField::Street)
    }

    /// Locality (city).
    #[must_use]
    pub fn locality(&self) -> &[String] {
        self.get(AddressField::Locality)
    }

    /// Region.
    #[must_use]
    pub fn region(&self) -> &[String] {
        self.get(AddressField::Region)
    }

    /// Postal code.
    #[must_use]
    pub fn postal_code(&self) -> &[String] {
        self.get(AddressField::PostalCode)
    }

    /// Country.
    #[must_use]
    pub fn country(&self) -> &[String] {
        self.get(AddressField::Country)
    }

    /// Street name (RFC 9554).
    #[must_use]
    pub fn street_name(&self) -> &[String] {
        self.get(AddressField::StreetName)
    }

    /// Street number (RFC 9554).
    #[must_use]
    pub fn street_number(&self) -> &[String] {
        self.get(AddressField::StreetNumber)
    }

    /// Returns whether any RFC 9554 component has data.
    #[must_use]
    pub fn has_rfc9554_data(&self) -> bool {
        self.slots[AddressField::LEGACY_COUNT..]
            .iter()
            .any(|s| !s.is_empty())
    }

    /// Street component for writers that only know the seven legacy
    /// components: the stored street, or street number, street name and
    /// direction composed into one line.
    #[must_use]
    pub fn legacy_street(&self) -> Vec<String> {
        if self.street().is_empty() {
            self.composed_street()
        } else {
            self.street().to_vec()
        }
    }

    /// Extended component for legacy writers: the stored value, or building,
    /// floor, apartment and room composed into one line.
    #[must_use]
    pub fn legacy_extended(&self) -> Vec<String> {
        if self.extended().is_empty() {
            self.composed_extended()
        } else {
            self.extended().to_vec()
        }
    }

    fn composed_street(&self) -> Vec<String> {
        compose(&[
            self.get(AddressField::StreetNumber),
            self.get(AddressField::StreetName),
            self.get(AddressField::Direction),
        ])
    }

    fn composed_extended(&self) -> Vec<String> {
        compose(&[
            self.get(AddressField::Building),
            self.get(AddressField::Floor),
            self.get(AddressField::Apartment),
            self.get(AddressField::Room),
        ])
    }

    fn drop_composed_copies(&mut self) {
        if !self.has_rfc9554_data() {
            return;
        }
        let street = self.composed_street();
        let extended = self.composed_extended();
        let slots = &mut self.slots;
        if slots[AddressField::Street.index()] == street {
            slots[AddressField::Street.index()].clear();
        }
        if slots[AddressField::Extended.index()] == extended {
            slots[AddressField::Extended.index()].clear();
        }
    }

    /// Returns whether the address is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Vec::is_empty)
    }

    /// Formats as a single-line address.
    #[must_use]
    pub fn one_line(&self) -> String {
        let street = self.legacy_street();
        [
            street.as_slice(),
            self.locality(),
            self.region(),
            self.postal_code(),
            self.country(),
        ]
        .iter()
        .flat_map(|v| v.iter())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
    }
}

fn compose(parts: &[&[String]]) -> Vec<String> {
    let line = parts
        .iter()
        .flat_map(|values| values.iter())
        .map(String::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if line.is_empty() { Vec::new() } else { vec![line] }
}

/// Accumulates components for an [`Address`].
#[derive(Debug, Clone, Default)]
pub struct AddressBuilder {
    slots: [Vec<String>; 18],
}

impl AddressBuilder {
    /// Appends a value to a component. Blank values are ignored.
    #[must_use]
    pub fn add(mut self, field: AddressField, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.trim().is_empty() {
            self.slots[field.index()].push(value);
        }
        self
    }

    /// Appends several values to a component.
    #[must_use]
    pub fn add_all<I, S>(self, field: AddressField, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        values
            .into_iter()
            .fold(self, |builder, value| builder.add(field, value))
    }

    /// Freezes the accumulated components.
    #[must_use]
    pub fn build(self) -> Address {
        Address::from_slots(self.slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_one_line() {
        let addr = Address::builder()
            .add(AddressField::Street, "123 Main St")
            .add(AddressField::Locality, "Anytown")
            .add(AddressField::Region, "CA")
            .add(AddressField::PostalCode, "12345")
            .add(AddressField::Country, "USA")
            .build();
        assert_eq!(addr.one_line(), "123 Main St, Anytown, CA, 12345, USA");
    }

    #[test]
    fn granular_street_hides_legacy_street() {
        let addr = Address::builder()
            .add(AddressField::StreetName, "Main Street")
            .build();
        assert!(addr.street().is_empty());
        assert_eq!(addr.street_name(), ["Main Street"]);
        assert_eq!(addr.legacy_street(), ["Main Street"]);
    }

    #[test]
    fn legacy_street_wins_without_granular_data() {
        let addr = Address::builder()
            .add(AddressField::Street, "1 Infinite Loop")
            .build();
        assert_eq!(addr.street(), ["1 Infinite Loop"]);
        assert!(addr.street_name().is_empty());
        assert!(!addr.has_rfc9554_data());
    }

    #[test]
    fn legacy_views_compose_granular_fields() {
        let addr = Address::builder()
            .add(AddressField::StreetNumber, "123")
            .add(AddressField::StreetName, "Main Street")
            .add(AddressField::Apartment, "Apt 4")
            .build();
        assert_eq!(addr.legacy_street(), ["123 Main Street"]);
        assert_eq!(addr.legacy_extended(), ["Apt 4"]);
        assert!(addr.street().is_empty());
        assert!(addr.extended().is_empty());
    }

    #[test]
    fn stated_street_wins_over_composition() {
        let addr = Address::builder()
            .add(AddressField::Street, "12 Main St")
            .add(AddressField::StreetName, "Main St")
            .build();
        assert_eq!(addr.street(), ["12 Main St"]);
        assert_eq!(addr.legacy_street(), ["12 Main St"]);
        assert_eq!(addr.street_name(), ["Main St"]);
    }

    #[test]
    fn builder_drops_street_equal_to_composition() {
        let addr = Address::builder()
            .add(AddressField::Street, "12 Main St")
            .add(AddressField::StreetNumber, "12")
            .add(AddressField::StreetName, "Main St")
            .build();
        assert!(addr.street().is_empty());
        assert_eq!(addr.legacy_street(), ["12 Main St"]);
    }

    #[test]
    fn from_slots_drops_compatibility_street() {
        let mut slots: [Vec<String>; 18] = std::array::from_fn(|_| Vec::new());
        slots[2] = vec!["123 Main Street".into()];
        slots[10] = vec!["123".into()];
        slots[11] = vec!["Main Street".into()];
        let addr = Address::from_slots(slots);
        assert_eq!(
            addr,
            Address::builder()
                .add(AddressField::StreetNumber, "123")
                .add(AddressField::StreetName, "Main Street")
                .build()
        );
    }

    #[test]
    fn from_slots_keeps_street_that_differs() {
        let mut slots: [Vec<String>; 18] = std::array::from_fn(|_| Vec::new());
        slots[2] = vec!["Main Street 123".into()];
        slots[11] = vec!["Main Street".into()];
        let addr = Address::from_slots(slots);
        assert_eq!(addr.street(), ["Main Street 123"]);
        assert_eq!(addr.street_name(), ["Main Street"]);
    }
}
