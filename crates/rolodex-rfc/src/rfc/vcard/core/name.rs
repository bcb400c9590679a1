//! Structured name (N property, RFC 6350 §6.2.2, RFC 9554 §2.2).

/// The components of a structured name, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameField {
    /// Family names (surnames).
    Surnames,
    /// Given names (first names).
    Given,
    /// Additional names (middle names).
    Additional,
    /// Honorific prefixes (e.g., "Mr.", "Dr.").
    Prefixes,
    /// Honorific suffixes (e.g., "M.D.").
    Suffixes,
    /// Secondary surnames (RFC 9554).
    Surnames2,
    /// Generation markers such as "Jr." or "III" (RFC 9554).
    Generations,
}

impl NameField {
    /// All fields in wire order.
    pub const ALL: [Self; 7] = [
        Self::Surnames,
        Self::Given,
        Self::Additional,
        Self::Prefixes,
        Self::Suffixes,
        Self::Surnames2,
        Self::Generations,
    ];

    /// Number of components before RFC 9554.
    pub const LEGACY_COUNT: usize = 5;

    /// Position of the field in the N value.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Structured name.
///
/// Each component is a list because vCard allows repeated sub-values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Name {
    slots: [Vec<String>; 7],
}

impl Name {
    /// Starts building a name.
    #[must_use]
    pub fn builder() -> NameBuilder {
        NameBuilder::default()
    }

    /// Creates a structured name with family and given names.
    #[must_use]
    pub fn simple(family: impl Into<String>, given: impl Into<String>) -> Self {
        Self::builder()
            .add(NameField::Surnames, family)
            .add(NameField::Given, given)
            .build()
    }

    /// Creates a name from positional slots as read from a vCard.
    ///
    /// RFC 9554 writers append secondary surnames and generations to the
    /// legacy surname and suffix components. A legacy component that ends
    /// with exactly the values of its extension component has that tail
    /// removed, so the value compares equal to the one that was written.
    #[must_use]
    pub(crate) fn from_slots(mut slots: [Vec<String>; 7]) -> Self {
        strip_appended_copy(
            &mut slots,
            NameField::Surnames.index(),
            NameField::Surnames2.index(),
        );
        strip_appended_copy(
            &mut slots,
            NameField::Suffixes.index(),
            NameField::Generations.index(),
        );
        Self { slots }
    }

    /// Returns the values of one component.
    #[must_use]
    pub fn get(&self, field: NameField) -> &[String] {
        &self.slots[field.index()]
    }

    /// Family names.
    #[must_use]
    pub fn surnames(&self) -> &[String] {
        self.get(NameField::Surnames)
    }

    /// Given names.
    #[must_use]
    pub fn given(&self) -> &[String] {
        self.get(NameField::Given)
    }

    /// Additional names.
    #[must_use]
    pub fn additional(&self) -> &[String] {
        self.get(NameField::Additional)
    }

    /// Honorific prefixes.
    #[must_use]
    pub fn prefixes(&self) -> &[String] {
        self.get(NameField::Prefixes)
    }

    /// Honorific suffixes.
    #[must_use]
    pub fn suffixes(&self) -> &[String] {
        self.get(NameField::Suffixes)
    }

    /// Secondary surnames.
    #[must_use]
    pub fn surnames2(&self) -> &[String] {
        self.get(NameField::Surnames2)
    }

    /// Generation markers.
    #[must_use]
    pub fn generations(&self) -> &[String] {
        self.get(NameField::Generations)
    }

    /// Surnames as written to the legacy family-name component: surnames
    /// followed by secondary surnames.
    #[must_use]
    pub fn legacy_surnames(&self) -> Vec<String> {
        [self.surnames(), self.surnames2()].concat()
    }

    /// Suffixes as written to the legacy suffix component: suffixes followed
    /// by generation markers.
    #[must_use]
    pub fn legacy_suffixes(&self) -> Vec<String> {
        [self.suffixes(), self.generations()].concat()
    }

    /// Returns whether any RFC 9554 component has data.
    #[must_use]
    pub fn has_rfc9554_data(&self) -> bool {
        !self.surnames2().is_empty() || !self.generations().is_empty()
    }

    /// Returns whether the name is empty (all components are empty).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Vec::is_empty)
    }

    /// Formats as a display name (given + family).
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut parts = Vec::new();
        if !self.given().is_empty() {
            parts.push(self.given().join(" "));
        }
        if !self.surnames().is_empty() {
            parts.push(self.surnames().join(" "));
        }
        parts.join(" ")
    }
}

/// Accumulates components for a [`Name`].
#[derive(Debug, Clone, Default)]
pub struct NameBuilder {
    slots: [Vec<String>; 7],
}

impl NameBuilder {
    /// Appends a value to a component. Blank values are ignored.
    #[must_use]
    pub fn add(mut self, field: NameField, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.trim().is_empty() {
            self.slots[field.index()].push(value);
        }
        self
    }

    /// Appends several values to a component.
    #[must_use]
    pub fn add_all<I, S>(self, field: NameField, values: I) -> Self
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
    pub fn build(self) -> Name {
        Name { slots: self.slots }
    }
}

/// Truncates slot `legacy` by the values of slot `extension` when it ends
/// with them, position by position.
fn strip_appended_copy(slots: &mut [Vec<String>], legacy: usize, extension: usize) {
    let copy_len = slots[extension].len();
    if copy_len == 0 || !slots[legacy].ends_with(&slots[extension]) {
        return;
    }
    let keep = slots[legacy].len() - copy_len;
    slots[legacy].truncate(keep);
}
