//! Cross references between the cards of a document.
//!
//! RELATED and MEMBER may point at another card of the same document by
//! UID. [`dereference`] turns such references into embedded cards after
//! parsing; [`reference`] does the reverse before writing vCard 4.0, which
//! has no way to embed a card.

use std::collections::VecDeque;

use crate::rfc::vcard::core::{ContactId, PropertyKey, PropertyValue, Relation, VCard};

/// Replaces RELATED and MEMBER references to sibling cards with copies of
/// those cards.
///
/// Only one level is resolved: the embedded copies keep their own
/// references as identifiers, so cycles end there. References to the card
/// itself or to unknown UIDs are left alone.
#[must_use]
pub fn dereference(mut cards: Vec<VCard>) -> Vec<VCard> {
    if cards.len() < 2 {
        return cards;
    }
    let originals = cards.clone();
    let mut resolved = 0_usize;

    for (index, card) in cards.iter_mut().enumerate() {
        for prop in &mut card.properties {
            if !is_link(&prop.key) {
                continue;
            }
            let PropertyValue::Relation(Relation::Id(id)) = &prop.value else {
                continue;
            };
            let target = originals
                .iter()
                .enumerate()
                .find(|(i, other)| *i != index && other.uid() == Some(id));
            if let Some((_, other)) = target {
                prop.value = PropertyValue::Relation(Relation::from(other.clone()));
                resolved += 1;
            }
        }
    }

    tracing::debug!(resolved, "dereferenced cross references");
    cards
}

/// Replaces embedded cards with references by UID and appends them to the
/// list.
///
/// An embedded card without a UID is given a random one. It is appended
/// unless a card with the same UID is already in the list. Cards embedded
/// in appended cards are handled the same way.
#[must_use]
pub fn reference(cards: Vec<VCard>) -> Vec<VCard> {
    let mut queue: VecDeque<VCard> = cards.into();
    let mut output: Vec<VCard> = Vec::with_capacity(queue.len());

    while let Some(mut card) = queue.pop_front() {
        for prop in &mut card.properties {
            let PropertyValue::Relation(Relation::VCard(embedded)) = &mut prop.value else {
                continue;
            };
            let mut embedded = std::mem::take(embedded.as_mut());
            let uid = match embedded.uid() {
                Some(uid) if !uid.is_empty() => uid.clone(),
                _ => {
                    let uid = ContactId::new_uuid();
                    embedded.set_uid(uid.clone());
                    uid
                }
            };

            let known = output
                .iter()
                .chain(queue.iter())
                .any(|other| other.uid() == Some(&uid));
            if !known {
                tracing::trace!(%uid, "appending embedded card");
                queue.push_back(embedded);
            }
            prop.value = PropertyValue::Relation(Relation::Id(uid));
        }
        output.push(card);
    }

    output
}

fn is_link(key: &PropertyKey) -> bool {
    matches!(key, PropertyKey::Related | PropertyKey::Member)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::vcard::core::VCardProperty;

    fn card(fn_value: &str, uid: &str) -> VCard {
        let mut card = VCard::new();
        card.add_property(VCardProperty::text(PropertyKey::Fn, fn_value));
        card.set_uid(ContactId::Text(uid.into()));
        card
    }

    fn related(card: &mut VCard, id: &str) {
        card.add_property(VCardProperty::new(
            PropertyKey::Related,
            Relation::Id(ContactId::Text(id.into())),
        ));
    }

    fn relation(card: &VCard) -> &Relation {
        card.get_property(&PropertyKey::Related)
            .and_then(|p| p.value.as_relation())
            .unwrap()
    }

    #[test]
    fn dereference_resolves_siblings() {
        let mut a = card("A", "a");
        related(&mut a, "b");
        let b = card("B", "b");

        let cards = dereference(vec![a, b]);
        assert_eq!(cards.len(), 2);
        match relation(&cards[0]) {
            Relation::VCard(embedded) => assert_eq!(embedded.formatted_name(), Some("B")),
            Relation::Id(_) => panic!("reference was not resolved"),
        }
    }

    #[test]
    fn dereference_keeps_back_edges_as_ids() {
        let mut a = card("A", "a");
        related(&mut a, "b");
        let mut b = card("B", "b");
        related(&mut b, "a");

        let cards = dereference(vec![a, b]);
        let Relation::VCard(embedded_b) = relation(&cards[0]) else {
            panic!("reference was not resolved");
        };
        assert_eq!(relation(embedded_b), &Relation::Id(ContactId::Text("a".into())));
    }

    #[test]
    fn dereference_ignores_self_and_unknown() {
        let mut a = card("A", "a");
        related(&mut a, "a");
        let mut b = card("B", "b");
        related(&mut b, "zzz");

        let cards = dereference(vec![a, b]);
        assert!(matches!(relation(&cards[0]), Relation::Id(_)));
        assert!(matches!(relation(&cards[1]), Relation::Id(_)));
    }

    #[test]
    fn reference_appends_embedded_cards() {
        let mut a = card("A", "a");
        let mut b = VCard::new();
        b.add_property(VCardProperty::text(PropertyKey::Fn, "B"));
        a.add_property(VCardProperty::new(PropertyKey::Related, Relation::from(b)));

        let cards = reference(vec![a]);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[1].formatted_name(), Some("B"));
        let uid = cards[1].uid().unwrap();
        assert_eq!(relation(&cards[0]).contact_id(), Some(uid));
    }

    #[test]
    fn reference_does_not_duplicate_known_cards() {
        let mut a = card("A", "a");
        related(&mut a, "b");
        let b = card("B", "b");

        let cards = reference(dereference(vec![a, b]));
        assert_eq!(cards.len(), 2);
        assert_eq!(relation(&cards[0]), &Relation::Id(ContactId::Text("b".into())));
    }
}
