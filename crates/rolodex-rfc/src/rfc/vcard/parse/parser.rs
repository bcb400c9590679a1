//! Document parser: logical lines → [`VCard`]s.
//!
//! Parsing is tolerant. A line that cannot be decoded is logged at `debug`
//! and dropped; the rest of the card is kept.

use std::io::{self, BufRead};

use super::dispatch::build_property;
use super::lexer::parse_content_line;
use super::reader::RowReader;
use crate::error::RfcError;
use crate::rfc::vcard::core::{
    ParameterSection, PropertyKey, PropertyValue, Relation, VCard, VCardProperty, VCardVersion,
    types,
};
use crate::rfc::vcard::link;

/// Version assumed for cards without a VERSION line.
const FALLBACK_VERSION: VCardVersion = VCardVersion::V3_0;

const BEGIN_VCARD: &str = "BEGIN:VCARD";
const END_VCARD: &str = "END:VCARD";

/// Parses every vCard in a document.
///
/// Cross references between the cards (RELATED/MEMBER by UID) are resolved
/// to embedded cards.
#[must_use]
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse(input: &str) -> Vec<VCard> {
    // a &str is valid UTF-8, so reading it cannot fail
    let cards: Vec<VCard> = VcfReader::new(input.as_bytes())
        .filter_map(Result::ok)
        .collect();
    tracing::debug!(count = cards.len(), "parsed vCards");
    link::dereference(cards)
}

/// Parses the first vCard in a document.
#[must_use]
pub fn parse_single(input: &str) -> Option<VCard> {
    parse(input).into_iter().next()
}

/// Parses a card embedded in a property value (vCard 3.0 AGENT).
pub(crate) fn parse_embedded(text: &str) -> Option<VCard> {
    VcfReader::new(text.as_bytes()).find_map(Result::ok)
}

/// Lazy iterator over the vCards of a stream.
///
/// Single pass. Cards are yielded as they are read, so cross references are
/// not resolved; use [`link::dereference`] on the collected cards for that.
#[derive(Debug)]
pub struct VcfReader<R> {
    rows: RowReader<R>,
    line_num: usize,
}

impl<R: BufRead> VcfReader<R> {
    /// Wraps a buffered reader.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            rows: RowReader::new(reader),
            line_num: 0,
        }
    }

    /// Returns the next logical line with its number. Lines that are not
    /// valid UTF-8 are skipped.
    fn next_row(&mut self) -> Option<io::Result<(usize, String)>> {
        loop {
            let row = self.rows.next()?;
            self.line_num += 1;
            match row {
                Ok(row) => return Some(Ok((self.line_num, row))),
                Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                    tracing::warn!(line = self.line_num, %err, "skipping line that is not UTF-8");
                }
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

impl<R: BufRead> Iterator for VcfReader<R> {
    type Item = Result<VCard, RfcError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (line_num, row) = match self.next_row()? {
                Ok(row) => row,
                Err(err) => return Some(Err(err.into())),
            };
            match marker(&row) {
                Marker::Begin => break,
                Marker::End => tracing::warn!(line = line_num, "END:VCARD without BEGIN"),
                Marker::Other => tracing::trace!(line = line_num, "ignoring line outside a vCard"),
            }
        }

        let mut lines = Vec::new();
        let mut depth = 1_usize;
        loop {
            let Some(next) = self.next_row() else {
                tracing::warn!(line = self.line_num, "missing END:VCARD");
                break;
            };
            let (line_num, row) = match next {
                Ok(row) => row,
                Err(err) => return Some(Err(err.into())),
            };
            match marker(&row) {
                Marker::Begin => depth += 1,
                Marker::End => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                Marker::Other => {}
            }
            lines.push((line_num, row));
        }

        Some(Ok(build_card(lines, FALLBACK_VERSION)))
    }
}

/// Role of a logical line in the card structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Begin,
    End,
    Other,
}

fn marker(row: &str) -> Marker {
    let row = row.trim();
    if row.eq_ignore_ascii_case(BEGIN_VCARD) || inline_agent_head(row).is_some() {
        Marker::Begin
    } else if row.eq_ignore_ascii_case(END_VCARD) {
        Marker::End
    } else {
        Marker::Other
    }
}

/// Recognises a vCard 2.1 `AGENT:BEGIN:VCARD` line and returns the
/// `AGENT...:` part.
fn inline_agent_head(row: &str) -> Option<&str> {
    let split = row.len().checked_sub(BEGIN_VCARD.len())?;
    let head = row.get(..split)?;
    let tail = row.get(split..)?;
    if !tail.eq_ignore_ascii_case(BEGIN_VCARD) || !head.ends_with(':') {
        return None;
    }
    let key = head.split([';', ':']).next()?;
    let key = key.rsplit('.').next()?;
    key.trim().eq_ignore_ascii_case("AGENT").then_some(head)
}

/// Collects the lines of a nested card up to its END.
fn take_nested(rows: &mut impl Iterator<Item = (usize, String)>) -> Vec<(usize, String)> {
    let mut nested = Vec::new();
    let mut depth = 1_usize;
    for (line_num, row) in rows.by_ref() {
        match marker(&row) {
            Marker::Begin => depth += 1,
            Marker::End => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Marker::Other => {}
        }
        nested.push((line_num, row));
    }
    nested
}

/// Finds the VERSION of a card, ignoring nested cards.
fn detect_version(lines: &[(usize, String)], fallback: VCardVersion) -> VCardVersion {
    let mut depth = 0_usize;
    for (line_num, row) in lines {
        match marker(row) {
            Marker::Begin => depth += 1,
            Marker::End => depth = depth.saturating_sub(1),
            Marker::Other if depth == 0 => {
                let Some((key, value)) = row.split_once(':') else {
                    continue;
                };
                if !key.trim().eq_ignore_ascii_case("VERSION") {
                    continue;
                }
                if let Some(version) = VCardVersion::parse(value.trim()) {
                    return version;
                }
                tracing::warn!(line = line_num, value, "unknown VERSION");
            }
            Marker::Other => {}
        }
    }
    tracing::debug!(%fallback, "no usable VERSION line");
    fallback
}

/// Builds a card from the lines between its BEGIN and END.
fn build_card(lines: Vec<(usize, String)>, fallback: VCardVersion) -> VCard {
    let version = detect_version(&lines, fallback);
    let mut card = VCard::with_version(version);
    let mut rows = lines.into_iter();

    while let Some((line_num, row)) = rows.next() {
        match marker(&row) {
            Marker::Begin => {
                if let Some(head) = inline_agent_head(row.trim()) {
                    add_row(&mut card, head, line_num);
                }
                let nested = build_card(take_nested(&mut rows), version);
                attach_agent(&mut card, nested);
            }
            Marker::End => tracing::warn!(line = line_num, "unbalanced END:VCARD"),
            Marker::Other => add_row(&mut card, &row, line_num),
        }
    }

    attach_labels(&mut card.properties);
    card
}

/// Decodes one content line into the card, dropping it on error.
fn add_row(card: &mut VCard, row: &str, line_num: usize) {
    let line = match parse_content_line(row, line_num, card.version) {
        Ok(line) => line,
        Err(err) => {
            tracing::debug!(%err, "dropping malformed line");
            return;
        }
    };
    if line.name == "VERSION" {
        return;
    }

    tracing::trace!(line = line_num, name = %line.name, "decoding property");
    match build_property(line, card.version, line_num) {
        Ok(prop) => card.add_property(prop),
        Err(err) => tracing::debug!(%err, "dropping undecodable value"),
    }
}

/// Puts a nested vCard 2.1 AGENT card into the AGENT property it follows.
fn attach_agent(card: &mut VCard, nested: VCard) {
    let slot = card.properties.iter_mut().rev().find(|p| {
        p.key == PropertyKey::Related && p.has_type(types::AGENT) && p.value.is_empty()
    });

    match slot {
        Some(prop) => prop.value = PropertyValue::Relation(Relation::from(nested)),
        None => {
            let mut params = ParameterSection::default();
            params.add_type(types::AGENT);
            card.add_property(
                VCardProperty::new(PropertyKey::Related, Relation::from(nested)).with_params(params),
            );
        }
    }
}

/// Attaches LABEL properties to addresses.
///
/// A label goes to the unlabeled ADR in the same group, else the one with
/// the same TYPE set, else the first unlabeled ADR. Labels without an
/// address stay LABEL properties.
fn attach_labels(properties: &mut Vec<VCardProperty>) {
    let label_indices: Vec<usize> = properties
        .iter()
        .enumerate()
        .filter(|(_, p)| p.key == PropertyKey::Label)
        .map(|(i, _)| i)
        .collect();

    let mut attached = vec![false; properties.len()];
    for i in label_indices {
        let Some(text) = properties[i].as_text().map(str::to_string) else {
            continue;
        };
        if let Some(target) = label_target(properties, &properties[i]) {
            properties[target].params.label = Some(text);
            attached[i] = true;
        }
    }

    let mut flags = attached.into_iter();
    properties.retain(|_| !flags.next().unwrap_or(false));
}

fn label_target(properties: &[VCardProperty], label: &VCardProperty) -> Option<usize> {
    let candidates: Vec<(usize, &VCardProperty)> = properties
        .iter()
        .enumerate()
        .filter(|(_, p)| p.key == PropertyKey::Adr && p.params.label.is_none())
        .collect();

    let same_group = || {
        label.group.as_ref().and_then(|group| {
            candidates
                .iter()
                .find(|(_, adr)| adr.group.as_ref() == Some(group))
                .map(|(i, _)| *i)
        })
    };
    let same_types = || {
        candidates
            .iter()
            .find(|(_, adr)| same_type_set(&adr.params.types, &label.params.types))
            .map(|(i, _)| *i)
    };

    same_group()
        .or_else(same_types)
        .or_else(|| candidates.first().map(|(i, _)| *i))
}

fn same_type_set(a: &[String], b: &[String]) -> bool {
    a.len() == b.len() && a.iter().all(|t| b.contains(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::vcard::core::ContactId;

    #[test]
    fn parse_simple_card() {
        let input = "BEGIN:VCARD\r\nVERSION:4.0\r\nFN:John Doe\r\nEND:VCARD\r\n";
        let cards = parse(input);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].version, VCardVersion::V4_0);
        assert_eq!(cards[0].formatted_name(), Some("John Doe"));
        assert_eq!(cards[0].properties.len(), 1);
    }

    #[test]
    fn parse_multiple_cards_and_noise() {
        let input = "junk\r\nBEGIN:VCARD\r\nVERSION:3.0\r\nFN:A\r\nEND:VCARD\r\n\
                     END:VCARD\r\nBEGIN:VCARD\r\nVERSION:3.0\r\nFN:B\r\nEND:VCARD\r\n";
        let cards = parse(input);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[1].formatted_name(), Some("B"));
    }

    #[test]
    fn version_line_after_properties() {
        let input = "BEGIN:VCARD\r\nNOTE:a\\, b\r\nVERSION:2.1\r\nEND:VCARD\r\n";
        let card = parse_single(input).unwrap();
        assert_eq!(card.version, VCardVersion::V2_1);
        // 2.1 does not unescape commas
        assert_eq!(
            card.get_property(&PropertyKey::Note).and_then(VCardProperty::as_text),
            Some("a\\, b")
        );
    }

    #[test]
    fn missing_version_falls_back() {
        let card = parse_single("BEGIN:VCARD\r\nFN:x\r\nEND:VCARD\r\n").unwrap();
        assert_eq!(card.version, FALLBACK_VERSION);
    }

    #[test]
    fn missing_end_keeps_card() {
        let card = parse_single("BEGIN:VCARD\r\nVERSION:4.0\r\nFN:x\r\n").unwrap();
        assert_eq!(card.formatted_name(), Some("x"));
    }

    #[test]
    fn nested_agent_card_version_2_1() {
        let input = "BEGIN:VCARD\r\nVERSION:2.1\r\nFN:Boss\r\nAGENT:\r\n\
                     BEGIN:VCARD\r\nVERSION:2.1\r\nFN:Helper\r\nEND:VCARD\r\n\
                     TEL:123\r\nEND:VCARD\r\n";
        let cards = parse(input);
        assert_eq!(cards.len(), 1);
        let card = &cards[0];
        assert_eq!(card.telephones(), vec!["123"]);

        let agent = card.get_property(&PropertyKey::Related).unwrap();
        assert!(agent.has_type(types::AGENT));
        let PropertyValue::Relation(Relation::VCard(nested)) = &agent.value else {
            panic!("expected nested card");
        };
        assert_eq!(nested.formatted_name(), Some("Helper"));
    }

    #[test]
    fn inline_agent_begin() {
        let input = "BEGIN:VCARD\r\nVERSION:2.1\r\nFN:Boss\r\nAGENT:BEGIN:VCARD\r\n\
                     FN:Helper\r\nEND:VCARD\r\nEND:VCARD\r\n";
        let card = parse_single(input).unwrap();
        let agent = card.get_property(&PropertyKey::Related).unwrap();
        let PropertyValue::Relation(Relation::VCard(nested)) = &agent.value else {
            panic!("expected nested card");
        };
        assert_eq!(nested.version, VCardVersion::V2_1);
        assert_eq!(nested.formatted_name(), Some("Helper"));
    }

    #[test]
    fn labels_attach_to_addresses() {
        let input = "BEGIN:VCARD\r\nVERSION:3.0\r\n\
                     ADR;TYPE=WORK:;;1 Work St;City;;;\r\n\
                     ADR;TYPE=HOME:;;2 Home St;City;;;\r\n\
                     LABEL;TYPE=HOME:2 Home St\\nCity\r\n\
                     item1.ADR:;;3 Other St;;;;\r\n\
                     item1.LABEL:3 Other St\r\n\
                     END:VCARD\r\n";
        let card = parse_single(input).unwrap();
        assert!(card.get_property(&PropertyKey::Label).is_none());

        let adrs: Vec<&VCardProperty> = card.get_properties(&PropertyKey::Adr).collect();
        assert!(adrs[0].params.label.is_none());
        assert_eq!(adrs[1].params.label.as_deref(), Some("2 Home St\nCity"));
        assert_eq!(adrs[2].params.label.as_deref(), Some("3 Other St"));
    }

    #[test]
    fn label_without_address_is_kept() {
        let input = "BEGIN:VCARD\r\nVERSION:3.0\r\nLABEL:Somewhere\r\nEND:VCARD\r\n";
        let card = parse_single(input).unwrap();
        assert_eq!(
            card.get_property(&PropertyKey::Label).and_then(VCardProperty::as_text),
            Some("Somewhere")
        );
    }

    #[test]
    fn reader_yields_cards_lazily() {
        let input = "BEGIN:VCARD\r\nVERSION:4.0\r\nFN:A\r\nUID:urn:uuid:f81d4fae-7dec-11d0-a765-00a0c91e6bf6\r\nEND:VCARD\r\n\
                     BEGIN:VCARD\r\nVERSION:4.0\r\nFN:B\r\nEND:VCARD\r\n";
        let mut reader = VcfReader::new(input.as_bytes());
        let first = reader.next().unwrap().unwrap();
        assert!(matches!(first.uid(), Some(ContactId::Uuid(_))));
        let second = reader.next().unwrap().unwrap();
        assert_eq!(second.formatted_name(), Some("B"));
        assert!(reader.next().is_none());
    }

    #[test]
    fn reader_reports_io_errors() {
        let input: &[u8] = b"BEGIN:VCARD\r\nFN:\xFF\r\nEND:VCARD\r\n";
        let results: Vec<_> = VcfReader::new(input).collect();
        assert!(results.iter().any(Result::is_err));
    }
}
