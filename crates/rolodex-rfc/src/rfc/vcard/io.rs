//! Reading and writing VCF files.

use std::fs;
use std::path::Path;

use super::build::{SerializeOptions, serialize};
use super::charset::decode_document;
use super::core::VCard;
use super::parse::parse;
use crate::error::{RfcError, RfcResult};

/// Reads every vCard in a file.
///
/// The bytes are decoded with the encoding a byte order mark names, else
/// with the encoding labelled `encoding_label`, else as UTF-8.
///
/// ## Errors
/// Returns [`RfcError::NotFound`] or [`RfcError::PermissionDenied`] if the
/// file cannot be opened, [`RfcError::UnsupportedEncoding`] for an unknown
/// label, and [`RfcError::Io`] for other read failures.
#[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load(path: impl AsRef<Path>, encoding_label: Option<&str>) -> RfcResult<Vec<VCard>> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|err| RfcError::from_io(err, path))?;
    let text = decode_document(&bytes, encoding_label)?;
    let cards = parse(&text);
    tracing::info!(count = cards.len(), "loaded vCards");
    Ok(cards)
}

/// Writes cards to a file as UTF-8, replacing its contents.
///
/// ## Errors
/// Returns [`RfcError::NotFound`] if the parent directory does not exist,
/// [`RfcError::PermissionDenied`] if the file cannot be written, and
/// [`RfcError::Io`] for other write failures.
#[tracing::instrument(skip(path, cards, options), fields(path = %path.as_ref().display(), count = cards.len()))]
pub fn save(path: impl AsRef<Path>, cards: &[VCard], options: &SerializeOptions) -> RfcResult<()> {
    let path = path.as_ref();
    fs::write(path, serialize(cards, options)).map_err(|err| RfcError::from_io(err, path))?;
    tracing::info!("saved vCards");
    Ok(())
}
