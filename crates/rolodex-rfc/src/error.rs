use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced to the caller by the vCard engine.
///
/// Malformed content lines are never reported here; the parser drops them.
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("Value out of range: {0}")]
    ValueOutOfRange(String),

    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RfcError {
    /// Maps an I/O error on `path` to the most specific error kind.
    #[must_use]
    pub fn from_io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.into()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.into()),
            _ => Self::Io(err),
        }
    }
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
