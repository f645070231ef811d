//! Error types for veiltext.
//!
//! Only the collaborator layer (stores, transfer, title suggestion) produces
//! errors. The segmentation engine itself is total: stale ids are no-ops and
//! offsets are clamped.

use std::fmt;
use std::io;

/// Result type alias for veiltext operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for veiltext operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error from a file-backed store.
    Io(io::Error),
    /// Malformed JSON in a stored record or an import payload.
    Json(serde_json::Error),
    /// The title-suggestion collaborator failed.
    Title(String),
    /// A namespace or file id that cannot be used as a storage key.
    InvalidKey(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::Title(msg) => write!(f, "title suggestion failed: {msg}"),
            Self::InvalidKey(key) => write!(f, "invalid storage key: {key:?}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}
