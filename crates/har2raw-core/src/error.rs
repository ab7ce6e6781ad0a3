//! Error taxonomy for loading archives and converting entries.
//!
//! `FileLoad` aborts the whole operation; every other variant is scoped to a
//! single entry so the batch importer can count it and move on.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which side of an entry a body belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyPart {
    Request,
    Response,
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyPart::Request => write!(f, "request"),
            BodyPart::Response => write!(f, "response"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ImportError {
    /// HAR file missing, unreadable, or not valid JSON.
    #[error("load HAR file {}: {source}", .path.display())]
    FileLoad {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Entry lacks a parseable URL or the required request structure.
    #[error("malformed entry: {reason}")]
    MalformedEntry { reason: String },

    /// A body marked `base64` did not decode.
    #[error("invalid base64 {part} body: {source}")]
    InvalidEncoding {
        part: BodyPart,
        #[source]
        source: base64::DecodeError,
    },

    /// Response body could not be decoded even with the single-byte fallback.
    #[error("response body cannot be decoded as {charset}")]
    CharsetDecode { charset: String },

    /// The destination rejected an otherwise well-built message.
    #[error("sink rejected message: {reason}")]
    Sink { reason: String },
}

impl ImportError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        ImportError::MalformedEntry {
            reason: reason.into(),
        }
    }

    /// True for errors that only invalidate one entry (the batch continues).
    pub fn is_entry_scoped(&self) -> bool {
        !matches!(self, ImportError::FileLoad { .. })
    }
}
