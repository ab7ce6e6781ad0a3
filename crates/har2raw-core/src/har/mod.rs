//! HAR (HTTP Archive) loading and per-entry normalization.
//!
//! The archive is parsed whole and kept as raw JSON values so that a
//! malformed entry only fails when it is converted, not when the file loads.

mod entry;
mod parse;
mod table;

use std::path::Path;

use serde_json::Value;

use crate::error::ImportError;

pub use entry::{normalize, parse_target, Body, Header, NormalizedEntry, ParsedTarget};
pub use table::{rows, EntryRow};

/// Ordered entries of one HAR file.
#[derive(Debug, Clone, Default)]
pub struct HarArchive {
    entries: Vec<Value>,
}

impl HarArchive {
    /// Reads and parses a HAR file.
    ///
    /// An unreadable file or invalid JSON is a `FileLoad` error. A document
    /// without a usable `log.entries` array loads as an empty archive.
    pub fn load(path: &Path) -> Result<Self, ImportError> {
        let bytes = std::fs::read(path).map_err(|e| ImportError::FileLoad {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;
        let doc: Value = serde_json::from_slice(&bytes).map_err(|e| ImportError::FileLoad {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;
        let archive = Self::from_document(doc);
        tracing::info!(
            "loaded {} entries from {}",
            archive.len(),
            path.display()
        );
        Ok(archive)
    }

    /// Extracts `log.entries` from an already-parsed HAR document.
    pub fn from_document(mut doc: Value) -> Self {
        match doc.pointer_mut("/log/entries").map(Value::take) {
            Some(Value::Array(entries)) => Self { entries },
            Some(other) => {
                tracing::warn!("log.entries is not an array ({}); treating as empty", kind(&other));
                Self::default()
            }
            None => {
                tracing::warn!("HAR document has no log.entries; treating as empty");
                Self::default()
            }
        }
    }

    pub fn entries(&self) -> &[Value] {
        &self.entries
    }

    /// Entry at a 0-based position.
    pub fn get(&self, position: usize) -> Option<&Value> {
        self.entries.get(position)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn rows(&self) -> Vec<EntryRow> {
        rows(&self.entries)
    }
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
