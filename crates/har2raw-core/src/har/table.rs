//! Row view of archive entries for tabular listings.

use serde::Serialize;
use serde_json::Value;

/// One listing row. `index` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryRow {
    pub index: usize,
    pub method: String,
    pub url: String,
    pub status: i64,
    pub size: i64,
    pub mime_type: String,
}

impl EntryRow {
    /// Reads the row straight from the raw entry; absent or mistyped fields
    /// show as `""` or `0` rather than failing the listing.
    pub fn from_entry(position: usize, entry: &Value) -> Self {
        let text = |pointer: &str| {
            entry
                .pointer(pointer)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let number = |pointer: &str| entry.pointer(pointer).and_then(Value::as_i64).unwrap_or(0);

        Self {
            index: position + 1,
            method: text("/request/method"),
            url: text("/request/url"),
            status: number("/response/status"),
            size: number("/response/content/size"),
            mime_type: text("/response/content/mimeType"),
        }
    }
}

pub fn rows(entries: &[Value]) -> Vec<EntryRow> {
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| EntryRow::from_entry(i, e))
        .collect()
}
