//! Entry conversion and import into a sink.
//!
//! `convert` is the pure core shared by the single-entry path (`import_one`)
//! and the batch path (`import_all`), so both emit identical bytes for the
//! same entry and options.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::Value;

use crate::error::ImportError;
use crate::har::normalize;
use crate::message::{build, BuildOptions, BuiltMessage, HttpService};
use crate::sink::Sink;

/// Default number of successful imports between progress reports.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 10;

#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub build: BuildOptions,
    /// Report progress after every N successful imports (0 disables).
    pub progress_interval: usize,
    /// Checked between entries; once set the batch stops.
    pub abort: Option<Arc<AtomicBool>>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            build: BuildOptions::default(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            abort: None,
        }
    }
}

/// Snapshot handed to the progress callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportProgress {
    pub imported: usize,
    pub failed: usize,
    /// Entries looked at so far (imported + failed).
    pub processed: usize,
    pub total: usize,
}

/// One entry that could not be imported. `index` is the 0-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFailure {
    pub index: usize,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub failed: usize,
    pub errors: Vec<EntryFailure>,
    /// True if the abort token stopped the batch before the last entry.
    pub cancelled: bool,
}

/// Normalizes and builds one raw entry. No side effects.
pub fn convert(entry: &Value, options: &BuildOptions) -> Result<BuiltMessage, ImportError> {
    let normalized = normalize(entry)?;
    let built = build(&normalized, options)?;
    tracing::debug!(
        "built {} {} -> {} (request {} bytes, response {} bytes)",
        normalized.method,
        normalized.url,
        built.service,
        built.request.len(),
        built.response.len()
    );
    Ok(built)
}

/// Converts one entry and forwards it to `sink`.
pub fn import_one<S>(
    entry: &Value,
    sink: &mut S,
    options: &BuildOptions,
) -> Result<HttpService, ImportError>
where
    S: Sink + ?Sized,
{
    let built = convert(entry, options)?;
    sink.add(&built.service, &built.request, &built.response)
        .map_err(|e| ImportError::Sink {
            reason: format!("{e:#}"),
        })?;
    Ok(built.service)
}

/// Imports every entry in order. A failing entry is counted and recorded,
/// never fatal to the batch.
pub fn import_all<S, F>(
    entries: &[Value],
    sink: &mut S,
    options: &ImportOptions,
    mut on_progress: F,
) -> ImportSummary
where
    S: Sink + ?Sized,
    F: FnMut(&ImportProgress),
{
    let mut summary = ImportSummary::default();

    for (index, entry) in entries.iter().enumerate() {
        if is_aborted(options.abort.as_deref()) {
            tracing::info!("import cancelled after {} of {} entries", index, entries.len());
            summary.cancelled = true;
            break;
        }

        match import_one(entry, sink, &options.build) {
            Ok(_) => {
                summary.imported += 1;
                if options.progress_interval > 0
                    && summary.imported % options.progress_interval == 0
                {
                    tracing::info!("imported {} entries so far", summary.imported);
                    on_progress(&ImportProgress {
                        imported: summary.imported,
                        failed: summary.failed,
                        processed: index + 1,
                        total: entries.len(),
                    });
                }
            }
            Err(err) => {
                tracing::warn!("entry {} failed: {}", index, err);
                summary.failed += 1;
                summary.errors.push(EntryFailure {
                    index,
                    message: err.to_string(),
                });
            }
        }
    }

    tracing::info!(
        "import complete: {} imported, {} failed",
        summary.imported,
        summary.failed
    );
    summary
}

fn is_aborted(token: Option<&AtomicBool>) -> bool {
    token.map_or(false, |t| t.load(Ordering::Relaxed))
}
