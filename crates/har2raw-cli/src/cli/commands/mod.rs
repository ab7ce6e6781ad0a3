//! CLI command handlers. Each command is in its own file.

mod import;
mod list;
mod send;
mod show;

pub use import::run_import;
pub use list::run_list;
pub use send::run_send;
pub use show::run_show;

use anyhow::{bail, Result};
use har2raw_core::har::HarArchive;
use serde_json::Value;

/// Entry by its 1-based listing number.
fn entry_at(archive: &HarArchive, index: usize) -> Result<&Value> {
    match index.checked_sub(1).and_then(|pos| archive.get(pos)) {
        Some(entry) => Ok(entry),
        None => bail!(
            "no entry #{index} (archive has {} entries)",
            archive.len()
        ),
    }
}
