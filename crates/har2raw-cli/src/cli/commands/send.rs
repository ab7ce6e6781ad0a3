//! `har2raw send <path> <index> --out <dir>` – import a single entry.

use anyhow::{Context, Result};
use har2raw_core::config::Har2RawConfig;
use har2raw_core::har::HarArchive;
use har2raw_core::import::import_one;
use har2raw_core::sink::DirectorySink;
use std::path::Path;

use super::entry_at;

pub fn run_send(cfg: &Har2RawConfig, path: &Path, index: usize, out: &Path) -> Result<()> {
    let archive = HarArchive::load(path)?;
    let entry = entry_at(&archive, index)?;
    let mut sink = DirectorySink::create(out)?;
    let service = import_one(entry, &mut sink, &cfg.build_options())
        .with_context(|| format!("entry #{index}"))?;
    tracing::info!("sent entry #{} ({}) to {}", index, service, sink.dir().display());
    println!("Entry #{index} ({service}) written to {}", sink.dir().display());
    Ok(())
}
