//! `har2raw import <path> --out <dir>` – import every entry.

use anyhow::Result;
use har2raw_core::config::Har2RawConfig;
use har2raw_core::har::HarArchive;
use har2raw_core::import::import_all;
use har2raw_core::sink::DirectorySink;
use std::path::Path;

pub fn run_import(cfg: &Har2RawConfig, path: &Path, out: &Path) -> Result<()> {
    let archive = HarArchive::load(path)?;
    if archive.is_empty() {
        println!("No entries to import.");
        return Ok(());
    }

    let mut sink = DirectorySink::create(out)?;
    let summary = import_all(
        archive.entries(),
        &mut sink,
        &cfg.import_options(),
        |progress| {
            println!(
                "  {} of {} entries processed ({} imported, {} failed)...",
                progress.processed, progress.total, progress.imported, progress.failed
            )
        },
    );

    for failure in &summary.errors {
        println!("  #{}: {}", failure.index + 1, failure.message);
    }
    println!(
        "Imported {} entries with {} errors into {}.",
        summary.imported,
        summary.failed,
        sink.dir().display()
    );
    Ok(())
}
