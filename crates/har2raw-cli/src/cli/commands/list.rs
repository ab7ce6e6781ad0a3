//! `har2raw list <path>` – show the entries of a HAR file.

use anyhow::Result;
use har2raw_core::har::HarArchive;
use std::path::Path;

pub fn run_list(path: &Path) -> Result<()> {
    let archive = HarArchive::load(path)?;
    if archive.is_empty() {
        println!("No entries in HAR file.");
        return Ok(());
    }
    println!(
        "{:<5} {:<8} {:<6} {:<10} {:<24} {}",
        "#", "METHOD", "STATUS", "SIZE", "MIME", "URL"
    );
    for row in archive.rows() {
        println!(
            "{:<5} {:<8} {:<6} {:<10} {:<24} {}",
            row.index, row.method, row.status, row.size, row.mime_type, row.url
        );
    }
    Ok(())
}
