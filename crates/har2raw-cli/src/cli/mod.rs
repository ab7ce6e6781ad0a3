//! CLI for har2raw.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use har2raw_core::config;
use std::path::Path;

use commands::{run_import, run_list, run_send, run_show};

/// Top-level CLI for har2raw.
#[derive(Debug, Parser)]
#[command(name = "har2raw")]
#[command(about = "har2raw: rebuild raw HTTP/1.1 messages from HAR captures", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List the entries of a HAR file.
    List {
        /// Path to the HAR file.
        path: String,
    },

    /// Print the rebuilt request and response of one entry.
    Show {
        /// Path to the HAR file.
        path: String,
        /// Entry number as shown by `list` (1-based).
        index: usize,
    },

    /// Rebuild one entry and write it to an output directory.
    Send {
        /// Path to the HAR file.
        path: String,
        /// Entry number as shown by `list` (1-based).
        index: usize,
        /// Output directory for raw messages and the manifest.
        #[arg(long, value_name = "DIR")]
        out: String,
    },

    /// Rebuild every entry and write them to an output directory.
    Import {
        /// Path to the HAR file.
        path: String,
        /// Output directory for raw messages and the manifest.
        #[arg(long, value_name = "DIR")]
        out: String,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::List { path } => run_list(Path::new(&path))?,
            CliCommand::Show { path, index } => run_show(&cfg, Path::new(&path), index)?,
            CliCommand::Send { path, index, out } => {
                run_send(&cfg, Path::new(&path), index, Path::new(&out))?
            }
            CliCommand::Import { path, out } => {
                run_import(&cfg, Path::new(&path), Path::new(&out))?
            }
        }

        Ok(())
    }
}
