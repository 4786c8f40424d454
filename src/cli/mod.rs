//! Command-line interface wiring for the `qrcard` binary.
//!
//! This module owns the clap definitions and delegates execution to the
//! submodules for each command family.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use qrcard::Settings;
use tracing::debug;

pub mod bulk;
pub mod common;
pub mod regions;
pub mod single;
pub mod utils;

/// Parsed CLI entrypoint for the `qrcard` binary.
#[derive(Parser, Debug)]
#[command(name = "qrcard", version, about = "Generate vCard QR codes from contact lists")]
pub struct Cli {
    /// JSON settings file (colors, size, dial prefix, format).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` wins when set.
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Top-level command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// High-level command families made available to end users.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Work with pasted contact lists.
    #[command(subcommand)]
    Bulk(bulk::BulkCommand),
    /// Build one contact from flags.
    #[command(subcommand)]
    Single(single::SingleCommand),
    /// Inspect the region catalog.
    #[command(subcommand)]
    Regions(regions::RegionsCommand),
}

/// Execute the requested command.
pub fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load_or_default(cli.config.as_deref()).with_context(|| {
        match cli.config.as_deref() {
            Some(path) => format!("failed to load settings from {}", path.display()),
            None => "failed to build default settings".to_string(),
        }
    })?;
    debug!(?settings, "settings loaded");

    match cli.command {
        Command::Bulk(cmd) => bulk::handle(cmd, settings),
        Command::Single(cmd) => single::handle(cmd, settings),
        Command::Regions(cmd) => regions::handle(cmd),
    }
}
