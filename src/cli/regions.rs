//! Region catalog commands (`qrcard regions ...`).

use anyhow::Result;
use clap::{Args, Subcommand};
use qrcard::RegionCatalog;

/// Region subcommands.
#[derive(Subcommand, Debug)]
pub enum RegionsCommand {
    /// List all known regions.
    List,
    /// Check whether a name is a catalog region.
    Check(RegionCheckArgs),
}

/// Arguments for `qrcard regions check`.
#[derive(Args, Debug)]
pub struct RegionCheckArgs {
    /// Region name to look up (case-insensitive).
    pub name: String,
}

/// Execute a regions command.
pub fn handle(command: RegionsCommand) -> Result<()> {
    match command {
        RegionsCommand::List => list(),
        RegionsCommand::Check(args) => check(args),
    }
}

fn list() -> Result<()> {
    println!("Available regions:");
    for region in RegionCatalog::list() {
        println!("  - {}", region);
    }
    Ok(())
}

fn check(args: RegionCheckArgs) -> Result<()> {
    let region = RegionCatalog::resolve(&args.name)?;
    println!("{}: known region", region);
    Ok(())
}
