// Path: crates/cli/src/commands/check_config.rs

use anyhow::{Context, Result};
use clap::Parser;
use custody_types::config::LedgerConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct CheckConfigArgs {
    /// The ledger configuration file to validate.
    pub path: PathBuf,
}

/// Validates the file and prints the effective configuration, defaults filled in.
pub fn run(args: CheckConfigArgs) -> Result<()> {
    let config = LedgerConfig::load(&args.path)
        .with_context(|| format!("invalid configuration {}", args.path.display()))?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
