// Path: crates/cli/src/commands/replay.rs

use anyhow::{Context, Result};
use clap::Parser;
use custody_cli::replay_files;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct ReplayArgs {
    /// Ledger configuration (TOML). Defaults apply when omitted.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// The JSON script of calls to replay.
    #[clap(long)]
    pub script: PathBuf,

    /// Print Prometheus metrics for the run to stderr.
    #[clap(long)]
    pub metrics: bool,

    /// Pretty-print the JSON report.
    #[clap(long)]
    pub pretty: bool,
}

pub fn run(args: ReplayArgs) -> Result<()> {
    if args.metrics {
        custody_telemetry::prometheus::install().context("failed to install metrics sink")?;
    }

    let report = replay_files(args.config.as_deref(), &args.script)?;
    tracing::info!(
        steps = report.steps.len(),
        refused = report.refused(),
        batches = report.batches.len(),
        "replay finished"
    );

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);

    if args.metrics {
        eprint!("{}", custody_telemetry::prometheus::render()?);
    }
    Ok(())
}
