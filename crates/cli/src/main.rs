// Path: crates/cli/src/main.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # Custody Ledger CLI
//!
//! Replays scripted calls against an in-memory tracking ledger and validates
//! ledger configuration files.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use custody_telemetry::init::{init_tracing, LogFormat};

mod commands;

use commands::*;

#[derive(Parser, Debug)]
#[clap(
    name = "custody",
    version,
    about = "Tools for the custody tracking ledger."
)]
struct Cli {
    /// Log output format (logs go to stderr).
    #[clap(long, value_enum, default_value_t = LogFormatArg::Json, global = true)]
    log_format: LogFormatArg,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LogFormatArg {
    Json,
    Compact,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Json => LogFormat::Json,
            LogFormatArg::Compact => LogFormat::Compact,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a JSON script of calls and print the outcome as JSON.
    Replay(replay::ReplayArgs),

    /// Validate a ledger configuration file.
    CheckConfig(check_config::CheckConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format.into())?;

    match cli.command {
        Commands::Replay(args) => replay::run(args),
        Commands::CheckConfig(args) => check_config::run(args),
    }
}
