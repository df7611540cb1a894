//! # Velodyne Tools CLI
//!
//! Command-line entry point.
//!
//! Provides:
//! - Raw frame / point cloud inspection
//! - Conversion to `.bin` and `.ply`
//! - Calibration profile validation

mod cli;
mod commands;
mod error;

use anyhow::Result;
use clap::Parser;
use observability::ObservabilityConfig;
use tracing::debug;

use cli::{Cli, Commands};
use commands::{run_convert, run_info, run_validate};

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(&cli)?;

    debug!(version = env!("CARGO_PKG_VERSION"), "velodyne-tools starting");

    let result = match &cli.command {
        Commands::Info(args) => run_info(args),
        Commands::Convert(args) => run_convert(args),
        Commands::Validate(args) => run_validate(args),
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}

/// Initialize logging based on CLI options
fn init_logging(cli: &Cli) -> Result<()> {
    observability::init_with_config(logging_config(cli))
}

fn logging_config(cli: &Cli) -> ObservabilityConfig {
    // -q and -v are explicit requests, so they win over RUST_LOG
    let (level, force_level) = if cli.quiet {
        ("warn", true)
    } else {
        match cli.verbose {
            0 => ("info", false),
            1 => ("debug", true),
            _ => ("trace", true),
        }
    };

    ObservabilityConfig {
        log_format: cli.log_format.into(),
        default_log_level: level.to_string(),
        force_level,
    }
}
