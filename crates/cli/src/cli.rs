//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Velodyne tools - inspect and convert HDL-32E raw frames and point clouds
#[derive(Parser, Debug)]
#[command(
    name = "velodyne-tools",
    author,
    version,
    about = "Inspect and convert Velodyne raw frames and point clouds",
    long_about = "Decodes PNG-packed Velodyne raw frames and binary point clouds.\n\n\
                  Raw frames are converted to Cartesian points with a per-ring \n\
                  elevation calibration (HDL-32E by default)."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "VELODYNE_TOOLS_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "VELODYNE_TOOLS_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show dimensions and statistics of a raw frame or point cloud
    Info(InfoArgs),

    /// Convert a raw frame or point cloud to `.bin` or `.ply`
    Convert(ConvertArgs),

    /// Validate a calibration profile
    Validate(ValidateArgs),
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Raw frame (`.png`) or point cloud (`.bin`)
    pub path: PathBuf,

    /// Calibration profile (TOML or JSON); HDL-32E when omitted
    #[arg(short, long, env = "VELODYNE_TOOLS_CALIBRATION")]
    pub calibration: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `convert` command
#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Raw frame (`.png`) or point cloud (`.bin`)
    pub input: PathBuf,

    /// Output file; format follows the extension (`.bin` or `.ply`)
    pub output: PathBuf,

    /// Calibration profile (TOML or JSON); HDL-32E when omitted
    #[arg(short, long, env = "VELODYNE_TOOLS_CALIBRATION")]
    pub calibration: Option<PathBuf>,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Calibration profile to validate
    pub calibration: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => observability::LogFormat::Json,
            LogFormat::Pretty => observability::LogFormat::Pretty,
            LogFormat::Compact => observability::LogFormat::Compact,
        }
    }
}
