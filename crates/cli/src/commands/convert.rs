//! `convert` command implementation.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use contracts::SensorCalibration;
use export::{write_point_cloud, PointCloudFormat};
use ingestion::reader_for_path;
use tracing::info;

use super::load_calibration;
use crate::cli::ConvertArgs;
use crate::error::CliError;

/// Outcome of one conversion
#[derive(Debug)]
pub(crate) struct ConvertSummary {
    pub reader: &'static str,
    pub format: PointCloudFormat,
    pub points: usize,
}

/// Execute the `convert` command
pub fn run_convert(args: &ConvertArgs) -> Result<()> {
    info!(
        input = %args.input.display(),
        output = %args.output.display(),
        "Converting"
    );

    let calibration = load_calibration(args.calibration.as_ref())?;
    let summary = convert_file(&args.input, &args.output, &calibration)?;

    println!(
        "✓ {} → {} ({} points, {:?} via {})",
        args.input.display(),
        args.output.display(),
        summary.points,
        summary.format,
        summary.reader
    );
    Ok(())
}

pub(crate) fn convert_file(
    input: &Path,
    output: &Path,
    calibration: &Arc<SensorCalibration>,
) -> Result<ConvertSummary> {
    if is_same_file(input, output) {
        return Err(CliError::same_input_output(output).into());
    }
    // fail on a bad output extension before decoding anything
    PointCloudFormat::from_path(output)?;

    let reader = reader_for_path(input, calibration.clone())?;
    let cloud = reader
        .read(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let format = write_point_cloud(output, &cloud)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    Ok(ConvertSummary {
        reader: reader.name(),
        format,
        points: cloud.len(),
    })
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
