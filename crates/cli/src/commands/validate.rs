//! `validate` command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use config_loader::{ConfigLoader, SensorCalibration};
use contracts::HDL32E_ELEVATIONS;
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;
use crate::error::CliError;

/// Validation result for JSON output
#[derive(Serialize, Debug)]
pub(crate) struct ValidationResult {
    valid: bool,
    calibration_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<CalibrationSummary>,
}

#[derive(Serialize, Debug)]
struct CalibrationSummary {
    model: String,
    rings: usize,
    range_resolution: f64,
    minimum_range: f64,
    base_to_fire_height: f64,
    min_elevation_deg: f64,
    max_elevation_deg: f64,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(calibration = %args.calibration.display(), "Validating calibration");

    let result = validate_calibration(&args.calibration);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        Err(CliError::invalid_calibration(&args.calibration).into())
    }
}

pub(crate) fn validate_calibration(path: &Path) -> ValidationResult {
    let calibration_path = path.display().to_string();

    match ConfigLoader::load_from_path(path) {
        Ok(calibration) => {
            let warnings = collect_warnings(&calibration);
            ValidationResult {
                valid: true,
                calibration_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(summarize(&calibration)),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            calibration_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

fn summarize(calibration: &SensorCalibration) -> CalibrationSummary {
    let elevations = calibration.elevations();
    let min = elevations.iter().copied().fold(f64::INFINITY, f64::min);
    let max = elevations.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    CalibrationSummary {
        model: calibration.model().to_string(),
        rings: calibration.ring_count(),
        range_resolution: calibration.range_resolution(),
        minimum_range: calibration.minimum_range(),
        base_to_fire_height: calibration.base_to_fire_height(),
        min_elevation_deg: min.to_degrees(),
        max_elevation_deg: max.to_degrees(),
    }
}

/// Non-fatal issues
fn collect_warnings(calibration: &SensorCalibration) -> Vec<String> {
    let mut warnings = Vec::new();
    let elevations = calibration.elevations();

    if calibration.model().eq_ignore_ascii_case("hdl32e")
        && elevations.len() != HDL32E_ELEVATIONS.len()
    {
        warnings.push(format!(
            "model is hdl32e but {} elevations are listed (expected {})",
            elevations.len(),
            HDL32E_ELEVATIONS.len()
        ));
    }

    if elevations.windows(2).any(|w| w[0] > w[1]) {
        warnings.push("elevations are not in ascending ring order".to_string());
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Calibration is valid: {}", result.calibration_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Model: {}", summary.model);
            println!("  Rings: {}", summary.rings);
            println!("  Range resolution: {}", summary.range_resolution);
            println!("  Minimum range: {}", summary.minimum_range);
            println!("  Base to fire height: {}", summary.base_to_fire_height);
            println!(
                "  Elevations: {:.2}° .. {:.2}°",
                summary.min_elevation_deg, summary.max_elevation_deg
            );
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Calibration is invalid: {}", result.calibration_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
