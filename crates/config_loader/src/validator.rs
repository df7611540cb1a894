//! Calibration profile validation
//!
//! Rules:
//! - at least one elevation
//! - every elevation finite and within [-π/2, π/2]
//! - range_resolution finite and > 0
//! - minimum_range finite and >= 0
//! - base_to_fire_height finite

use std::f64::consts::FRAC_PI_2;

use contracts::{CalibrationProfile, SensorError};

/// Validate a profile
///
/// Returns the first failure encountered, or Ok(()).
pub fn validate(profile: &CalibrationProfile) -> Result<(), SensorError> {
    validate_elevations(profile)?;
    validate_scalars(profile)?;
    Ok(())
}

fn validate_elevations(profile: &CalibrationProfile) -> Result<(), SensorError> {
    if profile.elevations.is_empty() {
        return Err(SensorError::config_validation(
            "elevations",
            "at least one ring elevation is required",
        ));
    }

    for (ring, elevation) in profile.elevations.iter().enumerate() {
        if !elevation.is_finite() || elevation.abs() > FRAC_PI_2 {
            return Err(SensorError::config_validation(
                format!("elevations[{ring}]"),
                format!("elevation must be a finite angle in [-pi/2, pi/2] radians, got {elevation}"),
            ));
        }
    }
    Ok(())
}

fn validate_scalars(profile: &CalibrationProfile) -> Result<(), SensorError> {
    if !profile.range_resolution.is_finite() || profile.range_resolution <= 0.0 {
        return Err(SensorError::config_validation(
            "range_resolution",
            format!(
                "range_resolution must be > 0, got {}",
                profile.range_resolution
            ),
        ));
    }

    if !profile.minimum_range.is_finite() || profile.minimum_range < 0.0 {
        return Err(SensorError::config_validation(
            "minimum_range",
            format!("minimum_range must be >= 0, got {}", profile.minimum_range),
        ));
    }

    if !profile.base_to_fire_height.is_finite() {
        return Err(SensorError::config_validation(
            "base_to_fire_height",
            "base_to_fire_height must be finite",
        ));
    }
    Ok(())
}
