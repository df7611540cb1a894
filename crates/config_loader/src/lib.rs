//! # Config Loader
//!
//! Sensor calibration loading.
//!
//! Responsibilities:
//! - Parse TOML/JSON calibration profiles
//! - Validate profile values
//! - Produce a `SensorCalibration` with precomputed trigonometry
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let calibration = ConfigLoader::load_from_path(Path::new("hdl32e.toml")).unwrap();
//! println!("rings: {}", calibration.ring_count());
//! ```

mod parser;
mod validator;

pub use contracts::{CalibrationProfile, SensorCalibration};
pub use parser::ConfigFormat;

use contracts::SensorError;
use std::path::Path;
use tracing::debug;

/// Calibration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a calibration from a file path
    ///
    /// Format is detected from the extension (.toml / .json).
    ///
    /// # Errors
    /// - Missing file
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<SensorCalibration, SensorError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        let calibration = Self::load_from_str(&content, format)?;
        debug!(
            path = %path.display(),
            model = calibration.model(),
            rings = calibration.ring_count(),
            "loaded calibration"
        );
        Ok(calibration)
    }

    /// Load a calibration from a string
    pub fn load_from_str(
        content: &str,
        format: ConfigFormat,
    ) -> Result<SensorCalibration, SensorError> {
        let profile = Self::parse_and_validate(content, format)?;
        Ok(SensorCalibration::new(profile))
    }

    /// Load from `path` if given, otherwise the HDL-32E factory calibration
    pub fn load_or_default(path: Option<&Path>) -> Result<SensorCalibration, SensorError> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Ok(SensorCalibration::hdl32e()),
        }
    }

    /// Validate an in-memory profile and build the calibration
    pub fn from_profile(profile: CalibrationProfile) -> Result<SensorCalibration, SensorError> {
        validator::validate(&profile)?;
        Ok(SensorCalibration::new(profile))
    }

    /// Serialize a profile to TOML
    pub fn to_toml(profile: &CalibrationProfile) -> Result<String, SensorError> {
        toml::to_string_pretty(profile)
            .map_err(|e| SensorError::config_parse(format!("TOML serialize error: {e}")))
    }

    /// Serialize a profile to JSON
    pub fn to_json(profile: &CalibrationProfile) -> Result<String, SensorError> {
        serde_json::to_string_pretty(profile)
            .map_err(|e| SensorError::config_parse(format!("JSON serialize error: {e}")))
    }
}

impl ConfigLoader {
    fn detect_format(path: &Path) -> Result<ConfigFormat, SensorError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            SensorError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext).ok_or_else(|| {
            SensorError::config_parse(format!("unsupported config format: .{ext}"))
        })
    }

    fn read_file(path: &Path) -> Result<String, SensorError> {
        if !path.is_file() {
            return Err(SensorError::not_found(path));
        }
        Ok(std::fs::read_to_string(path)?)
    }

    fn parse_and_validate(
        content: &str,
        format: ConfigFormat,
    ) -> Result<CalibrationProfile, SensorError> {
        let profile = parser::parse(content, format)?;
        validator::validate(&profile)?;
        Ok(profile)
    }
}
