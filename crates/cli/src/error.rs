//! Error types for CLI operations.

use std::path::PathBuf;
use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Calibration profile failed to load or validate
    #[error("Calibration is invalid: {path}")]
    InvalidCalibration { path: PathBuf },

    /// Input and output resolve to the same file
    #[error("Refusing to overwrite input file: {path}")]
    SameInputOutput { path: PathBuf },
}

impl CliError {
    pub fn invalid_calibration(path: impl Into<PathBuf>) -> Self {
        Self::InvalidCalibration { path: path.into() }
    }

    pub fn same_input_output(path: impl Into<PathBuf>) -> Self {
        Self::SameInputOutput { path: path.into() }
    }
}
