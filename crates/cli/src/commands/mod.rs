//! Command implementations.

mod convert;
mod info;
mod validate;

pub use convert::run_convert;
pub use info::run_info;
pub use validate::run_validate;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use config_loader::{ConfigLoader, SensorCalibration};

/// Load the calibration named on the command line, or the HDL-32E default
pub(crate) fn load_calibration(path: Option<&PathBuf>) -> Result<Arc<SensorCalibration>> {
    let calibration = ConfigLoader::load_or_default(path.map(PathBuf::as_path))
        .with_context(|| match path {
            Some(p) => format!("Failed to load calibration from {}", p.display()),
            None => "Failed to build default calibration".to_string(),
        })?;
    Ok(Arc::new(calibration))
}
