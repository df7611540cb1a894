//! Polar to Cartesian conversion
//!
//! For ring `r` with elevation `e_r`, range `R` and azimuth `θ`:
//!
//! ```text
//! z = sin(e_r)·R − base_to_fire_height
//! x = sin(θ)·cos(e_r)·R
//! y = −cos(θ)·cos(e_r)·R
//! ```
//!
//! Samples with `R <= minimum_range` are dropped. Survivors are emitted in
//! row-major (ring, then column) order.

use std::sync::Arc;

use contracts::{PointCloud, RawScan, Result, SensorCalibration, SensorError};
use ndarray::ArrayView2;
use tracing::debug;

/// Converts per-ring polar samples into a point cloud
#[derive(Debug, Clone)]
pub struct PolarConverter {
    calibration: Arc<SensorCalibration>,
}

impl PolarConverter {
    pub fn new(calibration: Arc<SensorCalibration>) -> Self {
        Self { calibration }
    }

    pub fn hdl32e() -> Self {
        Self::new(Arc::new(SensorCalibration::hdl32e()))
    }

    pub fn calibration(&self) -> &SensorCalibration {
        &self.calibration
    }

    /// Convert a decoded scan
    pub fn convert_scan(&self, scan: &RawScan) -> Result<PointCloud> {
        self.convert(scan.ranges.view(), scan.intensities.view(), scan.angles.view())
    }

    /// Convert ranges, intensities and angles into a point cloud.
    ///
    /// `ranges` and `intensities` are rings × columns. `angles` is either one
    /// row shared by every ring, or rings × columns.
    pub fn convert(
        &self,
        ranges: ArrayView2<'_, f64>,
        intensities: ArrayView2<'_, u8>,
        angles: ArrayView2<'_, f64>,
    ) -> Result<PointCloud> {
        let (rings, cols) = ranges.dim();
        self.check_shapes(rings, cols, intensities.dim(), angles.dim())?;

        let cos_elevations = self.calibration.cos_elevations();
        let sin_elevations = self.calibration.sin_elevations();
        let minimum_range = self.calibration.minimum_range();
        let height = self.calibration.base_to_fire_height();
        let shared_angles = angles.nrows() == 1;

        let valid = ranges.iter().filter(|&&r| r > minimum_range).count();
        let mut x = Vec::with_capacity(valid);
        let mut y = Vec::with_capacity(valid);
        let mut z = Vec::with_capacity(valid);
        let mut intensity = Vec::with_capacity(valid);

        for ((ring, col), &range) in ranges.indexed_iter() {
            if range > minimum_range {
                let angle = angles[[if shared_angles { 0 } else { ring }, col]];
                let horizontal = cos_elevations[ring] * range;
                x.push((angle.sin() * horizontal) as f32);
                y.push((-angle.cos() * horizontal) as f32);
                z.push((sin_elevations[ring] * range - height) as f32);
                intensity.push(f32::from(intensities[[ring, col]]));
            }
        }

        let dropped = ranges.len() - valid;
        debug!(kept = valid, dropped, "converted scan to point cloud");
        observability::record_points_converted(valid, dropped);

        PointCloud::from_channels(x, y, z, intensity)
    }

    fn check_shapes(
        &self,
        rings: usize,
        cols: usize,
        intensities: (usize, usize),
        angles: (usize, usize),
    ) -> Result<()> {
        let expected_rings = self.calibration.ring_count();
        if rings != expected_rings {
            return Err(SensorError::shape(format!(
                "ranges have {rings} rings but calibration has {expected_rings}"
            )));
        }
        if intensities != (rings, cols) {
            return Err(SensorError::shape(format!(
                "intensities have shape {intensities:?}, expected {:?}",
                (rings, cols)
            )));
        }
        if angles.1 != cols || (angles.0 != 1 && angles.0 != rings) {
            return Err(SensorError::shape(format!(
                "angles have shape {angles:?}, expected (1, {cols}) or ({rings}, {cols})"
            )));
        }
        Ok(())
    }
}

impl Default for PolarConverter {
    fn default() -> Self {
        Self::hdl32e()
    }
}
