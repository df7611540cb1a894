//! Sensor calibration
//!
//! Per-ring elevation table plus the scalar constants needed to turn raw
//! sensor ticks into physical units. Trigonometry of the elevation table is
//! computed once at construction and never changes afterwards, so a
//! `SensorCalibration` can be shared between threads behind an `Arc`.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::RawFrameLayout;

/// Number of azimuth ticks in one revolution (hundredths of a degree).
pub const ANGLE_TICKS_PER_REVOLUTION: u32 = 36000;

/// HDL-32E range resolution, distance units per raw tick.
pub const HDL32E_RANGE_RESOLUTION: f64 = 0.002;

/// HDL-32E minimum valid range. Returns at or below this are discarded.
pub const HDL32E_MINIMUM_RANGE: f64 = 1.0;

/// HDL-32E offset between mechanical base and optical centre.
pub const HDL32E_BASE_TO_FIRE_HEIGHT: f64 = 0.090805;

/// HDL-32E elevation angles in radians, ring 0 first.
pub const HDL32E_ELEVATIONS: [f64; 32] = [
    -0.1862, -0.1628, -0.1396, -0.1164, -0.0930, -0.0698, -0.0466, -0.0232, 0., 0.0232, 0.0466,
    0.0698, 0.0930, 0.1164, 0.1396, 0.1628, 0.1862, 0.2094, 0.2327, 0.2560, 0.2793, 0.3025,
    0.3259, 0.3491, 0.3723, 0.3957, 0.4189, 0.4421, 0.4655, 0.4887, 0.5119, 0.5353,
];

/// Convert a raw azimuth reading to radians.
#[inline]
pub fn angle_from_ticks(ticks: u16) -> f64 {
    f64::from(ticks) * (2.0 * PI) / f64::from(ANGLE_TICKS_PER_REVOLUTION)
}

/// Serializable calibration profile
///
/// This is the on-disk shape. Every field falls back to the HDL-32E value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationProfile {
    /// Free-form sensor model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Distance units per raw range tick
    #[serde(default = "default_range_resolution")]
    pub range_resolution: f64,

    /// Returns with range <= this value are dropped
    #[serde(default = "default_minimum_range")]
    pub minimum_range: f64,

    /// Subtracted from every z coordinate
    #[serde(default = "default_base_to_fire_height")]
    pub base_to_fire_height: f64,

    /// Elevation per ring, radians
    #[serde(default = "default_elevations")]
    pub elevations: Vec<f64>,
}

fn default_model() -> String {
    "hdl32e".to_string()
}

fn default_range_resolution() -> f64 {
    HDL32E_RANGE_RESOLUTION
}

fn default_minimum_range() -> f64 {
    HDL32E_MINIMUM_RANGE
}

fn default_base_to_fire_height() -> f64 {
    HDL32E_BASE_TO_FIRE_HEIGHT
}

fn default_elevations() -> Vec<f64> {
    HDL32E_ELEVATIONS.to_vec()
}

impl Default for CalibrationProfile {
    fn default() -> Self {
        Self {
            model: default_model(),
            range_resolution: default_range_resolution(),
            minimum_range: default_minimum_range(),
            base_to_fire_height: default_base_to_fire_height(),
            elevations: default_elevations(),
        }
    }
}

/// Calibration with precomputed elevation trigonometry
///
/// Built from a [`CalibrationProfile`]. Validation of the profile happens in
/// `config_loader`; this type only caches the derived values.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorCalibration {
    profile: CalibrationProfile,
    cos_elevations: Vec<f64>,
    sin_elevations: Vec<f64>,
}

impl SensorCalibration {
    /// Build from a profile, precomputing cos/sin of each elevation
    pub fn new(profile: CalibrationProfile) -> Self {
        let cos_elevations = profile.elevations.iter().map(|e| e.cos()).collect();
        let sin_elevations = profile.elevations.iter().map(|e| e.sin()).collect();
        Self {
            profile,
            cos_elevations,
            sin_elevations,
        }
    }

    /// Factory calibration of the Velodyne HDL-32E
    pub fn hdl32e() -> Self {
        Self::new(CalibrationProfile::default())
    }

    pub fn profile(&self) -> &CalibrationProfile {
        &self.profile
    }

    pub fn model(&self) -> &str {
        &self.profile.model
    }

    /// Number of rings (lasers)
    #[inline]
    pub fn ring_count(&self) -> usize {
        self.profile.elevations.len()
    }

    #[inline]
    pub fn elevations(&self) -> &[f64] {
        &self.profile.elevations
    }

    #[inline]
    pub fn cos_elevations(&self) -> &[f64] {
        &self.cos_elevations
    }

    #[inline]
    pub fn sin_elevations(&self) -> &[f64] {
        &self.sin_elevations
    }

    #[inline]
    pub fn range_resolution(&self) -> f64 {
        self.profile.range_resolution
    }

    #[inline]
    pub fn minimum_range(&self) -> f64 {
        self.profile.minimum_range
    }

    #[inline]
    pub fn base_to_fire_height(&self) -> f64 {
        self.profile.base_to_fire_height
    }

    /// Convert a raw range reading to distance units
    #[inline]
    pub fn range_from_ticks(&self, ticks: u16) -> f64 {
        f64::from(ticks) * self.profile.range_resolution
    }

    /// Row layout of a raw frame recorded by this sensor
    pub fn layout(&self) -> RawFrameLayout {
        RawFrameLayout::for_rings(self.ring_count())
    }
}

impl Default for SensorCalibration {
    fn default() -> Self {
        Self::hdl32e()
    }
}

impl From<CalibrationProfile> for SensorCalibration {
    fn from(profile: CalibrationProfile) -> Self {
        Self::new(profile)
    }
}
