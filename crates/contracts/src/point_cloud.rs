//! Point cloud container
//!
//! Stored channel-major as a 4 × N `f32` array with rows
//! (x, y, z, intensity), the same order as the `.bin` files on disk.

use bytemuck::{Pod, Zeroable};
use ndarray::{Array2, ArrayView1, ArrayView2};

use crate::{Result, SensorError};

/// Number of channels per point
pub const POINT_CHANNELS: usize = 4;

/// Row index of each channel
pub const X_ROW: usize = 0;
pub const Y_ROW: usize = 1;
pub const Z_ROW: usize = 2;
pub const INTENSITY_ROW: usize = 3;

/// One interleaved point, 16 bytes (x, y, z, intensity: f32)
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PointXYZI {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub intensity: f32,
}

/// Bytes per interleaved point
pub const POINT_STRIDE: usize = std::mem::size_of::<PointXYZI>();

/// Point cloud with channel rows (x, y, z, intensity)
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    data: Array2<f32>,
}

impl PointCloud {
    /// Empty cloud
    pub fn empty() -> Self {
        Self {
            data: Array2::zeros((POINT_CHANNELS, 0)),
        }
    }

    /// Wrap a 4 × N array
    pub fn from_array(data: Array2<f32>) -> Result<Self> {
        if data.nrows() != POINT_CHANNELS {
            return Err(SensorError::shape(format!(
                "point cloud needs {POINT_CHANNELS} channel rows, got {}",
                data.nrows()
            )));
        }
        Ok(Self { data })
    }

    /// Stack four equal-length channels
    pub fn from_channels(x: Vec<f32>, y: Vec<f32>, z: Vec<f32>, intensity: Vec<f32>) -> Result<Self> {
        let n = x.len();
        if y.len() != n || z.len() != n || intensity.len() != n {
            return Err(SensorError::shape(format!(
                "channel lengths differ: x={}, y={}, z={}, intensity={}",
                n,
                y.len(),
                z.len(),
                intensity.len()
            )));
        }
        let mut flat = x;
        flat.extend(y);
        flat.extend(z);
        flat.extend(intensity);
        Array2::from_shape_vec((POINT_CHANNELS, n), flat)
            .map(|data| Self { data })
            .map_err(|e| SensorError::shape(e.to_string()))
    }

    /// Number of points
    #[inline]
    pub fn len(&self) -> usize {
        self.data.ncols()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn x(&self) -> ArrayView1<'_, f32> {
        self.data.row(X_ROW)
    }

    pub fn y(&self) -> ArrayView1<'_, f32> {
        self.data.row(Y_ROW)
    }

    pub fn z(&self) -> ArrayView1<'_, f32> {
        self.data.row(Z_ROW)
    }

    pub fn intensity(&self) -> ArrayView1<'_, f32> {
        self.data.row(INTENSITY_ROW)
    }

    /// Point `i` as an interleaved record
    pub fn point(&self, i: usize) -> Option<PointXYZI> {
        (i < self.len()).then(|| PointXYZI {
            x: self.data[[X_ROW, i]],
            y: self.data[[Y_ROW, i]],
            z: self.data[[Z_ROW, i]],
            intensity: self.data[[INTENSITY_ROW, i]],
        })
    }

    /// Interleave channels into per-point records
    pub fn to_points(&self) -> Vec<PointXYZI> {
        self.data
            .columns()
            .into_iter()
            .map(|c| PointXYZI {
                x: c[X_ROW],
                y: c[Y_ROW],
                z: c[Z_ROW],
                intensity: c[INTENSITY_ROW],
            })
            .collect()
    }

    pub fn as_array(&self) -> ArrayView2<'_, f32> {
        self.data.view()
    }

    pub fn into_array(self) -> Array2<f32> {
        self.data
    }
}

impl Default for PointCloud {
    fn default() -> Self {
        Self::empty()
    }
}
