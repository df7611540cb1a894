//! Decoded raw-frame channels

use ndarray::Array2;

/// Integer channels unpacked from a raw frame, before scaling
///
/// Shapes, with `R` rings and `M` azimuth columns:
/// - `intensities`: R × M
/// - `ranges`: R × M, range ticks
/// - `angles`: 1 × M, hundredths of a degree
/// - `timestamps`: T × M, usually T = 1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawChannels {
    pub intensities: Array2<u8>,
    pub ranges: Array2<u16>,
    pub angles: Array2<u16>,
    pub timestamps: Array2<i64>,
}

impl RawChannels {
    #[inline]
    pub fn rings(&self) -> usize {
        self.ranges.nrows()
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.ranges.ncols()
    }
}

/// Scaled lidar scan
///
/// `ranges` are in distance units and `angles` in radians. `angles` has one
/// row shared by all rings.
#[derive(Debug, Clone, PartialEq)]
pub struct RawScan {
    pub ranges: Array2<f64>,
    pub intensities: Array2<u8>,
    pub angles: Array2<f64>,
    pub approximate_timestamps: Array2<i64>,
}

impl RawScan {
    #[inline]
    pub fn rings(&self) -> usize {
        self.ranges.nrows()
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.ranges.ncols()
    }

    /// Total number of (ring, column) samples
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.ranges.len()
    }

    /// Earliest and latest timestamp in the scan
    pub fn timestamp_span(&self) -> Option<(i64, i64)> {
        let min = self.approximate_timestamps.iter().copied().min()?;
        let max = self.approximate_timestamps.iter().copied().max()?;
        Some((min, max))
    }
}
