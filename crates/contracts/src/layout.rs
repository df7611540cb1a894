//! Raw frame row layout
//!
//! A raw frame is an 8-bit grayscale image whose rows are partitioned into
//! four blocks. With `R` rings:
//!
//! | rows              | block       | bytes per value |
//! |-------------------|-------------|-----------------|
//! | `[0, R)`          | intensities | 1               |
//! | `[R, 3R)`         | ranges      | 2 (`u16`)       |
//! | `[3R, 3R + 2)`    | angles      | 2 (`u16`)       |
//! | `[3R + 2, end)`   | timestamps  | 8 (`i64`)       |
//!
//! Wide values are stored with their little-endian bytes stacked down a
//! column, one byte per raw row.

use std::ops::Range;

use crate::{Result, SensorError};

/// Bytes per encoded range value
pub const RANGE_BYTES: usize = 2;

/// Bytes per encoded angle value
pub const ANGLE_BYTES: usize = 2;

/// Bytes per encoded timestamp value
pub const TIMESTAMP_BYTES: usize = 8;

/// Row partition of a raw frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFrameLayout {
    rings: usize,
}

impl RawFrameLayout {
    /// Layout of the 32-ring HDL-32E: `[0,32) [32,96) [96,98) [98,end)`
    pub const HDL32E: RawFrameLayout = RawFrameLayout { rings: 32 };

    pub const fn for_rings(rings: usize) -> Self {
        Self { rings }
    }

    #[inline]
    pub fn rings(&self) -> usize {
        self.rings
    }

    pub fn intensity_rows(&self) -> Range<usize> {
        0..self.rings
    }

    pub fn range_rows(&self) -> Range<usize> {
        let start = self.intensity_rows().end;
        start..start + self.rings * RANGE_BYTES
    }

    pub fn angle_rows(&self) -> Range<usize> {
        let start = self.range_rows().end;
        start..start + ANGLE_BYTES
    }

    /// First row of the timestamp block; the block runs to the bottom of the frame
    pub fn timestamp_start(&self) -> usize {
        self.angle_rows().end
    }

    /// Smallest valid frame height (one decoded timestamp row)
    pub fn min_height(&self) -> usize {
        self.timestamp_start() + TIMESTAMP_BYTES
    }

    /// Frame height needed to hold `timestamp_rows` decoded timestamp rows
    pub fn height_for(&self, timestamp_rows: usize) -> usize {
        self.timestamp_start() + timestamp_rows * TIMESTAMP_BYTES
    }

    /// Check a frame height against this layout.
    ///
    /// Returns the number of decoded timestamp rows.
    pub fn timestamp_rows(&self, height: usize) -> Result<usize> {
        if height < self.min_height() {
            return Err(SensorError::shape(format!(
                "raw frame has {height} rows, at least {} required for {} rings",
                self.min_height(),
                self.rings
            )));
        }
        let remainder = height - self.timestamp_start();
        if remainder % TIMESTAMP_BYTES != 0 {
            return Err(SensorError::shape(format!(
                "timestamp block has {remainder} rows, expected a multiple of {TIMESTAMP_BYTES}"
            )));
        }
        Ok(remainder / TIMESTAMP_BYTES)
    }
}

impl Default for RawFrameLayout {
    fn default() -> Self {
        Self::HDL32E
    }
}
