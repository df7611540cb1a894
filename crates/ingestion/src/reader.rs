//! Point cloud reader trait
//!
//! One implementation per on-disk format. `reader_for_path` picks the
//! implementation from the file extension.

use std::path::Path;
use std::sync::Arc;

use contracts::{PointCloud, Result, SensorCalibration, SensorError};

use crate::velodyne::{
    load_velodyne_binary, PolarConverter, RawFrameDecoder, BINARY_EXTENSION, RAW_EXTENSION,
};

/// Reads a file into a point cloud
pub trait PointCloudReader: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// File extension handled, without the dot
    fn extension(&self) -> &'static str;

    /// Read `path` into a point cloud
    fn read(&self, path: &Path) -> Result<PointCloud>;
}

/// Reader for `.bin` point clouds
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryCloudReader;

impl PointCloudReader for BinaryCloudReader {
    fn name(&self) -> &'static str {
        "velodyne_binary"
    }

    fn extension(&self) -> &'static str {
        BINARY_EXTENSION
    }

    fn read(&self, path: &Path) -> Result<PointCloud> {
        load_velodyne_binary(path)
    }
}

/// Reader for `.png` raw frames: decode then convert
#[derive(Debug, Clone)]
pub struct RawFrameReader {
    decoder: RawFrameDecoder,
    converter: PolarConverter,
}

impl RawFrameReader {
    pub fn new(calibration: Arc<SensorCalibration>) -> Self {
        Self {
            decoder: RawFrameDecoder::new(calibration.clone()),
            converter: PolarConverter::new(calibration),
        }
    }

    pub fn decoder(&self) -> &RawFrameDecoder {
        &self.decoder
    }

    pub fn converter(&self) -> &PolarConverter {
        &self.converter
    }
}

impl PointCloudReader for RawFrameReader {
    fn name(&self) -> &'static str {
        "velodyne_raw"
    }

    fn extension(&self) -> &'static str {
        RAW_EXTENSION
    }

    fn read(&self, path: &Path) -> Result<PointCloud> {
        let scan = self.decoder.decode_path(path)?;
        self.converter.convert_scan(&scan)
    }
}

/// Pick a reader from the file extension
pub fn reader_for_path(
    path: &Path,
    calibration: Arc<SensorCalibration>,
) -> Result<Box<dyn PointCloudReader>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    match ext {
        BINARY_EXTENSION => Ok(Box::new(BinaryCloudReader)),
        RAW_EXTENSION => Ok(Box::new(RawFrameReader::new(calibration))),
        other => Err(SensorError::format_any(&[BINARY_EXTENSION, RAW_EXTENSION], other)),
    }
}
