//! Binary point cloud loader
//!
//! A `.bin` file is a flat little-endian `f32` array holding four
//! channels back to back: all x, then all y, then all z, then all intensity.

use std::path::Path;

use byteorder::{ByteOrder, LittleEndian};
use contracts::{ensure_input_file, PointCloud, Result, SensorError, POINT_CHANNELS};
use ndarray::Array2;
use tracing::debug;

/// Extension of binary point cloud files
pub const BINARY_EXTENSION: &str = "bin";

const F32_BYTES: usize = std::mem::size_of::<f32>();

/// Load a `.bin` point cloud
pub fn load_velodyne_binary(path: &Path) -> Result<PointCloud> {
    ensure_input_file(path, BINARY_EXTENSION)?;
    let bytes = std::fs::read(path)?;
    let cloud = parse_velodyne_binary(&bytes)?;
    debug!(path = %path.display(), points = cloud.len(), "loaded binary point cloud");
    observability::record_binary_loaded(cloud.len());
    Ok(cloud)
}

/// Reshape raw `.bin` contents into a 4 × N cloud
pub fn parse_velodyne_binary(bytes: &[u8]) -> Result<PointCloud> {
    if bytes.len() % F32_BYTES != 0 {
        return Err(SensorError::shape(format!(
            "binary point cloud is {} bytes, not a whole number of f32 values",
            bytes.len()
        )));
    }
    let count = bytes.len() / F32_BYTES;
    if count % POINT_CHANNELS != 0 {
        return Err(SensorError::shape(format!(
            "binary point cloud holds {count} values, not divisible into {POINT_CHANNELS} channels"
        )));
    }

    let mut values = vec![0f32; count];
    LittleEndian::read_f32_into(bytes, &mut values);
    let data = Array2::from_shape_vec((POINT_CHANNELS, count / POINT_CHANNELS), values)
        .map_err(|e| SensorError::shape(e.to_string()))?;
    PointCloud::from_array(data)
}
