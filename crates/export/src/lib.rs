//! # Export
//!
//! Point cloud writers.
//!
//! - `.bin`: channel-major little-endian `f32`, readable by `ingestion::load_velodyne_binary`
//! - `.ply`: `binary_little_endian` PLY with interleaved `x y z intensity`

mod writers;

pub use writers::{write_point_cloud, BinWriter, PlyWriter, PointCloudFormat, PointCloudWriter};
