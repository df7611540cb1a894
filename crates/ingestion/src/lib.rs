//! # Ingestion
//!
//! Sensor file decoding.
//!
//! Responsibilities:
//! - Load `.bin` point clouds
//! - Decode PNG-packed raw lidar frames into ranges, angles, intensities and timestamps
//! - Convert polar samples to Cartesian points with a calibration
//! - Load road boundary images and masks
//!
//! ## Usage Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use ingestion::{PolarConverter, RawFrameDecoder};
//! use contracts::SensorCalibration;
//!
//! let calibration = Arc::new(SensorCalibration::hdl32e());
//! let scan = RawFrameDecoder::new(calibration.clone()).decode_path(path)?;
//! let cloud = PolarConverter::new(calibration).convert_scan(&scan)?;
//! println!("{} points", cloud.len());
//! ```

mod reader;
mod road_boundary;
pub mod velodyne;

// Re-exports
pub use contracts::{PointCloud, RawChannels, RawScan, Result, SensorCalibration, SensorError};
pub use reader::{reader_for_path, BinaryCloudReader, PointCloudReader, RawFrameReader};
pub use road_boundary::{load_road_boundary_image, load_road_boundary_mask, RoadBoundarySample};
pub use velodyne::{
    encode_raw_frame, load_velodyne_binary, load_velodyne_raw, parse_velodyne_binary,
    PolarConverter, RawFrameDecoder, BINARY_EXTENSION, RAW_EXTENSION,
};
