//! Velodyne HDL-32E data paths
//!
//! - `binary`: `.bin` point clouds
//! - `raw`: PNG-packed raw frames
//! - `convert`: polar samples to Cartesian points
//! - `codec`: byte packing shared by the raw frame reader and writer

mod binary;
pub mod codec;
mod convert;
mod raw;

pub use binary::{load_velodyne_binary, parse_velodyne_binary, BINARY_EXTENSION};
pub use codec::encode_raw_frame;
pub use convert::PolarConverter;
pub use raw::{load_velodyne_raw, RawFrameDecoder, RAW_EXTENSION};
