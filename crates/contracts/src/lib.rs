//! # Contracts
//!
//! Shared data model for the Velodyne / road-boundary toolkit.
//! Every other crate in the workspace depends on this one; it depends on none of them.
//!
//! ## Units
//! - Distances are in the sensor's native unit (metres for the HDL-32E)
//! - Angles are radians
//! - Timestamps are passed through as the raw `i64` the sensor recorded

mod calibration;
mod error;
mod layout;
mod point_cloud;
mod scan;

pub use calibration::*;
pub use error::*;
pub use layout::*;
pub use point_cloud::*;
pub use scan::*;
