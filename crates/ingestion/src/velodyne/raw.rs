//! Raw frame decoder
//!
//! Loads a `.png` raw frame and produces scaled ranges, angles,
//! intensities and approximate timestamps.

use std::path::Path;
use std::sync::Arc;

use contracts::{
    angle_from_ticks, ensure_input_file, RawChannels, RawScan, Result, SensorCalibration,
    SensorError,
};
use image::GrayImage;
use tracing::{debug, instrument};

use super::codec::{decode_channels, frame_view};

/// Extension of raw frame files
pub const RAW_EXTENSION: &str = "png";

/// Decoder for PNG-packed raw lidar frames
///
/// The calibration decides the ring count (and so the row layout) and the
/// range resolution.
#[derive(Debug, Clone)]
pub struct RawFrameDecoder {
    calibration: Arc<SensorCalibration>,
}

impl RawFrameDecoder {
    pub fn new(calibration: Arc<SensorCalibration>) -> Self {
        Self { calibration }
    }

    /// Decoder for the HDL-32E factory calibration
    pub fn hdl32e() -> Self {
        Self::new(Arc::new(SensorCalibration::hdl32e()))
    }

    pub fn calibration(&self) -> &SensorCalibration {
        &self.calibration
    }

    /// Load and decode a raw frame file
    #[instrument(name = "raw_frame_decode", skip(self, path), fields(path = %path.display()))]
    pub fn decode_path(&self, path: &Path) -> Result<RawScan> {
        let channels = self.read_channels(path)?;
        Ok(self.scale(channels))
    }

    /// Load a raw frame file and unpack its integer channels without scaling
    pub fn read_channels(&self, path: &Path) -> Result<RawChannels> {
        ensure_input_file(path, RAW_EXTENSION)?;
        let image = image::open(path)
            .map_err(|e| SensorError::decode(path, e))?
            .into_luma8();
        self.decode_channels(&image)
    }

    /// Decode an already loaded grayscale frame
    pub fn decode_image(&self, image: &GrayImage) -> Result<RawScan> {
        let channels = self.decode_channels(image)?;
        Ok(self.scale(channels))
    }

    /// Unpack integer channels from a grayscale frame
    pub fn decode_channels(&self, image: &GrayImage) -> Result<RawChannels> {
        let channels = decode_channels(self.calibration.layout(), frame_view(image)?)?;
        debug!(
            rings = channels.rings(),
            columns = channels.columns(),
            timestamp_rows = channels.timestamps.nrows(),
            "decoded raw frame"
        );
        observability::record_frame_decoded(channels.columns(), channels.rings());
        Ok(channels)
    }

    /// Convert raw ticks to physical units
    pub fn scale(&self, channels: RawChannels) -> RawScan {
        let calibration = &self.calibration;
        RawScan {
            ranges: channels.ranges.mapv(|t| calibration.range_from_ticks(t)),
            intensities: channels.intensities,
            angles: channels.angles.mapv(angle_from_ticks),
            approximate_timestamps: channels.timestamps,
        }
    }
}

impl Default for RawFrameDecoder {
    fn default() -> Self {
        Self::hdl32e()
    }
}

/// Decode a raw frame with the HDL-32E calibration
pub fn load_velodyne_raw(path: &Path) -> Result<RawScan> {
    RawFrameDecoder::hdl32e().decode_path(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::velodyne::codec::encode_raw_frame;
    use contracts::RawFrameLayout;
    use ndarray::Array2;
    use std::f64::consts::FRAC_PI_2;

    fn frame(cols: usize) -> RawChannels {
        RawChannels {
            intensities: Array2::from_elem((32, cols), 42),
            ranges: Array2::from_elem((32, cols), 500),
            angles: Array2::from_elem((1, cols), 9000),
            timestamps: Array2::from_elem((1, cols), 1_547_131_046_353_776),
        }
    }

    #[test]
    fn test_scaling_of_known_ticks() {
        let image = encode_raw_frame(RawFrameLayout::HDL32E, &frame(4)).unwrap();
        let scan = RawFrameDecoder::hdl32e().decode_image(&image).unwrap();

        assert_eq!(scan.ranges.dim(), (32, 4));
        assert_eq!(scan.angles.dim(), (1, 4));
        assert_eq!(scan.approximate_timestamps.dim(), (1, 4));
        assert!(scan.ranges.iter().all(|r| (r - 1.0).abs() < 1e-12));
        assert!(scan.angles.iter().all(|a| (a - FRAC_PI_2).abs() < 1e-12));
        assert!(scan.intensities.iter().all(|&i| i == 42));
        assert!(scan
            .approximate_timestamps
            .iter()
            .all(|&t| t == 1_547_131_046_353_776));
    }

    #[test]
    fn test_custom_resolution() {
        let calibration = SensorCalibration::new(contracts::CalibrationProfile {
            range_resolution: 0.004,
            ..Default::default()
        });
        let decoder = RawFrameDecoder::new(Arc::new(calibration));
        let image = encode_raw_frame(RawFrameLayout::HDL32E, &frame(2)).unwrap();
        let scan = decoder.decode_image(&image).unwrap();
        assert!((scan.ranges[[0, 0]] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_decode_path_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1547131046353776.png");
        encode_raw_frame(RawFrameLayout::HDL32E, &frame(8))
            .unwrap()
            .save(&path)
            .unwrap();

        let scan = load_velodyne_raw(&path).unwrap();
        assert_eq!(scan.columns(), 8);
        assert_eq!(scan.rings(), 32);
    }

    #[test]
    fn test_wrong_extension() {
        let err = load_velodyne_raw(Path::new("frame.bin")).unwrap_err();
        assert!(matches!(err, SensorError::Format { .. }), "got: {err}");
    }

    #[test]
    fn test_missing_file() {
        let err = load_velodyne_raw(Path::new("/no/such/frame.png")).unwrap_err();
        assert!(matches!(err, SensorError::NotFound { .. }), "got: {err}");
    }

    #[test]
    fn test_corrupt_png_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"\x89PNG not really").unwrap();
        let err = load_velodyne_raw(&path).unwrap_err();
        assert!(matches!(err, SensorError::Decode { .. }), "got: {err}");
    }

    #[test]
    fn test_short_frame_is_shape_error() {
        let image = GrayImage::new(10, 105);
        let err = RawFrameDecoder::hdl32e().decode_image(&image).unwrap_err();
        assert!(matches!(err, SensorError::Shape { .. }), "got: {err}");
    }
}
