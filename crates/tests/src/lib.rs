//! # Integration Tests
//!
//! Cross-crate end-to-end scenarios:
//! - frame layout contract
//! - raw frame on disk -> decode -> convert -> export -> reload
//! - calibration files driving the frame layout

#[cfg(test)]
mod contract_tests {
    use contracts::{RawFrameLayout, SensorCalibration};

    #[test]
    fn test_hdl32e_layout_boundaries() {
        let layout = SensorCalibration::hdl32e().layout();
        assert_eq!(layout, RawFrameLayout::HDL32E);
        assert_eq!(layout.intensity_rows(), 0..32);
        assert_eq!(layout.range_rows(), 32..96);
        assert_eq!(layout.angle_rows(), 96..98);
        assert_eq!(layout.timestamp_start(), 98);
        assert_eq!(layout.min_height(), 106);
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::path::Path;
    use std::sync::Arc;

    use config_loader::ConfigLoader;
    use contracts::{RawChannels, RawFrameLayout, SensorCalibration, SensorError};
    use export::write_point_cloud;
    use ingestion::{
        encode_raw_frame, load_velodyne_binary, reader_for_path, PointCloudReader, PolarConverter,
        RawFrameDecoder, RawFrameReader,
    };
    use ndarray::{array, Array2};
    use rand::Rng;

    fn random_channels(rings: usize, columns: usize, timestamp_rows: usize) -> RawChannels {
        let mut rng = rand::rng();
        RawChannels {
            intensities: Array2::from_shape_fn((rings, columns), |_| rng.random()),
            ranges: Array2::from_shape_fn((rings, columns), |_| rng.random()),
            angles: Array2::from_shape_fn((1, columns), |_| rng.random_range(0..36000)),
            timestamps: Array2::from_shape_fn((timestamp_rows, columns), |_| rng.random()),
        }
    }

    fn save_frame(path: &Path, layout: RawFrameLayout, channels: &RawChannels) {
        encode_raw_frame(layout, channels).unwrap().save(path).unwrap();
    }

    /// Raw frame PNG -> RawFrameReader -> .bin -> binary loader
    #[test]
    fn test_e2e_raw_frame_to_binary_cloud() {
        let dir = tempfile::tempdir().unwrap();
        let frame_path = dir.path().join("000042.png");
        let cloud_path = dir.path().join("000042.bin");

        let channels = random_channels(32, 64, 1);
        save_frame(&frame_path, RawFrameLayout::HDL32E, &channels);

        let calibration = Arc::new(SensorCalibration::hdl32e());
        let reader = reader_for_path(&frame_path, calibration.clone()).unwrap();
        assert_eq!(reader.name(), "velodyne_raw");
        let cloud = reader.read(&frame_path).unwrap();

        let expected = channels
            .ranges
            .iter()
            .filter(|&&t| calibration.range_from_ticks(t) > calibration.minimum_range())
            .count();
        assert_eq!(cloud.len(), expected);

        write_point_cloud(&cloud_path, &cloud).unwrap();
        let reloaded = load_velodyne_binary(&cloud_path).unwrap();
        assert_eq!(reloaded, cloud);
    }

    /// The decoded scan reproduces the integer ticks written to disk
    #[test]
    fn test_e2e_raw_frame_ticks_survive_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let channels = random_channels(32, 17, 2);
        save_frame(&path, RawFrameLayout::HDL32E, &channels);

        let decoder = RawFrameDecoder::hdl32e();
        let decoded = decoder.read_channels(&path).unwrap();
        assert_eq!(decoded, channels);

        let scan = decoder.decode_path(&path).unwrap();
        assert_eq!(scan.approximate_timestamps.nrows(), 2);
        assert_eq!(
            scan.ranges[[3, 5]],
            decoder.calibration().range_from_ticks(channels.ranges[[3, 5]])
        );
    }

    /// A 4-ring calibration file shrinks the frame layout accordingly
    #[test]
    fn test_e2e_calibration_file_drives_layout() {
        let dir = tempfile::tempdir().unwrap();
        let calib_path = dir.path().join("four_ring.toml");
        std::fs::write(
            &calib_path,
            r#"
model = "four-ring"
range_resolution = 0.01
minimum_range = 0.5
base_to_fire_height = 0.0
elevations = [-0.2, 0.0, 0.1, 0.3]
"#,
        )
        .unwrap();
        let calibration = Arc::new(ConfigLoader::load_from_path(&calib_path).unwrap());
        let layout = calibration.layout();
        assert_eq!(layout.min_height(), 4 + 8 + 2 + 8);

        let channels = RawChannels {
            intensities: array![[1u8, 2], [3, 4], [5, 6], [7, 8]],
            ranges: array![[100u16, 0], [0, 200], [0, 0], [40, 0]],
            angles: array![[0u16, 9000]],
            timestamps: array![[10i64, 20]],
        };
        let frame_path = dir.path().join("frame.png");
        save_frame(&frame_path, layout, &channels);

        let reader = RawFrameReader::new(calibration.clone());
        let cloud = reader.read(&frame_path).unwrap();

        // ring 0 col 0 (1.0), ring 1 col 1 (2.0); ring 3 col 0 is 0.4 <= 0.5
        assert_eq!(cloud.len(), 2);
        let first = cloud.point(0).unwrap();
        assert!((first.z - (-0.2f64).sin() as f32).abs() < 1e-6);
        assert!((first.y + (-0.2f64).cos() as f32).abs() < 1e-6);
        assert_eq!(first.intensity, 1.0);
        let second = cloud.point(1).unwrap();
        assert!((second.x - 2.0).abs() < 1e-6);
        assert!(second.z.abs() < 1e-6);
        assert_eq!(second.intensity, 4.0);

        // the same frame is too short for the HDL-32E layout
        let err = RawFrameDecoder::hdl32e().decode_path(&frame_path).unwrap_err();
        assert!(matches!(err, SensorError::Shape { .. }));
    }

    #[test]
    fn test_e2e_short_frame_is_shape_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.png");
        image::GrayImage::new(8, 105).save(&path).unwrap();

        let err = RawFrameDecoder::hdl32e().decode_path(&path).unwrap_err();
        assert!(matches!(err, SensorError::Shape { .. }));
    }

    #[test]
    fn test_e2e_ply_export_from_raw_frame() {
        let dir = tempfile::tempdir().unwrap();
        let frame_path = dir.path().join("frame.png");
        let ply_path = dir.path().join("frame.ply");

        let mut ranges = Array2::<u16>::zeros((32, 4));
        ranges.row_mut(10).fill(2500);
        let channels = RawChannels {
            intensities: Array2::from_elem((32, 4), 9),
            ranges,
            angles: array![[0u16, 9000, 18000, 27000]],
            timestamps: array![[0i64, 1, 2, 3]],
        };
        save_frame(&frame_path, RawFrameLayout::HDL32E, &channels);

        let scan = RawFrameDecoder::hdl32e().decode_path(&frame_path).unwrap();
        let cloud = PolarConverter::hdl32e().convert_scan(&scan).unwrap();
        assert_eq!(cloud.len(), 4);
        write_point_cloud(&ply_path, &cloud).unwrap();

        let bytes = std::fs::read(&ply_path).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("element vertex 4\n"));
        let header_len = text.find("end_header\n").unwrap() + "end_header\n".len();
        assert_eq!(bytes.len() - header_len, 4 * 16);
    }

    #[test]
    fn test_e2e_binary_rejects_wrong_extension() {
        let err = load_velodyne_binary(Path::new("scan.png")).unwrap_err();
        assert!(matches!(err, SensorError::Format { .. }));
    }
}
