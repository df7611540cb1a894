//! `info` command implementation.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use contracts::{PointCloud, RawScan, SensorCalibration, SensorError};
use ingestion::{
    load_velodyne_binary, PolarConverter, RawFrameDecoder, BINARY_EXTENSION, RAW_EXTENSION,
};
use observability::{RunningStats, StatsSummary};
use serde::Serialize;
use tracing::info;

use super::load_calibration;
use crate::cli::InfoArgs;

/// File info for JSON output
#[derive(Serialize, Debug)]
pub(crate) struct FileInfo {
    path: String,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    frame: Option<FrameInfo>,
    points: PointsInfo,
}

#[derive(Serialize, Debug)]
pub(crate) struct FrameInfo {
    model: String,
    rings: usize,
    columns: usize,
    timestamp_rows: usize,
    samples: usize,
    dropped: usize,
    minimum_range: f64,
    range: StatsInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp_span: Option<[i64; 2]>,
}

#[derive(Serialize, Debug)]
pub(crate) struct PointsInfo {
    count: usize,
    x: StatsInfo,
    y: StatsInfo,
    z: StatsInfo,
    intensity: StatsInfo,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub(crate) struct StatsInfo {
    count: u64,
    min: f64,
    max: f64,
    mean: f64,
    std_dev: f64,
}

impl From<StatsSummary> for StatsInfo {
    fn from(s: StatsSummary) -> Self {
        Self {
            count: s.count,
            min: s.min,
            max: s.max,
            mean: s.mean,
            std_dev: s.std_dev,
        }
    }
}

impl std::fmt::Display for StatsInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let summary = StatsSummary {
            count: self.count,
            min: self.min,
            max: self.max,
            mean: self.mean,
            std_dev: self.std_dev,
        };
        std::fmt::Display::fmt(&summary, f)
    }
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(path = %args.path.display(), "Inspecting file");

    let calibration = load_calibration(args.calibration.as_ref())?;
    let info = build_file_info(&args.path, &calibration)
        .with_context(|| format!("Failed to inspect {}", args.path.display()))?;

    if args.json {
        let json = serde_json::to_string_pretty(&info).context("Failed to serialize file info")?;
        println!("{}", json);
    } else {
        print_file_info(&info);
    }

    Ok(())
}

pub(crate) fn build_file_info(
    path: &Path,
    calibration: &Arc<SensorCalibration>,
) -> Result<FileInfo> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();

    let (kind, frame, cloud) = match ext {
        RAW_EXTENSION => {
            let scan = RawFrameDecoder::new(calibration.clone()).decode_path(path)?;
            let cloud = PolarConverter::new(calibration.clone()).convert_scan(&scan)?;
            let frame = frame_info(&scan, &cloud, calibration);
            ("raw_frame", Some(frame), cloud)
        }
        BINARY_EXTENSION => ("point_cloud", None, load_velodyne_binary(path)?),
        other => {
            return Err(SensorError::format_any(&[BINARY_EXTENSION, RAW_EXTENSION], other).into())
        }
    };

    Ok(FileInfo {
        path: path.display().to_string(),
        kind,
        frame,
        points: points_info(&cloud),
    })
}

fn frame_info(scan: &RawScan, cloud: &PointCloud, calibration: &SensorCalibration) -> FrameInfo {
    let range: RunningStats = scan.ranges.iter().copied().collect();
    FrameInfo {
        model: calibration.model().to_string(),
        rings: scan.rings(),
        columns: scan.columns(),
        timestamp_rows: scan.approximate_timestamps.nrows(),
        samples: scan.sample_count(),
        dropped: scan.sample_count() - cloud.len(),
        minimum_range: calibration.minimum_range(),
        range: range.summary().into(),
        timestamp_span: scan.timestamp_span().map(|(lo, hi)| [lo, hi]),
    }
}

fn points_info(cloud: &PointCloud) -> PointsInfo {
    let stats = |values: ndarray::ArrayView1<'_, f32>| -> StatsInfo {
        values.iter().copied().collect::<RunningStats>().summary().into()
    };
    PointsInfo {
        count: cloud.len(),
        x: stats(cloud.x()),
        y: stats(cloud.y()),
        z: stats(cloud.z()),
        intensity: stats(cloud.intensity()),
    }
}

fn print_file_info(info: &FileInfo) {
    println!("{} ({})", info.path, info.kind);

    if let Some(ref frame) = info.frame {
        println!("\n  Frame");
        println!("   ├─ Model: {}", frame.model);
        println!("   ├─ Rings × Columns: {} × {}", frame.rings, frame.columns);
        println!("   ├─ Timestamp rows: {}", frame.timestamp_rows);
        println!(
            "   ├─ Samples: {} ({} at or below {} dropped)",
            frame.samples, frame.dropped, frame.minimum_range
        );
        println!("   ├─ Range: {}", frame.range);
        match frame.timestamp_span {
            Some([lo, hi]) => println!("   └─ Timestamps: {} .. {}", lo, hi),
            None => println!("   └─ Timestamps: N/A"),
        }
    }

    let points = &info.points;
    println!("\n  Points ({})", points.count);
    println!("   ├─ x: {}", points.x);
    println!("   ├─ y: {}", points.y);
    println!("   ├─ z: {}", points.z);
    println!("   └─ intensity: {}", points.intensity);
    println!();
}
