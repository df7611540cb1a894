//! Decoding metrics
//!
//! Thin wrappers over the `metrics` macros plus an in-memory running
//! statistics helper used for summaries.

use metrics::{counter, gauge, histogram};

/// Record one decoded raw frame
pub fn record_frame_decoded(columns: usize, rings: usize) {
    counter!("velodyne_raw_frames_decoded_total").increment(1);
    gauge!("velodyne_raw_frame_columns").set(columns as f64);
    gauge!("velodyne_raw_frame_rings").set(rings as f64);
}

/// Record a polar-to-cartesian conversion
pub fn record_points_converted(kept: usize, dropped: usize) {
    counter!("velodyne_points_converted_total").increment(kept as u64);
    counter!("velodyne_points_dropped_total").increment(dropped as u64);

    let total = kept + dropped;
    if total > 0 {
        histogram!("velodyne_valid_point_ratio").record(kept as f64 / total as f64);
    }
}

/// Record one loaded binary point cloud
pub fn record_binary_loaded(points: usize) {
    counter!("velodyne_binary_clouds_loaded_total").increment(1);
    histogram!("velodyne_binary_cloud_points").record(points as f64);
}

/// Summary of a [`RunningStats`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3}, max={:.3}, mean={:.3}, std={:.3} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// Online statistics (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// Add a value
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// Sample variance
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary::from(self)
    }
}

impl<T: Into<f64>> FromIterator<T> for RunningStats {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut stats = Self::default();
        for value in iter {
            stats.push(value.into());
        }
        stats
    }
}
