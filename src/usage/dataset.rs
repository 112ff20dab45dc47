use super::metrics::{
    CommonScaleMetric, CpuMetric, DeviceUsage, FileSystemMetric, MemoryMetric, NetworkMetric,
    UsageMetric,
};
use crate::data_types::{ChartDataset, Ranges, Sample, SeriesPoint};
use crate::view_controller::{ViewController, WindowBounds};
use chrono::{DateTime, TimeZone, Utc};
use eyre::Result;
use std::sync::Arc;
use tracing::{debug, warn};

/// Window a fetch was issued for. Completing a load with a request whose
/// window no longer matches the dataset is a no-op.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FetchRequest {
    pub from: f64,
    pub to: f64,
}

impl FetchRequest {
    pub fn from_time(&self) -> Option<DateTime<Utc>> {
        seconds_to_utc(self.from)
    }

    pub fn to_time(&self) -> Option<DateTime<Utc>> {
        seconds_to_utc(self.to)
    }
}

pub(crate) fn seconds_to_utc(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    Utc.timestamp_opt(seconds.floor() as i64, 0).single()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    Failed,
    /// The window moved while the fetch was in flight; nothing changed.
    Stale,
}

/// One metric's series for a node: the current window, the extracted
/// points and their precomputed ranges, and load status.
#[derive(Clone, Debug)]
pub struct UsageData<M> {
    metric: M,
    from: f64,
    to: f64,
    bounds: WindowBounds,
    points: Arc<Vec<SeriesPoint>>,
    ranges: Arc<Ranges>,
    keys: Vec<String>,
    sorted: bool,
    pending: bool,
    error: Option<String>,
    revision: u64,
}

pub type CpuUsageData = UsageData<CpuMetric>;
pub type MemoryUsageData = UsageData<MemoryMetric>;
pub type NetworkUsageData = UsageData<NetworkMetric>;
pub type FileSystemUsageData = UsageData<FileSystemMetric>;
pub type CommonScaleData = UsageData<CommonScaleMetric>;

impl<M: UsageMetric> UsageData<M> {
    pub fn new(metric: M, bounds: WindowBounds) -> Self {
        Self {
            metric,
            from: bounds.instance_from,
            to: bounds.instance_to,
            bounds,
            points: Arc::new(Vec::new()),
            ranges: Arc::new(Ranges::default()),
            keys: Vec::new(),
            sorted: true,
            pending: false,
            error: None,
            revision: 0,
        }
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }

    pub fn window(&self) -> (f64, f64) {
        (self.from, self.to)
    }

    pub fn from(&self) -> f64 {
        self.from
    }

    pub fn to(&self) -> f64 {
        self.to
    }

    pub fn bounds(&self) -> WindowBounds {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: WindowBounds) {
        self.bounds = bounds;
    }

    /// Sets the window verbatim. Callers fit it into the bounds first.
    pub fn set_window(&mut self, from: f64, to: f64) {
        self.from = from;
        self.to = to;
    }

    pub fn correct_date_to_fix_range(&self, value: f64) -> f64 {
        ViewController::correct_date_to_fix_range(value, &self.bounds)
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn ranges(&self) -> &Ranges {
        &self.ranges
    }

    /// Dynamic interface/device names of the last batch.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn pending(&self) -> bool {
        self.pending
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Marks the dataset as loading and returns the window to fetch.
    pub fn begin_load(&mut self) -> FetchRequest {
        self.pending = true;
        FetchRequest {
            from: self.from,
            to: self.to,
        }
    }

    /// Clears the loading flag without touching points or error.
    pub fn cancel_load(&mut self) {
        self.pending = false;
    }

    /// Applies a finished fetch, unless the window moved since
    /// [`begin_load`](Self::begin_load). Failures keep the previous points.
    pub fn finish_load(
        &mut self,
        request: FetchRequest,
        result: Result<Vec<Sample>>,
        now: f64,
    ) -> LoadOutcome {
        if request.from != self.from || request.to != self.to {
            debug!(
                metric = self.metric.name(),
                requested_from = request.from,
                requested_to = request.to,
                from = self.from,
                to = self.to,
                "discarding stale usage response"
            );
            return LoadOutcome::Stale;
        }
        self.pending = false;
        match result {
            Ok(samples) => {
                self.error = None;
                self.process_values(&samples);
                self.update_range(now);
                LoadOutcome::Applied
            }
            Err(err) => {
                warn!(metric = self.metric.name(), error = %err, "usage fetch failed");
                self.error = Some(format!("{err:#}"));
                LoadOutcome::Failed
            }
        }
    }

    /// Applies a batch fetched on behalf of this dataset by its parent.
    pub fn apply_batch(&mut self, samples: &[Sample], now: f64) {
        self.pending = false;
        self.error = None;
        self.process_values(samples);
        self.update_range(now);
    }

    /// Rebuilds points and ranges from a batch. Input order does not matter;
    /// points are kept sorted by time.
    pub fn process_values(&mut self, samples: &[Sample]) {
        let mut ordered = samples.to_vec();
        ordered.sort_by_key(|s| s.timestamp);

        self.keys = self.metric.discover_keys(&ordered);
        let points: Vec<SeriesPoint> = ordered
            .iter()
            .map(|s| self.metric.extract(s, &self.keys))
            .collect();

        self.ranges = Arc::new(Ranges::from_points(&points));
        self.sorted = true;
        self.points = Arc::new(points);
        self.revision += 1;
        debug!(
            metric = self.metric.name(),
            points = self.points.len(),
            keys = self.keys.len(),
            revision = self.revision,
            "usage dataset replaced"
        );
    }

    /// Advances the upper bound to `now`.
    pub fn update_range(&mut self, now: f64) {
        if now.is_finite() && now > self.bounds.instance_to {
            self.bounds.instance_to = now;
        }
    }

    pub fn snapshot(&self) -> ChartDataset {
        ChartDataset {
            points: Arc::clone(&self.points),
            ranges: Arc::clone(&self.ranges),
            sorted: self.sorted,
            revision: self.revision,
        }
    }
}

impl UsageData<FileSystemMetric> {
    /// Utilization per device from the latest sample.
    pub fn devices(&self) -> Vec<DeviceUsage> {
        let Some(last) = self.points.last() else {
            return Vec::new();
        };
        self.keys
            .iter()
            .map(|key| DeviceUsage {
                name: key.clone(),
                used: last.value(&FileSystemMetric::used_key(key)),
                capacity: last.value(&FileSystemMetric::capacity_key(key)),
                percent: last.value(&FileSystemMetric::percent_key(key)),
            })
            .collect()
    }
}
