//! The chart set of one node: a common time window shared by the CPU,
//! memory and network charts, plus the filesystem snapshot.

use super::dataset::{
    CommonScaleData, CpuUsageData, FetchRequest, FileSystemUsageData, LoadOutcome,
    MemoryUsageData, NetworkUsageData, UsageData,
};
use super::metrics::{
    CommonScaleMetric, CpuMetric, DeviceUsage, FileSystemMetric, MemoryMetric, MetricKind,
    NetworkMetric, UsageMetric,
};
use super::source::Clock;
use crate::config::ChartConfig;
use crate::data_types::{ChartDataset, NodeInfo, Sample};
use crate::utils::date_formatter::to_seconds;
use crate::view_controller::{ViewController, WindowBounds};
use eyre::Result;
use std::sync::Arc;
use tracing::debug;

/// Change notification emitted by [`ChartsData`] mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum ChartsEvent {
    WindowChanged { from: f64, to: f64, preview: bool },
    DataUpdated { revision: u64 },
    LoadFailed { kind: Option<MetricKind>, message: String },
}

/// Consistent read-only view of every dataset at one instant.
#[derive(Clone, Debug)]
pub struct ChartsSnapshot {
    pub from: f64,
    pub to: f64,
    pub bounds: WindowBounds,
    pub follow_common_range: bool,
    pub common: ChartDataset,
    pub cpu: ChartDataset,
    pub memory: ChartDataset,
    pub network: ChartDataset,
    pub filesystem: ChartDataset,
    pub windows: [(f64, f64); 4],
    pub network_keys: Vec<String>,
    pub devices: Vec<DeviceUsage>,
    pub pending: bool,
    pub error: Option<String>,
}

impl ChartsSnapshot {
    pub fn dataset(&self, kind: MetricKind) -> &ChartDataset {
        match kind {
            MetricKind::Cpu => &self.cpu,
            MetricKind::Memory => &self.memory,
            MetricKind::Network => &self.network,
            MetricKind::FileSystem => &self.filesystem,
        }
    }

    /// Visible window of a chart.
    pub fn window(&self, kind: MetricKind) -> (f64, f64) {
        self.windows[kind_index(kind)]
    }
}

fn kind_index(kind: MetricKind) -> usize {
    match kind {
        MetricKind::Cpu => 0,
        MetricKind::Memory => 1,
        MetricKind::Network => 2,
        MetricKind::FileSystem => 3,
    }
}

pub struct ChartsData {
    config: ChartConfig,
    clock: Arc<dyn Clock>,
    common: CommonScaleData,
    follow_common_range: bool,
    /// The common window tracks "now" on refresh.
    pinned_to_now: bool,
    pub cpu: CpuUsageData,
    pub memory: MemoryUsageData,
    pub network: NetworkUsageData,
    pub filesystem: FileSystemUsageData,
}

impl ChartsData {
    /// Until [`initialize`](Self::initialize) runs, the bounds are the
    /// default window ending now.
    pub fn new(config: ChartConfig, clock: Arc<dyn Clock>) -> Self {
        let now = clock.now_seconds();
        let bounds = WindowBounds::new(now - config.default_window_secs, now, config.min_span_secs);
        let mut data = Self {
            follow_common_range: config.follow_common_range,
            pinned_to_now: true,
            common: UsageData::new(CommonScaleMetric, bounds),
            cpu: UsageData::new(CpuMetric, bounds),
            memory: UsageData::new(MemoryMetric, bounds),
            network: UsageData::new(NetworkMetric, bounds),
            filesystem: UsageData::new(FileSystemMetric, bounds),
            config,
            clock,
        };
        data.cascade_window(true);
        data
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn bounds(&self) -> WindowBounds {
        self.common.bounds()
    }

    /// The common window.
    pub fn window(&self) -> (f64, f64) {
        self.common.window()
    }

    pub fn common(&self) -> &CommonScaleData {
        &self.common
    }

    pub fn pending(&self) -> bool {
        self.common.pending()
    }

    pub fn error(&self) -> Option<&str> {
        self.common.error()
    }

    pub fn follow_common_range(&self) -> bool {
        self.follow_common_range
    }

    pub fn pinned_to_now(&self) -> bool {
        self.pinned_to_now
    }

    /// Seeds the bounds from the node's creation time and "now" and opens
    /// the default window ending now.
    pub fn initialize(&mut self, node: &NodeInfo) -> Vec<ChartsEvent> {
        let now = self.clock.now_seconds();
        let created = to_seconds(&node.creation_timestamp).min(now);
        let bounds = WindowBounds::new(created, now, self.config.min_span_secs);
        self.set_bounds(bounds);
        let (from, to) = ViewController::default_window(&bounds, self.config.default_window_secs);
        debug!(node = %node.name, from, to, "chart bounds initialized");
        self.apply_window(from, to, false)
    }

    /// Commits or previews a new common window.
    ///
    /// The request is fitted into the bounds first; with `load_data` the
    /// common dataset is marked pending and the fetch to issue is returned.
    pub fn set_new_range(
        &mut self,
        start: f64,
        end: f64,
        load_data: bool,
    ) -> (Option<FetchRequest>, Vec<ChartsEvent>) {
        let (from, to) = ViewController::correct_range(start, end, &self.bounds());
        let events = self.apply_window(from, to, !load_data);
        let request = load_data.then(|| self.begin_load());
        (request, events)
    }

    /// Back to the default window ending at the latest instant.
    pub fn reset_range(&mut self) -> (Option<FetchRequest>, Vec<ChartsEvent>) {
        let bounds = self.bounds();
        let (from, to) = ViewController::default_window(&bounds, self.config.default_window_secs);
        self.set_new_range(from, to, true)
    }

    pub fn set_follow_common_range(&mut self, follow: bool) -> Vec<ChartsEvent> {
        if self.follow_common_range == follow {
            return Vec::new();
        }
        self.follow_common_range = follow;
        if follow {
            self.cascade_window(false);
            let (from, to) = self.window();
            return vec![ChartsEvent::WindowChanged {
                from,
                to,
                preview: false,
            }];
        }
        // Detached charts no longer take the in-flight shared batch.
        self.cpu.cancel_load();
        self.memory.cancel_load();
        self.network.cancel_load();
        Vec::new()
    }

    /// Marks the common dataset, and everything fed from its batch, as
    /// loading. Returns the window to fetch.
    pub fn begin_load(&mut self) -> FetchRequest {
        if self.follow_common_range {
            self.cpu.begin_load();
            self.memory.begin_load();
            self.network.begin_load();
        }
        self.filesystem.begin_load();
        self.common.begin_load()
    }

    /// Completes a common fetch. A stale response changes nothing; a failure
    /// keeps all previous points.
    pub fn finish_load(
        &mut self,
        request: FetchRequest,
        result: Result<Vec<Sample>>,
    ) -> (LoadOutcome, Vec<ChartsEvent>) {
        let now = self.clock.now_seconds();
        let samples = match result {
            Ok(samples) => samples,
            Err(err) => {
                let outcome = self.common.finish_load(request, Err(err), now);
                if outcome != LoadOutcome::Failed {
                    return (outcome, Vec::new());
                }
                let message = self.common.error().unwrap_or_default().to_string();
                self.fail_followers(&message);
                return (
                    outcome,
                    vec![ChartsEvent::LoadFailed {
                        kind: None,
                        message,
                    }],
                );
            }
        };

        let outcome = self.common.finish_load(request, Ok(samples.clone()), now);
        if outcome != LoadOutcome::Applied {
            return (outcome, Vec::new());
        }

        self.set_bounds(self.common.bounds());
        if self.follow_common_range {
            self.cascade_window(false);
            self.cpu.apply_batch(&samples, now);
            self.memory.apply_batch(&samples, now);
            self.network.apply_batch(&samples, now);
        }
        self.filesystem.apply_batch(&samples, now);
        self.cascade_window(true);

        (
            outcome,
            vec![ChartsEvent::DataUpdated {
                revision: self.common.revision(),
            }],
        )
    }

    /// Moves one dependent chart on its own. Only meaningful when the
    /// common range is not followed.
    pub fn set_dependent_range(
        &mut self,
        kind: MetricKind,
        start: f64,
        end: f64,
    ) -> Option<FetchRequest> {
        if self.follow_common_range || kind == MetricKind::FileSystem {
            return None;
        }
        let (from, to) = ViewController::correct_range(start, end, &self.bounds());
        match kind {
            MetricKind::Cpu => Some(window_and_begin(&mut self.cpu, from, to)),
            MetricKind::Memory => Some(window_and_begin(&mut self.memory, from, to)),
            MetricKind::Network => Some(window_and_begin(&mut self.network, from, to)),
            MetricKind::FileSystem => None,
        }
    }

    pub fn begin_dependent_load(&mut self, kind: MetricKind) -> FetchRequest {
        match kind {
            MetricKind::Cpu => self.cpu.begin_load(),
            MetricKind::Memory => self.memory.begin_load(),
            MetricKind::Network => self.network.begin_load(),
            MetricKind::FileSystem => self.filesystem.begin_load(),
        }
    }

    /// Completes a fetch issued for a single dataset.
    pub fn finish_dependent_load(
        &mut self,
        kind: MetricKind,
        request: FetchRequest,
        result: Result<Vec<Sample>>,
    ) -> (LoadOutcome, Vec<ChartsEvent>) {
        let now = self.clock.now_seconds();
        let (outcome, revision, error) = match kind {
            MetricKind::Cpu => finish(&mut self.cpu, request, result, now),
            MetricKind::Memory => finish(&mut self.memory, request, result, now),
            MetricKind::Network => finish(&mut self.network, request, result, now),
            MetricKind::FileSystem => finish(&mut self.filesystem, request, result, now),
        };
        let events = match outcome {
            LoadOutcome::Applied => vec![ChartsEvent::DataUpdated { revision }],
            LoadOutcome::Failed => vec![ChartsEvent::LoadFailed {
                kind: Some(kind),
                message: error.unwrap_or_default(),
            }],
            LoadOutcome::Stale => Vec::new(),
        };
        (outcome, events)
    }

    /// Advances "now". A window pinned to "now" slides along with it; the
    /// returned request reloads it.
    pub fn refresh_now(&mut self) -> (Option<FetchRequest>, Vec<ChartsEvent>) {
        let now = self.clock.now_seconds();
        let mut bounds = self.bounds();
        if now > bounds.instance_to {
            bounds.instance_to = now;
            self.set_bounds(bounds);
        }

        let (from, to) = self.window();
        if !self.pinned_to_now || to >= bounds.instance_to {
            self.cascade_window(true);
            return (None, Vec::new());
        }
        let (new_from, new_to) = ViewController::follow_now(from, to, true, &bounds);
        let events = self.apply_window(new_from, new_to, false);
        (Some(self.begin_load()), events)
    }

    pub fn snapshot(&self) -> ChartsSnapshot {
        let (from, to) = self.window();
        ChartsSnapshot {
            from,
            to,
            bounds: self.bounds(),
            follow_common_range: self.follow_common_range,
            common: self.common.snapshot(),
            cpu: self.cpu.snapshot(),
            memory: self.memory.snapshot(),
            network: self.network.snapshot(),
            filesystem: self.filesystem.snapshot(),
            windows: [
                self.cpu.window(),
                self.memory.window(),
                self.network.window(),
                self.filesystem.window(),
            ],
            network_keys: self.network.keys().to_vec(),
            devices: self.filesystem.devices(),
            pending: self.common.pending(),
            error: self.common.error().map(str::to_string),
        }
    }

    fn set_bounds(&mut self, bounds: WindowBounds) {
        self.common.set_bounds(bounds);
        self.cpu.set_bounds(bounds);
        self.memory.set_bounds(bounds);
        self.network.set_bounds(bounds);
        self.filesystem.set_bounds(bounds);
    }

    fn apply_window(&mut self, from: f64, to: f64, preview: bool) -> Vec<ChartsEvent> {
        self.common.set_window(from, to);
        self.pinned_to_now = to >= self.bounds().instance_to;
        self.cascade_window(false);
        debug!(from, to, preview, "common window changed");
        vec![ChartsEvent::WindowChanged { from, to, preview }]
    }

    /// Pushes the common window into the followers, clamped into the
    /// bounds. The filesystem chart always spans the whole lifetime.
    fn cascade_window(&mut self, filesystem_only: bool) {
        let bounds = self.bounds();
        self.filesystem
            .set_window(bounds.instance_from, bounds.instance_to);
        if filesystem_only || !self.follow_common_range {
            return;
        }
        let (from, to) = self.window();
        follow(&mut self.cpu, from, to);
        follow(&mut self.memory, from, to);
        follow(&mut self.network, from, to);
    }

    fn fail_followers(&mut self, message: &str) {
        let now = self.clock.now_seconds();
        if self.follow_common_range {
            fail(&mut self.cpu, message, now);
            fail(&mut self.memory, message, now);
            fail(&mut self.network, message, now);
        }
        fail(&mut self.filesystem, message, now);
    }
}

fn follow<M: UsageMetric>(data: &mut UsageData<M>, from: f64, to: f64) {
    let from = data.correct_date_to_fix_range(from);
    let to = data.correct_date_to_fix_range(to);
    data.set_window(from, to);
}

fn window_and_begin<M: UsageMetric>(data: &mut UsageData<M>, from: f64, to: f64) -> FetchRequest {
    data.set_window(from, to);
    data.begin_load()
}

fn finish<M: UsageMetric>(
    data: &mut UsageData<M>,
    request: FetchRequest,
    result: Result<Vec<Sample>>,
    now: f64,
) -> (LoadOutcome, u64, Option<String>) {
    let outcome = data.finish_load(request, result, now);
    (outcome, data.revision(), data.error().map(str::to_string))
}

/// Records a failure of the shared batch on a follower, keeping its points.
fn fail<M: UsageMetric>(data: &mut UsageData<M>, message: &str, now: f64) {
    let request = FetchRequest {
        from: data.from(),
        to: data.to(),
    };
    data.finish_load(request, Err(eyre::eyre!("{message}")), now);
}
