//! Per-metric extraction of chart points from raw samples.

use crate::data_types::{Sample, SeriesPoint, ValueKey};
use serde::{Deserialize, Serialize};

const MIB: f64 = 1024.0 * 1024.0;

/// Which dataset of a chart set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricKind {
    Cpu,
    Memory,
    Network,
    FileSystem,
}

impl MetricKind {
    pub const ALL: [MetricKind; 4] = [
        MetricKind::Cpu,
        MetricKind::Memory,
        MetricKind::Network,
        MetricKind::FileSystem,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Cpu => "CPU",
            Self::Memory => "Memory",
            Self::Network => "Network",
            Self::FileSystem => "File system",
        }
    }
}

/// Turns samples into points. Metrics with per-interface or per-device
/// breakdowns discover their key set once per batch.
pub trait UsageMetric: Send + Sync {
    fn name(&self) -> &'static str;

    fn discover_keys(&self, _samples: &[Sample]) -> Vec<String> {
        Vec::new()
    }

    /// Missing inputs produce `None` values (gaps), never errors.
    fn extract(&self, sample: &Sample, keys: &[String]) -> SeriesPoint;
}

/// Only the timestamps; used to align hover across sibling charts.
#[derive(Clone, Copy, Debug, Default)]
pub struct CommonScaleMetric;

impl UsageMetric for CommonScaleMetric {
    fn name(&self) -> &'static str {
        "common"
    }

    fn extract(&self, sample: &Sample, _keys: &[String]) -> SeriesPoint {
        SeriesPoint::new(sample.unix_seconds(), None)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CpuMetric;

impl UsageMetric for CpuMetric {
    fn name(&self) -> &'static str {
        "cpu"
    }

    fn extract(&self, sample: &Sample, _keys: &[String]) -> SeriesPoint {
        SeriesPoint::new(sample.unix_seconds(), sample.cpu_load)
    }
}

/// `y` is MiB in use, `percent` is usage over capacity.
#[derive(Clone, Copy, Debug, Default)]
pub struct MemoryMetric;

impl UsageMetric for MemoryMetric {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn extract(&self, sample: &Sample, _keys: &[String]) -> SeriesPoint {
        let usage = sample.memory_usage;
        let percent = match (usage, sample.memory_capacity) {
            (Some(u), Some(c)) if c > 0.0 => Some(u / c * 100.0),
            _ => None,
        };
        SeriesPoint::new(sample.unix_seconds(), usage.map(|u| u / MIB)).with_percent(percent)
    }
}

/// Per-interface `rx`/`tx` fields; `y` is the total across interfaces.
#[derive(Clone, Copy, Debug, Default)]
pub struct NetworkMetric;

impl NetworkMetric {
    pub fn rx_key(interface: &str) -> ValueKey {
        ValueKey::field(format!("{interface}.rx"))
    }

    pub fn tx_key(interface: &str) -> ValueKey {
        ValueKey::field(format!("{interface}.tx"))
    }
}

impl UsageMetric for NetworkMetric {
    fn name(&self) -> &'static str {
        "network"
    }

    fn discover_keys(&self, samples: &[Sample]) -> Vec<String> {
        first_keys(samples, |s| {
            s.network_stats_by_interface
                .as_ref()
                .map(|m| m.keys().cloned().collect())
        })
    }

    fn extract(&self, sample: &Sample, keys: &[String]) -> SeriesPoint {
        let mut point = SeriesPoint::new(sample.unix_seconds(), None);
        let mut total: Option<f64> = None;
        for key in keys {
            let stats = sample
                .network_stats_by_interface
                .as_ref()
                .and_then(|m| m.get(key));
            let rx = stats.and_then(|s| s.rx_bytes);
            let tx = stats.and_then(|s| s.tx_bytes);
            for v in [rx, tx].into_iter().flatten() {
                *total.get_or_insert(0.0) += v;
            }
            point = point
                .with_field(format!("{key}.rx"), rx)
                .with_field(format!("{key}.tx"), tx);
        }
        point.y = total;
        point
    }
}

/// Per-device used bytes, capacity and percent; `y`/`percent` are totals.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileSystemMetric;

impl FileSystemMetric {
    pub fn used_key(device: &str) -> ValueKey {
        ValueKey::field(device.to_string())
    }

    pub fn capacity_key(device: &str) -> ValueKey {
        ValueKey::field(format!("{device}.capacity"))
    }

    pub fn percent_key(device: &str) -> ValueKey {
        ValueKey::field(format!("{device}.percent"))
    }
}

impl UsageMetric for FileSystemMetric {
    fn name(&self) -> &'static str {
        "filesystem"
    }

    fn discover_keys(&self, samples: &[Sample]) -> Vec<String> {
        first_keys(samples, |s| {
            s.disk_stats_by_device
                .as_ref()
                .map(|m| m.keys().cloned().collect())
        })
    }

    fn extract(&self, sample: &Sample, keys: &[String]) -> SeriesPoint {
        let mut point = SeriesPoint::new(sample.unix_seconds(), None);
        let mut used_total: Option<f64> = None;
        let mut capacity_total: Option<f64> = None;
        for key in keys {
            let stats = sample.disk_stats_by_device.as_ref().and_then(|m| m.get(key));
            let used = stats.and_then(|s| s.used());
            let capacity = stats.and_then(|s| s.capacity);
            let percent = match (used, capacity) {
                (Some(u), Some(c)) if c > 0.0 => Some(u / c * 100.0),
                _ => None,
            };
            if let (Some(u), Some(c)) = (used, capacity) {
                *used_total.get_or_insert(0.0) += u;
                *capacity_total.get_or_insert(0.0) += c;
            }
            point = point
                .with_field(key.clone(), used)
                .with_field(format!("{key}.capacity"), capacity)
                .with_field(format!("{key}.percent"), percent);
        }
        point.y = used_total;
        point.percent = match (used_total, capacity_total) {
            (Some(u), Some(c)) if c > 0.0 => Some(u / c * 100.0),
            _ => None,
        };
        point
    }
}

/// Current utilization of one device.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeviceUsage {
    pub name: String,
    pub used: Option<f64>,
    pub capacity: Option<f64>,
    pub percent: Option<f64>,
}

/// Key set of the first sample that carries one. Later samples are assumed
/// to share it; keys they lack become gaps.
fn first_keys(samples: &[Sample], keys_of: impl Fn(&Sample) -> Option<Vec<String>>) -> Vec<String> {
    samples
        .iter()
        .find_map(|s| keys_of(s).filter(|k| !k.is_empty()))
        .unwrap_or_default()
}
