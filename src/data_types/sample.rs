use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-interface network counters for one sample.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStats {
    #[serde(default)]
    pub rx_bytes: Option<f64>,
    #[serde(default)]
    pub tx_bytes: Option<f64>,
}

/// Per-device disk figures for one sample.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskStats {
    #[serde(default)]
    pub usable_space: Option<f64>,
    #[serde(default)]
    pub capacity: Option<f64>,
}

impl DiskStats {
    /// Bytes in use, when both figures are present.
    pub fn used(&self) -> Option<f64> {
        match (self.capacity, self.usable_space) {
            (Some(capacity), Some(usable)) => Some((capacity - usable).max(0.0)),
            _ => None,
        }
    }
}

/// One raw usage measurement as returned by the fetch collaborator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub cpu_load: Option<f64>,
    #[serde(default)]
    pub memory_usage: Option<f64>,
    #[serde(default)]
    pub memory_capacity: Option<f64>,
    #[serde(default)]
    pub network_stats_by_interface: Option<BTreeMap<String, NetworkStats>>,
    #[serde(default)]
    pub disk_stats_by_device: Option<BTreeMap<String, DiskStats>>,
}

impl Sample {
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            cpu_load: None,
            memory_usage: None,
            memory_capacity: None,
            network_stats_by_interface: None,
            disk_stats_by_device: None,
        }
    }

    /// Timestamp as unix seconds (the x domain of every chart).
    pub fn unix_seconds(&self) -> f64 {
        self.timestamp.timestamp() as f64 + self.timestamp.timestamp_subsec_millis() as f64 / 1000.0
    }

    pub fn with_cpu(mut self, load: f64) -> Self {
        self.cpu_load = Some(load);
        self
    }

    pub fn with_memory(mut self, usage: f64, capacity: f64) -> Self {
        self.memory_usage = Some(usage);
        self.memory_capacity = Some(capacity);
        self
    }

    pub fn with_interface(mut self, name: &str, rx_bytes: f64, tx_bytes: f64) -> Self {
        self.network_stats_by_interface
            .get_or_insert_with(BTreeMap::new)
            .insert(
                name.to_string(),
                NetworkStats {
                    rx_bytes: Some(rx_bytes),
                    tx_bytes: Some(tx_bytes),
                },
            );
        self
    }

    pub fn with_device(mut self, name: &str, usable_space: f64, capacity: f64) -> Self {
        self.disk_stats_by_device
            .get_or_insert_with(BTreeMap::new)
            .insert(
                name.to_string(),
                DiskStats {
                    usable_space: Some(usable_space),
                    capacity: Some(capacity),
                },
            );
        self
    }
}

/// Node metadata used to seed the time bounds of a chart set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInfo {
    pub name: String,
    pub creation_timestamp: DateTime<Utc>,
}
