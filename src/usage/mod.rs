//! Usage datasets of a monitored node and the aggregate that keeps their
//! windows in step.

pub mod charts_data;
pub mod dataset;
pub mod metrics;
pub mod source;
pub mod store;

pub use charts_data::{ChartsData, ChartsEvent, ChartsSnapshot};
pub use dataset::{
    CommonScaleData, CpuUsageData, FetchRequest, FileSystemUsageData, LoadOutcome,
    MemoryUsageData, NetworkUsageData, UsageData,
};
pub use metrics::{
    CommonScaleMetric, CpuMetric, DeviceUsage, FileSystemMetric, MemoryMetric, MetricKind,
    NetworkMetric, UsageMetric,
};
pub use source::{Clock, FixedClock, SystemClock, UsageSource};
pub use store::{ChartsStore, SubscriptionId};
