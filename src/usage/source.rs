//! Collaborators supplying samples, node bounds and the current time.

use crate::data_types::{NodeInfo, Sample};
use chrono::{DateTime, Utc};
use eyre::Result;
use parking_lot::Mutex;
use std::future::Future;

/// Remote source of usage samples. Transport and auth are the
/// implementor's concern.
pub trait UsageSource: Send + Sync {
    fn fetch_usage(
        &self,
        node_id: &str,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> impl Future<Output = Result<Vec<Sample>>> + Send;

    fn fetch_node(&self, node_id: &str) -> impl Future<Output = Result<NodeInfo>> + Send;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn now_seconds(&self) -> f64 {
        let now = self.now();
        now.timestamp() as f64 + now.timestamp_subsec_millis() as f64 / 1000.0
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock() = now;
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}
