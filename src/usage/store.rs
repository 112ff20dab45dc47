//! Shared handle around [`ChartsData`] for UI threads and async loaders.
//!
//! The lock is never held across an `.await`: each async operation takes
//! a request under the lock, fetches without it, then completes under the
//! lock again. Events go out to subscribers after the lock is released.

use super::charts_data::{ChartsData, ChartsEvent, ChartsSnapshot};
use super::dataset::{FetchRequest, LoadOutcome};
use super::metrics::MetricKind;
use super::source::{Clock, UsageSource};
use crate::config::ChartConfig;
use eyre::Result;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&ChartsEvent) + Send + Sync>;

#[derive(Clone)]
pub struct ChartsStore {
    node_id: Arc<str>,
    data: Arc<Mutex<ChartsData>>,
    listeners: Arc<Mutex<Vec<(SubscriptionId, Listener)>>>,
    next_id: Arc<AtomicU64>,
}

impl ChartsStore {
    pub fn new(node_id: impl Into<String>, config: ChartConfig, clock: Arc<dyn Clock>) -> Self {
        let node_id: String = node_id.into();
        Self {
            node_id: Arc::from(node_id),
            data: Arc::new(Mutex::new(ChartsData::new(config, clock))),
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn subscribe(&self, listener: impl Fn(&ChartsEvent) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        listeners.len() != before
    }

    pub fn snapshot(&self) -> ChartsSnapshot {
        self.data.lock().snapshot()
    }

    /// Runs `f` with exclusive access to the data and dispatches whatever
    /// events it returns.
    pub fn update<R>(&self, f: impl FnOnce(&mut ChartsData) -> (R, Vec<ChartsEvent>)) -> R {
        let (result, events) = {
            let mut data = self.data.lock();
            f(&mut data)
        };
        self.emit(&events);
        result
    }

    /// Fetches the node, seeds the bounds and loads the default window.
    pub async fn initialize<S: UsageSource>(&self, source: &S) -> Result<LoadOutcome> {
        let node = source.fetch_node(&self.node_id).await?;
        info!(node = %self.node_id, created = %node.creation_timestamp, "initializing usage charts");
        self.update(|data| ((), data.initialize(&node)));
        self.load(source).await
    }

    /// Reloads the current common window.
    pub async fn load<S: UsageSource>(&self, source: &S) -> Result<LoadOutcome> {
        let request = self.data.lock().begin_load();
        self.fetch(source, request).await
    }

    /// Completes `request` against the source. Fetch errors are recorded on
    /// the datasets and reported through [`ChartsEvent::LoadFailed`]; the
    /// returned error is the same one.
    pub async fn fetch<S: UsageSource>(&self, source: &S, request: FetchRequest) -> Result<LoadOutcome> {
        debug!(node = %self.node_id, from = request.from, to = request.to, "fetching usage");
        let result = source
            .fetch_usage(&self.node_id, request.from_time(), request.to_time())
            .await;
        let error = result.as_ref().err().map(|e| eyre::eyre!("{e:#}"));
        let outcome = self.update(|data| data.finish_load(request, result));
        match (outcome, error) {
            (LoadOutcome::Failed, Some(err)) => Err(err),
            (outcome, _) => Ok(outcome),
        }
    }

    /// Loads one dataset over its own window (charts not following the
    /// common range).
    pub async fn load_dependent<S: UsageSource>(&self, kind: MetricKind, source: &S) -> Result<LoadOutcome> {
        let request = self.data.lock().begin_dependent_load(kind);
        self.fetch_dependent(kind, source, request).await
    }

    /// Completes a request issued for a single dataset. Failures are only
    /// reported through [`ChartsEvent::LoadFailed`].
    pub async fn fetch_dependent<S: UsageSource>(
        &self,
        kind: MetricKind,
        source: &S,
        request: FetchRequest,
    ) -> Result<LoadOutcome> {
        let result = source
            .fetch_usage(&self.node_id, request.from_time(), request.to_time())
            .await;
        Ok(self.update(|data| data.finish_dependent_load(kind, request, result)))
    }

    pub fn set_new_range(&self, start: f64, end: f64, load_data: bool) -> Option<FetchRequest> {
        self.update(|data| data.set_new_range(start, end, load_data))
    }

    pub fn set_dependent_range(&self, kind: MetricKind, start: f64, end: f64) -> Option<FetchRequest> {
        self.data.lock().set_dependent_range(kind, start, end)
    }

    pub fn set_follow_common_range(&self, follow: bool) {
        self.update(|data| ((), data.set_follow_common_range(follow)));
    }

    pub fn refresh_now(&self) -> Option<FetchRequest> {
        self.update(|data| data.refresh_now())
    }

    pub fn reset_range(&self) -> Option<FetchRequest> {
        self.update(|data| data.reset_range())
    }

    fn emit(&self, events: &[ChartsEvent]) {
        if events.is_empty() {
            return;
        }
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        for event in events {
            for listener in &listeners {
                listener(event);
            }
        }
    }
}
