//! The usage dashboard of one node: a chart per metric fed from one
//! [`ChartsStore`], with hover mirrored across the time-series charts.

use crate::chart_view::{ChartView, GestureEffect, PointerEvent};
use crate::config::ChartConfig;
use crate::coordinate_space::CoordinateSpace;
use crate::data_types::{
    AxisDataType, AxisPosition, ChartDataset, PlotKind, PlotSeries, SharedHover, ValueFormat,
    ValueKey,
};
use crate::rendering::DrawList;
use crate::theme::ChartTheme;
use crate::usage::{ChartsStore, FetchRequest, LoadOutcome, MetricKind, NetworkMetric, UsageSource};
use eyre::Result;
use tracing::{debug, trace};

const VALUE_AXIS: &str = "value";
const PERCENT_AXIS: &str = "percent";

/// A fetch triggered by a gesture, to be run against a source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PendingFetch {
    Common(FetchRequest),
    Dependent(MetricKind, FetchRequest),
}

impl PendingFetch {
    pub async fn run<S: UsageSource>(self, store: &ChartsStore, source: &S) -> Result<LoadOutcome> {
        match self {
            PendingFetch::Common(request) => store.fetch(source, request).await,
            PendingFetch::Dependent(kind, request) => store.fetch_dependent(kind, source, request).await,
        }
    }
}

pub struct UsageChartsContainer {
    store: ChartsStore,
    theme: ChartTheme,
    views: Vec<(MetricKind, ChartView)>,
    common: ChartDataset,
    network_keys: Vec<String>,
    shared_hover: SharedHover,
}

impl UsageChartsContainer {
    pub fn new(store: ChartsStore, config: &ChartConfig, theme: ChartTheme) -> Self {
        let views = MetricKind::ALL
            .iter()
            .map(|&kind| (kind, build_view(kind, config, &theme)))
            .collect();
        let mut container = Self {
            store,
            theme,
            views,
            common: ChartDataset::default(),
            network_keys: Vec::new(),
            shared_hover: SharedHover::default(),
        };
        container.sync_from_store();
        container
    }

    pub fn store(&self) -> &ChartsStore {
        &self.store
    }

    pub fn view(&self, kind: MetricKind) -> Option<&ChartView> {
        self.views.iter().find(|(k, _)| *k == kind).map(|(_, v)| v)
    }

    pub fn shared_hover(&self) -> SharedHover {
        self.shared_hover
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        for (_, view) in self.views.iter_mut() {
            view.set_size(width, height);
        }
    }

    /// Pulls a fresh snapshot into every view. Called after store events.
    pub fn sync_from_store(&mut self) {
        let snapshot = self.store.snapshot();
        if snapshot.network_keys != self.network_keys {
            self.network_keys = snapshot.network_keys.clone();
            if let Some((_, view)) = self
                .views
                .iter_mut()
                .find(|(k, _)| *k == MetricKind::Network)
            {
                rebuild_network_series(view, &snapshot.network_keys, &self.theme);
            }
        }
        self.common = snapshot.common.clone();

        for (kind, view) in self.views.iter_mut() {
            let (from, to) = snapshot.window(*kind);
            view.set_window(from, to);
            view.set_data(snapshot.dataset(*kind).clone());
            if *kind == MetricKind::FileSystem {
                view.set_devices(snapshot.devices.clone());
            }
        }
        trace!(from = snapshot.from, to = snapshot.to, "charts synced from store");
    }

    /// Routes an input event on one chart. Range previews and commits go
    /// to the store; a commit that needs data comes back as a
    /// [`PendingFetch`].
    pub fn handle_pointer(&mut self, kind: MetricKind, event: PointerEvent) -> Option<PendingFetch> {
        let follow = self.store.snapshot().follow_common_range;
        let effects = self.view_mut(kind)?.handle_event(event);
        let mut pending = None;
        let mut window_moved = false;

        for effect in effects {
            match effect {
                GestureEffect::PreviewRange { start, end } if follow => {
                    self.store.set_new_range(start, end, false);
                    window_moved = true;
                }
                GestureEffect::CommitRange { start, end } if follow => {
                    pending = self.store.set_new_range(start, end, true).map(PendingFetch::Common);
                    window_moved = true;
                }
                GestureEffect::CommitRange { start, end } => {
                    pending = self
                        .store
                        .set_dependent_range(kind, start, end)
                        .map(|request| PendingFetch::Dependent(kind, request));
                    window_moved = true;
                }
                GestureEffect::Hover(hover) => {
                    self.mirror_hover(kind, hover.map(|h| h.point.x));
                }
                _ => {}
            }
        }

        if window_moved {
            self.sync_from_store();
        }
        if let Some(fetch) = &pending {
            debug!(chart = kind.title(), ?fetch, "range committed");
        }
        pending
    }

    /// Shows the hover of `source` on every other time-series chart at the
    /// nearest common timestamp.
    fn mirror_hover(&mut self, source: MetricKind, domain_x: Option<f64>) {
        let domain_x = domain_x.map(|x| {
            self.common
                .nearest_index(x, usize::MAX)
                .and_then(|i| self.common.points.get(i))
                .map_or(x, |p| p.x)
        });
        self.shared_hover = SharedHover {
            domain_x,
            source: MetricKind::ALL.iter().position(|k| *k == source),
        };
        for (kind, view) in self.views.iter_mut() {
            if *kind == source || *kind == MetricKind::FileSystem {
                continue;
            }
            view.context_mut().hover_domain_x(domain_x);
        }
    }

    pub fn render(&self, kind: MetricKind) -> DrawList {
        self.view(kind).map(ChartView::render).unwrap_or_default()
    }

    fn view_mut(&mut self, kind: MetricKind) -> Option<&mut ChartView> {
        self.views.iter_mut().find(|(k, _)| *k == kind).map(|(_, v)| v)
    }
}

fn value_axis(format: ValueFormat, position: AxisPosition, id: &str, config: &ChartConfig) -> CoordinateSpace {
    CoordinateSpace::new(id, position, AxisDataType::Numeric)
        .with_format(format)
        .with_size(config.vertical_axis_size)
}

fn build_view(kind: MetricKind, config: &ChartConfig, theme: &ChartTheme) -> ChartView {
    let view = |title: &str| ChartView::time_series(title, config, theme.clone());
    match kind {
        MetricKind::Cpu => view(kind.title())
            .with_axis(value_axis(ValueFormat::Load, AxisPosition::Left, VALUE_AXIS, config))
            .with_series(
                PlotSeries::new("Load", ValueKey::Y, VALUE_AXIS)
                    .with_kind(PlotKind::Area)
                    .with_color(theme.series_color(0)),
            ),
        MetricKind::Memory => view(kind.title())
            .with_axis(value_axis(ValueFormat::Mebibytes, AxisPosition::Left, VALUE_AXIS, config))
            .with_axis(value_axis(ValueFormat::Percent, AxisPosition::Right, PERCENT_AXIS, config))
            .with_series(
                PlotSeries::new("Used", ValueKey::Y, VALUE_AXIS)
                    .with_kind(PlotKind::Area)
                    .with_color(theme.series_color(0)),
            )
            .with_series(
                PlotSeries::new("Used %", ValueKey::Percent, PERCENT_AXIS)
                    .with_color(theme.series_color(1)),
            ),
        MetricKind::Network => {
            view(kind.title()).with_axis(value_axis(ValueFormat::Bytes, AxisPosition::Left, VALUE_AXIS, config))
        }
        MetricKind::FileSystem => ChartView::bars(kind.title(), config, theme.clone()),
    }
}

/// One received and one transmitted series per interface.
fn rebuild_network_series(view: &mut ChartView, interfaces: &[String], theme: &ChartTheme) {
    let context = view.context_mut();
    context.clear_plots();
    for (i, interface) in interfaces.iter().enumerate() {
        context.add_plot(
            PlotSeries::new(format!("{interface} rx"), NetworkMetric::rx_key(interface), VALUE_AXIS)
                .with_color(theme.series_color(2 * i)),
        );
        context.add_plot(
            PlotSeries::new(format!("{interface} tx"), NetworkMetric::tx_key(interface), VALUE_AXIS)
                .with_color(theme.series_color(2 * i + 1)),
        );
    }
    context.fit_value_axes();
}
