//! usage_charts: headless time-series charting for node usage dashboards.
//!
//! The engine owns axes, tick selection, gestures and the usage datasets of
//! a node, and emits a [`rendering::DrawList`] per frame for the host
//! surface to paint.

pub mod axis_renderer;
pub mod chart_container;
pub mod chart_view;
pub mod config;
pub mod coordinate_space;
pub mod data_types;
pub mod gaps;
pub mod gutter_manager;
pub mod plot_context;
pub mod plot_types;
pub mod rendering;
pub mod scales;
pub mod theme;
pub mod ticks;
pub mod transform;
pub mod usage;
pub mod utils;
pub mod view_controller;

pub use chart_container::{PendingFetch, UsageChartsContainer};
pub use chart_view::{ChartView, GestureController, GestureEffect, GestureState, PointerEvent};
pub use config::ChartConfig;
pub use coordinate_space::CoordinateSpace;
pub use data_types::{ChartDataset, PlotSeries, Sample, SeriesPoint};
pub use plot_context::PlotContext;
pub use plot_types::{LinePlot, PlotRenderer};
pub use rendering::{DrawCommand, DrawList};
pub use ticks::{Tick, TickKind, TickRuleChain, TimeAxisTickGenerator};
pub use usage::{ChartsData, ChartsStore, UsageSource};
pub use view_controller::{ViewController, WindowBounds};
