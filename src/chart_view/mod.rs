pub mod input;
pub mod renderer;

use crate::config::ChartConfig;
use crate::coordinate_space::CoordinateSpace;
use crate::data_types::{AxisPosition, ChartDataset, PlotSeries};
use crate::plot_context::PlotContext;
use crate::plot_types::UsageBars;
use crate::rendering::DrawList;
use crate::theme::ChartTheme;
use crate::usage::DeviceUsage;

pub use input::{GestureController, GestureEffect, GestureState, Key, PointerEvent};
pub use renderer::ChartRenderer;

/// Identifier of the time axis every chart view registers.
pub const TIME_AXIS: &str = "time";

#[derive(Clone, Debug, PartialEq)]
pub enum ChartBody {
    /// Series drawn over the time axis.
    Series,
    /// Latest utilization per device, outside the time window.
    Bars(Vec<DeviceUsage>),
}

/// One chart: plot context, gesture state and renderer.
pub struct ChartView {
    title: String,
    context: PlotContext,
    gesture: GestureController,
    renderer: ChartRenderer,
    body: ChartBody,
    rubber_band: Option<(f32, f32)>,
}

impl ChartView {
    /// A time-series chart with a bottom time axis. Value axes and series
    /// are added by the caller.
    pub fn time_series(title: impl Into<String>, config: &ChartConfig, theme: ChartTheme) -> Self {
        let mut context = PlotContext::new(config);
        context.register_axis(CoordinateSpace::time(TIME_AXIS, AxisPosition::Bottom, config));
        Self {
            title: title.into(),
            context,
            gesture: GestureController::new(),
            renderer: ChartRenderer::new(config, theme),
            body: ChartBody::Series,
            rubber_band: None,
        }
    }

    pub fn bars(title: impl Into<String>, config: &ChartConfig, theme: ChartTheme) -> Self {
        let mut view = Self::time_series(title, config, theme);
        view.body = ChartBody::Bars(Vec::new());
        view
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &ChartBody {
        &self.body
    }

    pub fn context(&self) -> &PlotContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut PlotContext {
        &mut self.context
    }

    pub fn gesture(&self) -> &GestureState {
        self.gesture.state()
    }

    pub fn rubber_band(&self) -> Option<(f32, f32)> {
        self.rubber_band
    }

    pub fn with_axis(mut self, axis: CoordinateSpace) -> Self {
        self.context.register_axis(axis);
        self
    }

    pub fn with_series(mut self, series: PlotSeries) -> Self {
        self.context.add_plot(series);
        self
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.context.set_size(width, height);
    }

    pub fn set_window(&mut self, start: f64, end: f64) {
        self.context.set_x_range(start, end);
    }

    /// Replaces the points unless the dataset is the one already shown, so
    /// repeated syncs keep the hover alive.
    pub fn set_data(&mut self, data: ChartDataset) {
        let current = self.context.data();
        if current.revision == data.revision && current.len() == data.len() {
            return;
        }
        self.context.set_data(data);
        self.context.fit_value_axes();
    }

    pub fn set_devices(&mut self, devices: Vec<DeviceUsage>) {
        if let ChartBody::Bars(current) = &mut self.body {
            *current = devices;
        }
    }

    /// Feeds an input event through the gesture state machine. Overlay and
    /// hover effects are applied here; range effects are returned for the
    /// owner to route.
    pub fn handle_event(&mut self, event: PointerEvent) -> Vec<GestureEffect> {
        if matches!(self.body, ChartBody::Bars(_)) {
            return Vec::new();
        }
        let effects = self.gesture.handle(event, &self.context);
        for effect in &effects {
            match effect {
                GestureEffect::RubberBand { from_px, to_px } => {
                    self.rubber_band = Some((*from_px, *to_px));
                }
                GestureEffect::ClearRubberBand => self.rubber_band = None,
                GestureEffect::Hover(hover) => self.context.set_hover(hover.clone()),
                GestureEffect::PreviewRange { start, end } => self.context.set_x_range(*start, *end),
                GestureEffect::CommitRange { .. } => {}
            }
        }
        effects
    }

    pub fn render(&self) -> DrawList {
        let mut out = DrawList::new();
        self.renderer.render_title(&self.title, &mut out);
        match &self.body {
            ChartBody::Series => out.extend(self.renderer.render(&self.context, self.rubber_band)),
            ChartBody::Bars(devices) => {
                UsageBars::new(devices).render(self.context.plot_area(), self.renderer.theme(), &mut out)
            }
        }
        out
    }
}
