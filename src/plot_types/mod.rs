//! Series renderers writing into a [`DrawList`].

pub mod area;
pub mod bar;
pub mod line;

pub use area::AreaPlot;
pub use bar::UsageBars;
pub use line::LinePlot;

use crate::data_types::{ChartDataset, PlotKind, PlotSeries};
use crate::rendering::DrawList;
use crate::transform::PlotTransform;

/// Trait for rendering plot types into a draw list
pub trait PlotRenderer {
    fn render(&self, data: &ChartDataset, transform: &PlotTransform, out: &mut DrawList);
}

/// Renderer matching a registered series.
pub fn renderer_for(series: &PlotSeries) -> Box<dyn PlotRenderer> {
    match series.kind {
        PlotKind::Line => Box::new(LinePlot::new(series.value.clone(), series.style.clone())),
        PlotKind::Area => Box::new(AreaPlot::new(series.value.clone(), series.style.clone())),
    }
}
