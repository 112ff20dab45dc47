// Area plot implementation

use super::line::LinePlot;
use super::PlotRenderer;
use crate::data_types::{ChartDataset, SeriesStyle, ValueKey};
use crate::rendering::{DrawCommand, DrawList};
use crate::transform::PlotTransform;

/// Area plot type: a line with the space below it filled, per segment.
pub struct AreaPlot {
    line: LinePlot,
}

impl AreaPlot {
    pub fn new(value: ValueKey, style: SeriesStyle) -> Self {
        Self {
            line: LinePlot::new(value, style),
        }
    }
}

impl PlotRenderer for AreaPlot {
    fn render(&self, data: &ChartDataset, transform: &PlotTransform, out: &mut DrawList) {
        let style = &self.line.style;
        let baseline = transform.baseline();
        for segment in self.line.screen_segments(data, transform) {
            if segment.len() < 2 {
                continue;
            }
            out.push(DrawCommand::Area {
                points: segment,
                baseline,
                color: style.color,
                opacity: style.fill_opacity,
            });
        }
        self.line.render(data, transform, out);
    }
}
