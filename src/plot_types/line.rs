use super::PlotRenderer;
use crate::data_types::{ChartDataset, SeriesStyle, ValueKey};
use crate::gaps::{segment_ranges, visible_range};
use crate::rendering::{DrawCommand, DrawList};
use crate::transform::PlotTransform;

/// Line plot type
pub struct LinePlot {
    pub value: ValueKey,
    pub style: SeriesStyle,
}

impl LinePlot {
    pub fn new(value: ValueKey, style: SeriesStyle) -> Self {
        Self { value, style }
    }

    /// Screen polylines, one per contiguous run of defined values.
    pub fn screen_segments(&self, data: &ChartDataset, transform: &PlotTransform) -> Vec<Vec<(f32, f32)>> {
        let visible = visible_range(
            &data.points,
            data.sorted,
            transform.x_axis.start(),
            transform.x_axis.end(),
        );
        let points = &data.points[visible];

        let mut segments = Vec::new();
        for range in segment_ranges(points, &self.value) {
            let mut screen: Vec<(f32, f32)> = Vec::with_capacity(range.len());
            for point in &points[range] {
                let Some(v) = point.value(&self.value) else {
                    continue;
                };
                let (px_x, px_y) = transform.data_to_screen(point.x, v);
                // Simple decimation: skip points landing on the same pixel.
                if let Some(&(lx, ly)) = screen.last() {
                    if (px_x - lx).abs() < 0.5 && (px_y - ly).abs() < 1.0 {
                        continue;
                    }
                }
                screen.push((px_x, px_y));
            }
            if !screen.is_empty() {
                segments.push(screen);
            }
        }
        segments
    }
}

impl PlotRenderer for LinePlot {
    fn render(&self, data: &ChartDataset, transform: &PlotTransform, out: &mut DrawList) {
        for segment in self.screen_segments(data, transform) {
            if segment.len() == 1 {
                let (x, y) = segment[0];
                out.push(DrawCommand::Marker {
                    x,
                    y,
                    radius: self.style.line_width,
                    color: self.style.color,
                });
                continue;
            }
            out.push(DrawCommand::Line {
                points: segment,
                color: self.style.color,
                width: self.style.line_width,
                opacity: self.style.color.a,
            });
        }
    }
}
