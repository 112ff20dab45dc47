use crate::coordinate_space::CoordinateSpace;
use crate::data_types::{AxisDataType, AxisPosition};
use crate::plot_context::PlotArea;
use crate::rendering::{DrawCommand, DrawList, TextAnchor};
use crate::theme::ChartTheme;
use crate::ticks::{TickKind, TimeAxisTickGenerator};

const LABEL_PADDING: f32 = 4.0;

pub struct AxisRenderer;

impl AxisRenderer {
    fn paint_axis_line(position: AxisPosition, area: PlotArea, theme: &ChartTheme, out: &mut DrawList) {
        let points = match position {
            AxisPosition::Bottom => vec![
                (area.x, area.y + area.height),
                (area.x + area.width, area.y + area.height),
            ],
            AxisPosition::Top => vec![(area.x, area.y), (area.x + area.width, area.y)],
            AxisPosition::Left => vec![(area.x, area.y), (area.x, area.y + area.height)],
            AxisPosition::Right => vec![
                (area.x + area.width, area.y),
                (area.x + area.width, area.y + area.height),
            ],
        };
        out.push(DrawCommand::Line {
            points,
            color: theme.axis_line,
            width: 1.0,
            opacity: 1.0,
        });
    }

    /// Time axis: boundary ticks in full, regular ticks with a grid line,
    /// intermediate ticks as labels only.
    pub fn paint_time_axis(
        axis: &CoordinateSpace,
        area: PlotArea,
        generator: &TimeAxisTickGenerator,
        theme: &ChartTheme,
        out: &mut DrawList,
    ) {
        Self::paint_axis_line(axis.position(), area, theme, out);

        let ticks = generator.generate(axis.start(), axis.end(), area.width as f64);
        let label_y = match axis.position() {
            AxisPosition::Top => area.y - LABEL_PADDING,
            _ => area.y + area.height + LABEL_PADDING + theme.axis_label_size,
        };
        let last = ticks.len().saturating_sub(1);

        for (i, tick) in ticks.iter().enumerate() {
            let x = area.x + axis.get_canvas_coordinate(tick.value);
            if tick.kind == TickKind::Regular {
                out.push(DrawCommand::Line {
                    points: vec![(x, area.y), (x, area.y + area.height)],
                    color: theme.grid_line,
                    width: 1.0,
                    opacity: 1.0,
                });
            }
            let (color, anchor) = match tick.kind {
                TickKind::Boundary if i == 0 => (theme.boundary_label, TextAnchor::Start),
                TickKind::Boundary if i == last => (theme.boundary_label, TextAnchor::End),
                _ => (theme.axis_label, TextAnchor::Middle),
            };
            out.push(DrawCommand::Text {
                x,
                y: label_y,
                text: tick.label.clone(),
                color,
                size: theme.axis_label_size,
                anchor,
            });
        }
    }

    /// Value axis with "nice" ticks formatted by the axis format.
    pub fn paint_value_axis(
        axis: &CoordinateSpace,
        area: PlotArea,
        count: usize,
        theme: &ChartTheme,
        out: &mut DrawList,
    ) {
        Self::paint_axis_line(axis.position(), area, theme, out);
        if area.height <= 0.0 {
            return;
        }

        let scale = axis.scale();
        let (x, anchor) = match axis.position() {
            AxisPosition::Right => (area.x + area.width + LABEL_PADDING, TextAnchor::Start),
            _ => (area.x - LABEL_PADDING, TextAnchor::End),
        };
        for value in scale.ticks(count) {
            let y = area.y + axis.get_canvas_coordinate(value);
            if axis.position() == AxisPosition::Left {
                out.push(DrawCommand::Line {
                    points: vec![(area.x, y), (area.x + area.width, y)],
                    color: theme.grid_line,
                    width: 1.0,
                    opacity: 1.0,
                });
            }
            out.push(DrawCommand::Text {
                x,
                y: y + theme.axis_label_size / 2.0,
                text: scale.format_tick(value, axis.format()),
                color: theme.axis_label,
                size: theme.axis_label_size,
                anchor,
            });
        }
    }

    pub fn paint(
        axis: &CoordinateSpace,
        area: PlotArea,
        generator: &TimeAxisTickGenerator,
        numeric_ticks: usize,
        theme: &ChartTheme,
        out: &mut DrawList,
    ) {
        match axis.data_type() {
            AxisDataType::Time if axis.position().is_horizontal() => {
                Self::paint_time_axis(axis, area, generator, theme, out)
            }
            _ => Self::paint_value_axis(axis, area, numeric_ticks, theme, out),
        }
    }
}
