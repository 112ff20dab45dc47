use crate::axis_renderer::AxisRenderer;
use crate::config::ChartConfig;
use crate::data_types::{HoverState, ValueFormat};
use crate::plot_context::{PlotArea, PlotContext};
use crate::plot_types::renderer_for;
use crate::rendering::{DrawCommand, DrawList, TextAnchor};
use crate::theme::ChartTheme;
use crate::ticks::TimeAxisTickGenerator;
use crate::utils::date_formatter::{determine_date_format, format_timestamp};
use crate::utils::format::format_value;
use chrono_tz::Tz;

const MARKER_RADIUS: f32 = 3.0;
const TOOLTIP_OFFSET: f32 = 12.0;

/// Turns a [`PlotContext`] into one frame of draw commands.
#[derive(Clone, Debug)]
pub struct ChartRenderer {
    ticks: TimeAxisTickGenerator,
    theme: ChartTheme,
    timezone: Tz,
    numeric_ticks: usize,
}

impl ChartRenderer {
    pub fn new(config: &ChartConfig, theme: ChartTheme) -> Self {
        Self {
            ticks: TimeAxisTickGenerator::from_config(config),
            theme,
            timezone: config.timezone,
            numeric_ticks: config.numeric_ticks,
        }
    }

    pub fn theme(&self) -> &ChartTheme {
        &self.theme
    }

    pub fn render(&self, ctx: &PlotContext, rubber_band: Option<(f32, f32)>) -> DrawList {
        let mut out = DrawList::new();
        let area = ctx.plot_area();
        if area.width <= 0.0 || area.height <= 0.0 {
            return out;
        }

        for axis in ctx.axes() {
            AxisRenderer::paint(axis, area, &self.ticks, self.numeric_ticks, &self.theme, &mut out);
        }

        for plot in ctx.plots() {
            if let Some(transform) = ctx.transform(Some(&plot.axis)) {
                renderer_for(plot).render(ctx.data(), &transform, &mut out);
            }
        }

        if let Some((from_px, to_px)) = rubber_band {
            out.push(DrawCommand::Rect {
                x: from_px,
                y: area.y,
                width: (to_px - from_px).max(0.0),
                height: area.height,
                fill: Some(self.theme.rubber_band_fill),
                stroke: Some(self.theme.rubber_band_stroke),
            });
        }

        if let Some(hover) = ctx.hover() {
            self.render_hover(ctx, hover, area, &mut out);
        }
        out
    }

    fn render_hover(&self, ctx: &PlotContext, hover: &HoverState, area: PlotArea, out: &mut DrawList) {
        out.push(DrawCommand::Line {
            points: vec![(hover.anchor_x, area.y), (hover.anchor_x, area.y + area.height)],
            color: self.theme.crosshair_line,
            width: 1.0,
            opacity: 1.0,
        });

        let span = ctx.x_axis().map(|a| a.span()).unwrap_or_default();
        let mut lines = vec![format_timestamp(
            hover.point.x,
            determine_date_format(span),
            self.timezone,
        )];

        for plot in ctx.plots() {
            let value = hover.point.value(&plot.value);
            let format = ctx
                .axis(&plot.axis)
                .map(|a| a.format())
                .unwrap_or(ValueFormat::Plain);
            lines.push(format!("{}: {}", plot.name, format_value(value, format)));

            let (Some(value), Some(transform)) = (value, ctx.transform(Some(&plot.axis))) else {
                continue;
            };
            out.push(DrawCommand::Marker {
                x: hover.anchor_x,
                y: transform.y_data_to_screen(value),
                radius: MARKER_RADIUS,
                color: plot.style.color,
            });
        }

        let (px, py) = hover.pointer;
        // Flip to the left of the cursor in the right half of the plot.
        let x = if px > area.x + area.width / 2.0 {
            px - TOOLTIP_OFFSET
        } else {
            px + TOOLTIP_OFFSET
        };
        out.push(DrawCommand::Tooltip {
            x,
            y: py + TOOLTIP_OFFSET,
            lines,
            background: self.theme.tooltip_background,
            color: self.theme.tooltip_text,
        });
    }

    /// Chart title above the plot area.
    pub fn render_title(&self, title: &str, out: &mut DrawList) {
        if title.is_empty() {
            return;
        }
        out.push(DrawCommand::Text {
            x: 4.0,
            y: self.theme.axis_label_size + 2.0,
            text: title.to_string(),
            color: self.theme.axis_label,
            size: self.theme.axis_label_size + 2.0,
            anchor: TextAnchor::Start,
        });
    }
}
