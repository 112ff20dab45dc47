use crate::plot_context::PlotArea;
use crate::rendering::{DrawCommand, DrawList, TextAnchor};
use crate::theme::ChartTheme;
use crate::usage::DeviceUsage;
use crate::utils::format::format_bytes;

const ROW_GAP: f32 = 8.0;
const MAX_ROW_HEIGHT: f32 = 28.0;

/// Horizontal utilization bars, one row per device. Not a time series: it
/// shows the latest snapshot whatever the common window is.
pub struct UsageBars<'a> {
    pub devices: &'a [DeviceUsage],
}

impl<'a> UsageBars<'a> {
    pub fn new(devices: &'a [DeviceUsage]) -> Self {
        Self { devices }
    }

    pub fn render(&self, area: PlotArea, theme: &ChartTheme, out: &mut DrawList) {
        if self.devices.is_empty() || area.width <= 0.0 || area.height <= 0.0 {
            return;
        }
        let rows = self.devices.len() as f32;
        let row_height = ((area.height - ROW_GAP * (rows - 1.0)) / rows).clamp(1.0, MAX_ROW_HEIGHT);

        for (i, device) in self.devices.iter().enumerate() {
            let y = area.y + i as f32 * (row_height + ROW_GAP);
            out.push(DrawCommand::Rect {
                x: area.x,
                y,
                width: area.width,
                height: row_height,
                fill: Some(theme.bar_track),
                stroke: None,
            });
            let fraction = device.percent.map(|p| (p / 100.0).clamp(0.0, 1.0)).unwrap_or(0.0);
            out.push(DrawCommand::Rect {
                x: area.x,
                y,
                width: area.width * fraction as f32,
                height: row_height,
                fill: Some(theme.series_color(i)),
                stroke: None,
            });
            out.push(DrawCommand::Text {
                x: area.x + 4.0,
                y: y + row_height / 2.0,
                text: device_label(device),
                color: theme.axis_label,
                size: theme.axis_label_size,
                anchor: TextAnchor::Start,
            });
        }
    }
}

fn device_label(device: &DeviceUsage) -> String {
    match (device.used, device.capacity, device.percent) {
        (Some(used), Some(capacity), Some(percent)) => format!(
            "{}: {} / {} ({:.1}%)",
            device.name,
            format_bytes(used),
            format_bytes(capacity),
            percent
        ),
        _ => format!("{}: n/a", device.name),
    }
}
