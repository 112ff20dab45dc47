//! One chart axis: a visible domain sub-range mapped onto a pixel extent.

use crate::config::ChartConfig;
use crate::data_types::{AxisDataType, AxisPosition, ValueFormat};
use crate::scales::ChartScale;
use tracing::trace;

/// Frozen copy of an axis taken when a gesture starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisSnapshot {
    pub start: f64,
    pub end: f64,
    /// Domain units per pixel.
    pub ratio: f64,
}

impl AxisSnapshot {
    pub fn span(&self) -> f64 {
        self.end - self.start
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CoordinateSpace {
    identifier: String,
    position: AxisPosition,
    data_type: AxisDataType,
    format: ValueFormat,
    start: f64,
    end: f64,
    pixel_size: f32,
    /// Margin this axis takes on its side of the plot.
    size: f32,
    min_span: f64,
    canvas_to_plot_ratio: f64,
    plot_to_canvas_ratio: f64,
}

impl CoordinateSpace {
    pub fn new(identifier: impl Into<String>, position: AxisPosition, data_type: AxisDataType) -> Self {
        let config = ChartConfig::default();
        let size = if position.is_horizontal() {
            config.horizontal_axis_size
        } else {
            config.vertical_axis_size
        };
        let min_span = match data_type {
            AxisDataType::Time => config.min_span_secs,
            AxisDataType::Numeric => 1.0,
        };
        let mut axis = Self {
            identifier: identifier.into(),
            position,
            data_type,
            format: ValueFormat::Plain,
            start: 0.0,
            end: min_span,
            pixel_size: 0.0,
            size,
            min_span,
            canvas_to_plot_ratio: 0.0,
            plot_to_canvas_ratio: 0.0,
        };
        axis.update_ratios();
        axis
    }

    /// Time axis using the configured minimum span and margin.
    pub fn time(identifier: impl Into<String>, position: AxisPosition, config: &ChartConfig) -> Self {
        Self::new(identifier, position, AxisDataType::Time)
            .with_min_span(config.min_span_secs)
            .with_size(if position.is_horizontal() {
                config.horizontal_axis_size
            } else {
                config.vertical_axis_size
            })
    }

    pub fn with_range(mut self, start: f64, end: f64) -> Self {
        self.set_range(start, end);
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size.max(0.0);
        self
    }

    pub fn with_min_span(mut self, min_span: f64) -> Self {
        if min_span.is_finite() && min_span > 0.0 {
            self.min_span = min_span;
            let (start, end) = (self.start, self.end);
            self.set_range(start, end);
        }
        self
    }

    pub fn with_format(mut self, format: ValueFormat) -> Self {
        self.format = format;
        self
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn position(&self) -> AxisPosition {
        self.position
    }

    pub fn data_type(&self) -> AxisDataType {
        self.data_type
    }

    pub fn format(&self) -> ValueFormat {
        self.format
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    pub fn pixel_size(&self) -> f32 {
        self.pixel_size
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn min_span(&self) -> f64 {
        self.min_span
    }

    /// Domain units per pixel.
    pub fn canvas_to_plot_ratio(&self) -> f64 {
        self.canvas_to_plot_ratio
    }

    /// Pixels per domain unit.
    pub fn plot_to_canvas_ratio(&self) -> f64 {
        self.plot_to_canvas_ratio
    }

    /// Sets the visible sub-range. Zero, inverted or too narrow spans are
    /// widened to the minimum span instead of being rejected.
    pub fn set_range(&mut self, start: f64, end: f64) {
        if !start.is_finite() || !end.is_finite() {
            trace!(axis = %self.identifier, start, end, "ignoring non-finite axis range");
            return;
        }
        let (start, end) = match self.data_type {
            AxisDataType::Time if end - start < self.min_span => (start, start + self.min_span),
            AxisDataType::Numeric if end - start <= 0.0 => {
                let half = self.min_span / 2.0;
                (start - half, start + half)
            }
            _ => (start, end),
        };
        self.start = start;
        self.end = end;
        self.update_ratios();
    }

    pub fn set_pixel_size(&mut self, pixel_size: f32) {
        self.pixel_size = if pixel_size.is_finite() {
            pixel_size.max(0.0)
        } else {
            0.0
        };
        self.update_ratios();
    }

    fn update_ratios(&mut self) {
        let span = self.end - self.start;
        if self.pixel_size > 0.0 && span > 0.0 {
            self.canvas_to_plot_ratio = span / self.pixel_size as f64;
            self.plot_to_canvas_ratio = self.pixel_size as f64 / span;
        } else {
            self.canvas_to_plot_ratio = 0.0;
            self.plot_to_canvas_ratio = 0.0;
        }
    }

    /// Pixel offset (from the start of the axis extent) to domain value.
    /// Vertical axes grow upwards.
    pub fn get_plot_coordinate(&self, pixel: f32) -> f64 {
        let offset = if self.position.is_vertical() {
            self.pixel_size - pixel
        } else {
            pixel
        };
        self.start + offset as f64 * self.canvas_to_plot_ratio
    }

    /// Domain value to pixel offset from the start of the axis extent.
    pub fn get_canvas_coordinate(&self, value: f64) -> f32 {
        let offset = ((value - self.start) * self.plot_to_canvas_ratio) as f32;
        if self.position.is_vertical() {
            self.pixel_size - offset
        } else {
            offset
        }
    }

    pub fn snapshot(&self) -> AxisSnapshot {
        AxisSnapshot {
            start: self.start,
            end: self.end,
            ratio: self.canvas_to_plot_ratio,
        }
    }

    /// Linear scale equivalent of this axis, used for value tick generation.
    pub fn scale(&self) -> ChartScale {
        let range = if self.position.is_vertical() {
            (self.pixel_size, 0.0)
        } else {
            (0.0, self.pixel_size)
        };
        ChartScale::new_linear((self.start, self.end), range)
    }
}
