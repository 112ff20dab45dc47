use super::point::ValueKey;
use crate::theme::Color;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlotKind {
    #[default]
    Line,
    Area,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeriesStyle {
    pub color: Color,
    pub line_width: f32,
    pub fill_opacity: f32,
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self {
            color: Color::rgb(0x10, 0x8e, 0xe9),
            line_width: 1.5,
            fill_opacity: 0.25,
        }
    }
}

/// A named series registered on a plot: what value to read and which
/// y-axis it is scaled against.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlotSeries {
    pub name: String,
    pub value: ValueKey,
    pub axis: String,
    pub kind: PlotKind,
    pub style: SeriesStyle,
}

impl PlotSeries {
    pub fn new(name: impl Into<String>, value: ValueKey, axis: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            axis: axis.into(),
            kind: PlotKind::Line,
            style: SeriesStyle::default(),
        }
    }

    pub fn with_kind(mut self, kind: PlotKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.style.color = color;
        self
    }
}
