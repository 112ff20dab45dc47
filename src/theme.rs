use serde::{Deserialize, Serialize};

/// RGBA color handed to the drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn white() -> Self {
        Self::rgb(0xff, 0xff, 0xff)
    }

    pub fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    /// `#rrggbb`, alpha is carried separately as opacity.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartTheme {
    pub background: Color,
    pub grid_line: Color,
    pub axis_line: Color,
    pub axis_label: Color,
    pub axis_label_size: f32,
    pub boundary_label: Color,
    pub crosshair_line: Color,
    pub tooltip_background: Color,
    pub tooltip_text: Color,
    pub rubber_band_fill: Color,
    pub rubber_band_stroke: Color,
    pub bar_track: Color,
    pub palette: Vec<Color>,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background: Color::black(),
            grid_line: Color::white().alpha(0.1),
            axis_line: Color::white().alpha(0.2),
            axis_label: Color::white().alpha(0.8),
            axis_label_size: 11.0,
            boundary_label: Color::white(),
            crosshair_line: Color::white().alpha(0.3),
            tooltip_background: Color::black().alpha(0.8),
            tooltip_text: Color::white(),
            rubber_band_fill: Color::rgb(0x10, 0x8e, 0xe9).alpha(0.2),
            rubber_band_stroke: Color::rgb(0x10, 0x8e, 0xe9),
            bar_track: Color::white().alpha(0.08),
            palette: vec![
                Color::rgb(0x10, 0x8e, 0xe9),
                Color::rgb(0xf5, 0x9b, 0x23),
                Color::rgb(0x52, 0xc4, 0x1a),
                Color::rgb(0xeb, 0x2f, 0x96),
                Color::rgb(0x72, 0x2e, 0xd1),
                Color::rgb(0x13, 0xc2, 0xc2),
            ],
        }
    }
}

impl ChartTheme {
    /// Palette color for the n-th series, wrapping around.
    pub fn series_color(&self, index: usize) -> Color {
        if self.palette.is_empty() {
            return Color::white();
        }
        self.palette[index % self.palette.len()]
    }
}
