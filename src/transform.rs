//! Transform helper for coordinate projection

use crate::coordinate_space::CoordinateSpace;
use crate::plot_context::PlotArea;

#[derive(Clone, Debug)]
pub struct PlotTransform {
    pub x_axis: CoordinateSpace,
    pub y_axis: CoordinateSpace,
    pub area: PlotArea,
}

impl PlotTransform {
    pub fn new(x_axis: CoordinateSpace, y_axis: CoordinateSpace, area: PlotArea) -> Self {
        Self {
            x_axis,
            y_axis,
            area,
        }
    }

    pub fn data_to_screen(&self, x: f64, y: f64) -> (f32, f32) {
        (self.x_data_to_screen(x), self.y_data_to_screen(y))
    }

    pub fn x_data_to_screen(&self, x: f64) -> f32 {
        self.area.x + self.x_axis.get_canvas_coordinate(x)
    }

    pub fn y_data_to_screen(&self, y: f64) -> f32 {
        self.area.y + self.y_axis.get_canvas_coordinate(y)
    }

    /// Screen y of the bottom of the plot area, used as the area-fill base.
    pub fn baseline(&self) -> f32 {
        self.area.y + self.area.height
    }
}
