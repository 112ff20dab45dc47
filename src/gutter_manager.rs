use crate::coordinate_space::CoordinateSpace;
use crate::data_types::AxisPosition;

/// Space reserved around the plot area by the axes on each side.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Gutters {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

pub struct GutterManager;

impl GutterManager {
    /// Sums the sizes of co-positioned axes.
    pub fn calculate(axes: &[CoordinateSpace]) -> Gutters {
        let mut g = Gutters::default();
        for axis in axes {
            match axis.position() {
                AxisPosition::Left => g.left += axis.size(),
                AxisPosition::Right => g.right += axis.size(),
                AxisPosition::Top => g.top += axis.size(),
                AxisPosition::Bottom => g.bottom += axis.size(),
            }
        }
        g
    }
}
