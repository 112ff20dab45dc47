use super::point::SeriesPoint;

/// The point currently under the cursor, with the pixel it was picked at.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverState {
    pub point: SeriesPoint,
    /// Canvas position of the pointer.
    pub pointer: (f32, f32),
    /// Canvas x of the hovered point itself.
    pub anchor_x: f32,
}

/// Hover position shared between sibling charts, in domain units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SharedHover {
    pub domain_x: Option<f64>,
    /// Index of the chart that originated the hover.
    pub source: Option<usize>,
}
