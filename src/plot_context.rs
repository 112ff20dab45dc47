//! Registry of the axes and series attached to one chart, plus the layout
//! and hit-testing that depends on all of them together.

use crate::config::ChartConfig;
use crate::coordinate_space::CoordinateSpace;
use crate::data_types::{ChartDataset, HoverState, PlotSeries, Range, SeriesPoint};
use crate::gutter_manager::{GutterManager, Gutters};
use crate::scales::ChartScale;
use crate::transform::PlotTransform;
use tracing::trace;

/// Inner rectangle where series are drawn, in canvas pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlotArea {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PlotArea {
    /// Strict containment; points on the border are outside.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.x < x && x < self.x + self.width && self.y < y && y < self.y + self.height
    }
}

#[derive(Clone, Debug)]
pub struct PlotContext {
    axes: Vec<CoordinateSpace>,
    plots: Vec<PlotSeries>,
    data: ChartDataset,
    width: f32,
    height: f32,
    gutters: Gutters,
    hover: Option<HoverState>,
    nearest_scan_threshold: usize,
    numeric_ticks: usize,
}

impl Default for PlotContext {
    fn default() -> Self {
        Self::new(&ChartConfig::default())
    }
}

impl PlotContext {
    pub fn new(config: &ChartConfig) -> Self {
        Self {
            axes: Vec::new(),
            plots: Vec::new(),
            data: ChartDataset::default(),
            width: 0.0,
            height: 0.0,
            gutters: Gutters::default(),
            hover: None,
            nearest_scan_threshold: config.nearest_scan_threshold,
            numeric_ticks: config.numeric_ticks,
        }
    }

    // --- Axes -------------------------------------------------------------

    /// Attaches an axis, replacing any axis with the same identifier.
    pub fn register_axis(&mut self, axis: CoordinateSpace) {
        match self
            .axes
            .iter_mut()
            .find(|a| a.identifier() == axis.identifier())
        {
            Some(existing) => *existing = axis,
            None => self.axes.push(axis),
        }
        self.layout();
    }

    pub fn unregister_axis(&mut self, identifier: &str) -> Option<CoordinateSpace> {
        let pos = self.axes.iter().position(|a| a.identifier() == identifier)?;
        let axis = self.axes.remove(pos);
        self.layout();
        Some(axis)
    }

    pub fn axes(&self) -> &[CoordinateSpace] {
        &self.axes
    }

    pub fn axis(&self, identifier: &str) -> Option<&CoordinateSpace> {
        self.axes.iter().find(|a| a.identifier() == identifier)
    }

    pub fn axis_mut(&mut self, identifier: &str) -> Option<&mut CoordinateSpace> {
        self.axes.iter_mut().find(|a| a.identifier() == identifier)
    }

    /// First axis on the top or bottom edge.
    pub fn x_axis(&self) -> Option<&CoordinateSpace> {
        self.axes.iter().find(|a| a.position().is_horizontal())
    }

    pub fn x_axis_mut(&mut self) -> Option<&mut CoordinateSpace> {
        self.axes.iter_mut().find(|a| a.position().is_horizontal())
    }

    /// First axis on the left or right edge.
    pub fn y_axis(&self) -> Option<&CoordinateSpace> {
        self.axes.iter().find(|a| a.position().is_vertical())
    }

    /// Sets the visible range of the primary x-axis.
    pub fn set_x_range(&mut self, start: f64, end: f64) {
        if let Some(axis) = self.x_axis_mut() {
            axis.set_range(start, end);
        }
    }

    // --- Series -----------------------------------------------------------

    pub fn add_plot(&mut self, series: PlotSeries) {
        self.plots.retain(|p| p.name != series.name);
        self.plots.push(series);
    }

    pub fn plots(&self) -> &[PlotSeries] {
        &self.plots
    }

    pub fn clear_plots(&mut self) {
        self.plots.clear();
    }

    // --- Layout -----------------------------------------------------------

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        self.height = if height.is_finite() { height.max(0.0) } else { 0.0 };
        self.layout();
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn gutters(&self) -> Gutters {
        self.gutters
    }

    pub fn plot_area(&self) -> PlotArea {
        let g = self.gutters;
        PlotArea {
            x: g.left,
            y: g.top,
            width: (self.width - g.left - g.right).max(0.0),
            height: (self.height - g.top - g.bottom).max(0.0),
        }
    }

    fn layout(&mut self) {
        self.gutters = GutterManager::calculate(&self.axes);
        let area = self.plot_area();
        for axis in self.axes.iter_mut() {
            if axis.position().is_horizontal() {
                axis.set_pixel_size(area.width);
            } else {
                axis.set_pixel_size(area.height);
            }
        }
    }

    /// Transform between the primary x-axis and the named (or primary)
    /// y-axis.
    pub fn transform(&self, y_axis: Option<&str>) -> Option<PlotTransform> {
        let x = self.x_axis()?;
        let y = match y_axis {
            Some(id) => self.axis(id)?,
            None => self.y_axis()?,
        };
        Some(PlotTransform::new(x.clone(), y.clone(), self.plot_area()))
    }

    // --- Data -------------------------------------------------------------

    /// Replaces the dataset. Hover state refers into the old points, so it
    /// is cleared.
    pub fn set_data(&mut self, data: ChartDataset) {
        trace!(points = data.len(), revision = data.revision, "plot data replaced");
        self.data = data;
        self.hover = None;
    }

    pub fn data(&self) -> &ChartDataset {
        &self.data
    }

    /// Union of the precomputed ranges of every series bound to the axis.
    /// For the x-axis this is the time extent of the data.
    pub fn get_data_range(&self, identifier: &str) -> Range {
        let Some(axis) = self.axis(identifier) else {
            return Range::EMPTY;
        };
        if axis.position().is_horizontal() {
            return self.data.ranges.x;
        }
        self.plots
            .iter()
            .filter(|p| p.axis == identifier)
            .map(|p| self.data.ranges.get(&p.value))
            .fold(Range::EMPTY, |acc, r| acc.union(&r))
    }

    /// Fits a value axis to its data range, anchored at zero and extended
    /// to round tick values. Axes without data keep their range.
    pub fn fit_axis(&mut self, identifier: &str) {
        let range = self.get_data_range(identifier);
        let numeric_ticks = self.numeric_ticks;
        let Some(axis) = self.axis_mut(identifier) else {
            return;
        };
        if axis.position().is_horizontal() {
            return;
        }
        let Some((min, max)) = range.as_option() else {
            return;
        };
        let scale = ChartScale::new_linear((min.min(0.0), max), (0.0, 1.0));
        let (lo, hi) = scale.nice(numeric_ticks);
        axis.set_range(lo, hi);
    }

    pub fn fit_value_axes(&mut self) {
        let ids: Vec<String> = self
            .axes
            .iter()
            .filter(|a| a.position().is_vertical())
            .map(|a| a.identifier().to_string())
            .collect();
        for id in ids {
            self.fit_axis(&id);
        }
    }

    // --- Hit testing ------------------------------------------------------

    /// Point nearest in time to the canvas position, or `None` when the
    /// position is outside the plot area or there is no data.
    ///
    /// `axis` selects the horizontal axis used for the pixel conversion;
    /// the primary x-axis by default.
    pub fn get_nearest_item(&self, x: f32, y: f32, axis: Option<&str>) -> Option<&SeriesPoint> {
        let index = self.nearest_index_at(x, y, axis)?;
        self.data.points.get(index)
    }

    pub fn nearest_index_at(&self, x: f32, y: f32, axis: Option<&str>) -> Option<usize> {
        let area = self.plot_area();
        if !area.contains(x, y) {
            return None;
        }
        let axis = match axis {
            Some(id) => self.axis(id)?,
            None => self.x_axis()?,
        };
        let domain_x = axis.get_plot_coordinate(x - area.x);
        self.nearest_index_to(domain_x)
    }

    /// Point nearest to a domain x, regardless of pointer position.
    pub fn nearest_index_to(&self, domain_x: f64) -> Option<usize> {
        self.data.nearest_index(domain_x, self.nearest_scan_threshold)
    }

    // --- Hover ------------------------------------------------------------

    pub fn hover(&self) -> Option<&HoverState> {
        self.hover.as_ref()
    }

    pub fn set_hover(&mut self, hover: Option<HoverState>) {
        self.hover = hover;
    }

    /// Hovers the point nearest to `domain_x`, e.g. when mirroring a sibling
    /// chart's cursor.
    pub fn hover_domain_x(&mut self, domain_x: Option<f64>) {
        let hover = domain_x.and_then(|dx| {
            let index = self.nearest_index_to(dx)?;
            let point = self.data.points.get(index)?.clone();
            let area = self.plot_area();
            let anchor_x = area.x + self.x_axis()?.get_canvas_coordinate(point.x);
            Some(HoverState {
                point,
                pointer: (anchor_x, area.y + area.height / 2.0),
                anchor_x,
            })
        });
        self.hover = hover;
    }
}
