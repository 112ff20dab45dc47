use super::point::{Ranges, SeriesPoint};
use std::sync::Arc;

/// Immutable view of one dataset handed to plots. Cloning is cheap; a new
/// fetch produces a new snapshot rather than mutating this one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartDataset {
    pub points: Arc<Vec<SeriesPoint>>,
    pub ranges: Arc<Ranges>,
    /// Whether `points` is ordered by `x`.
    pub sorted: bool,
    pub revision: u64,
}

impl ChartDataset {
    pub fn new(points: Vec<SeriesPoint>) -> Self {
        let ranges = Ranges::from_points(&points);
        let sorted = points.windows(2).all(|w| w[0].x <= w[1].x);
        Self {
            points: Arc::new(points),
            ranges: Arc::new(ranges),
            sorted,
            revision: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Index of the point closest in time to `x`; ties go to the earlier
    /// point. Sorted data above `scan_threshold` points is binary searched.
    pub fn nearest_index(&self, x: f64, scan_threshold: usize) -> Option<usize> {
        if self.points.is_empty() || !x.is_finite() {
            return None;
        }
        if !self.sorted || self.points.len() <= scan_threshold {
            return nearest_linear(&self.points, x);
        }
        Some(nearest_sorted(&self.points, x))
    }
}

fn nearest_linear(points: &[SeriesPoint], x: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, p) in points.iter().enumerate() {
        if !p.x.is_finite() {
            continue;
        }
        let d = (p.x - x).abs();
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

fn nearest_sorted(points: &[SeriesPoint], x: f64) -> usize {
    let idx = points.partition_point(|p| p.x < x);
    let mut best = if idx == 0 {
        0
    } else if idx == points.len() {
        idx - 1
    } else if x - points[idx - 1].x <= points[idx].x - x {
        idx - 1
    } else {
        idx
    };
    while best > 0 && points[best - 1].x == points[best].x {
        best -= 1;
    }
    best
}
