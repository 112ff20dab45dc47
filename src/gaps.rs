//! Continuity of series across missing values.
//!
//! A point whose value is `None` for a key is a gap for that key: lines and
//! areas stop before it and resume after it.

use crate::data_types::{SeriesPoint, ValueKey};
use std::ops::Range;

/// Index ranges of maximal runs of points that have a value for `key`.
pub fn segment_ranges(points: &[SeriesPoint], key: &ValueKey) -> Vec<Range<usize>> {
    let mut segments = Vec::new();
    let mut current: Option<usize> = None;
    for (i, point) in points.iter().enumerate() {
        match (point.value(key).is_some(), current) {
            (true, None) => current = Some(i),
            (false, Some(start)) => {
                segments.push(start..i);
                current = None;
            }
            _ => {}
        }
    }
    if let Some(start) = current {
        segments.push(start..points.len());
    }
    segments
}

/// `(x, value)` runs for `key`, one per contiguous segment.
pub fn split_segments(points: &[SeriesPoint], key: &ValueKey) -> Vec<Vec<(f64, f64)>> {
    segment_ranges(points, key)
        .into_iter()
        .map(|r| {
            points[r]
                .iter()
                .filter_map(|p| p.value(key).map(|v| (p.x, v)))
                .collect()
        })
        .collect()
}

/// Range of indices worth drawing for `[x_min, x_max]` on time-sorted
/// points, keeping one point on each side so lines reach the edges.
pub fn visible_range(points: &[SeriesPoint], sorted: bool, x_min: f64, x_max: f64) -> Range<usize> {
    if !sorted {
        return 0..points.len();
    }
    let start = points.partition_point(|p| p.x < x_min).saturating_sub(1);
    let end = (points.partition_point(|p| p.x <= x_max) + 1).min(points.len());
    start..end.max(start)
}
