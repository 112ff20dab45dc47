use crate::coordinate_space::AxisSnapshot;
use tracing::trace;

/// Hard limits of a monitored node's timeline plus the narrowest window
/// allowed inside them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowBounds {
    /// Node creation time (unix seconds).
    pub instance_from: f64,
    /// "Now" as of the last refresh (unix seconds).
    pub instance_to: f64,
    pub min_span: f64,
}

impl WindowBounds {
    pub fn new(instance_from: f64, instance_to: f64, min_span: f64) -> Self {
        Self {
            instance_from,
            instance_to,
            min_span,
        }
    }

    pub fn span(&self) -> f64 {
        (self.instance_to - self.instance_from).max(0.0)
    }
}

/// ViewController holds the pure window arithmetic behind panning, zooming
/// and range commits so it can be tested without pointer plumbing.
pub struct ViewController;

impl ViewController {
    /// Clamps a single timestamp into the node's lifetime. Idempotent.
    pub fn correct_date_to_fix_range(value: f64, bounds: &WindowBounds) -> f64 {
        if value < bounds.instance_from {
            bounds.instance_from
        } else if value > bounds.instance_to {
            bounds.instance_to
        } else {
            value
        }
    }

    /// Fits `[start, end]` inside the bounds while keeping its span.
    ///
    /// The span is first raised to the minimum and capped at the lifetime,
    /// then `end` is clamped and `start` re-derived from it, so a window that
    /// overflows on both sides still lands inside. When the lifetime itself
    /// is shorter than the minimum span the whole lifetime is returned.
    pub fn correct_range(start: f64, end: f64, bounds: &WindowBounds) -> (f64, f64) {
        if !start.is_finite() || !end.is_finite() {
            let range = bounds.min_span.min(bounds.span());
            return (bounds.instance_to - range, bounds.instance_to);
        }
        let (start, end) = if start <= end { (start, end) } else { (end, start) };

        let mut range = (end - start).max(bounds.min_span);
        if range > bounds.span() {
            range = bounds.span();
        }

        let new_start = start.max(bounds.instance_from);
        let new_end = (new_start + range).min(bounds.instance_to);
        let new_start = (new_end - range).max(bounds.instance_from);

        if (new_start, new_end) != (start, end) {
            trace!(start, end, new_start, new_end, "window corrected");
        }
        (new_start, new_end)
    }

    /// Window after dragging from `start_px` to `current_px` on an axis that
    /// looked like `snapshot` when the drag began. Dragging right reveals
    /// earlier data.
    pub fn pan(snapshot: &AxisSnapshot, start_px: f32, current_px: f32) -> (f64, f64) {
        let delta = (current_px - start_px) as f64 * snapshot.ratio;
        let start = snapshot.start - delta;
        (start, start + snapshot.span())
    }

    /// Ordered window spanned by a rubber-band selection.
    pub fn zoom_selection(a: f64, b: f64) -> (f64, f64) {
        (a.min(b), a.max(b))
    }

    /// The `width`-second window ending at the latest instant, fitted into
    /// the bounds.
    pub fn default_window(bounds: &WindowBounds, width: f64) -> (f64, f64) {
        Self::correct_range(bounds.instance_to - width, bounds.instance_to, bounds)
    }

    /// Shifts a window pinned to "now" so it ends at the latest instant,
    /// keeping its span. Other windows are only refitted into the bounds.
    pub fn follow_now(start: f64, end: f64, pinned: bool, bounds: &WindowBounds) -> (f64, f64) {
        if pinned {
            let span = end - start;
            Self::correct_range(bounds.instance_to - span, bounds.instance_to, bounds)
        } else {
            Self::correct_range(start, end, bounds)
        }
    }
}
