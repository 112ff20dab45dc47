//! Engine configuration.
//!
//! Every field has a default so a partial JSON document (or none at all)
//! yields a usable configuration.

use chrono_tz::Tz;
use eyre::{ensure, Result, WrapErr};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Target pixel width per base tick on the time axis.
    pub tick_spacing_px: f64,
    /// Narrowest time window a chart may show, in seconds.
    pub min_span_secs: f64,
    /// Width of the initial window ending at "now", in seconds.
    pub default_window_secs: f64,
    /// Above this many points the nearest-point search uses binary search.
    pub nearest_scan_threshold: usize,
    /// Margin taken by a top/bottom axis, in pixels.
    pub horizontal_axis_size: f32,
    /// Margin taken by a left/right axis, in pixels.
    pub vertical_axis_size: f32,
    /// Target tick count on value axes.
    pub numeric_ticks: usize,
    /// Zone used for tick anchors and labels.
    pub timezone: Tz,
    pub follow_common_range: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            tick_spacing_px: 100.0,
            min_span_secs: 60.0,
            default_window_secs: 3600.0,
            nearest_scan_threshold: 64,
            horizontal_axis_size: 30.0,
            vertical_axis_size: 60.0,
            numeric_ticks: 5,
            timezone: Tz::UTC,
            follow_common_range: true,
        }
    }
}

impl ChartConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: ChartConfig =
            serde_json::from_str(s).wrap_err("failed to parse chart configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.tick_spacing_px.is_finite() && self.tick_spacing_px > 0.0,
            "tick_spacing_px must be finite and > 0, got {}",
            self.tick_spacing_px
        );
        ensure!(
            self.min_span_secs.is_finite() && self.min_span_secs > 0.0,
            "min_span_secs must be finite and > 0, got {}",
            self.min_span_secs
        );
        ensure!(
            self.default_window_secs.is_finite() && self.default_window_secs >= self.min_span_secs,
            "default_window_secs must be >= min_span_secs"
        );
        ensure!(
            self.horizontal_axis_size >= 0.0 && self.vertical_axis_size >= 0.0,
            "axis sizes must not be negative"
        );
        ensure!(self.numeric_ticks >= 2, "numeric_ticks must be at least 2");
        Ok(())
    }
}
