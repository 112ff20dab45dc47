//! Linear value scale with "nice" tick generation for value axes.

use crate::data_types::ValueFormat;
use crate::utils::format::format_value;

#[derive(Clone, Debug, PartialEq)]
pub struct ChartScale {
    domain: (f64, f64),
    range: (f32, f32),
}

impl ChartScale {
    pub fn new_linear(domain: (f64, f64), range: (f32, f32)) -> Self {
        let mut scale = Self {
            domain: (0.0, 1.0),
            range,
        };
        scale.update_domain(domain.0, domain.1);
        scale
    }

    pub fn map(&self, value: f64) -> f32 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let t = (value - d0) / (d1 - d0);
        let res = r0 as f64 + t * (r1 - r0) as f64;
        if res.is_nan() || res.is_infinite() {
            0.0
        } else {
            res as f32
        }
    }

    pub fn invert(&self, pixel: f32) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = (r1 - r0) as f64;
        if span == 0.0 {
            return d0;
        }
        d0 + (pixel - r0) as f64 / span * (d1 - d0)
    }

    pub fn range(&self) -> (f32, f32) {
        self.range
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Zero-width domains are widened by ±0.5 so the mapping stays finite.
    pub fn update_domain(&mut self, min: f64, max: f64) {
        let mut d_min = min;
        let mut d_max = max;
        if !d_min.is_finite() || !d_max.is_finite() {
            d_min = 0.0;
            d_max = 1.0;
        }
        if (d_max - d_min).abs() < f64::EPSILON {
            d_min -= 0.5;
            d_max += 0.5;
        }
        self.domain = (d_min, d_max);
    }

    /// Domain extended outwards to multiples of the tick step.
    pub fn nice(&self, count: usize) -> (f64, f64) {
        let (d0, d1) = self.domain;
        let step = tick_step(d0, d1, count);
        if step <= 0.0 || !step.is_finite() {
            return self.domain;
        }
        ((d0 / step).floor() * step, (d1 / step).ceil() * step)
    }

    /// Roughly `count` round values covering the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.domain;
        let (lo, hi) = if d0 <= d1 { (d0, d1) } else { (d1, d0) };
        let step = tick_step(lo, hi, count);
        if step <= 0.0 || !step.is_finite() {
            return vec![];
        }
        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last)
            .map(|i| {
                let v = i as f64 * step;
                // Snap float noise such as 0.30000000000000004.
                (v / step).round() * step
            })
            .collect()
    }

    pub fn format_tick(&self, value: f64, format: ValueFormat) -> String {
        format_value(Some(value), format)
    }
}

/// 1, 2 or 5 times a power of ten, close to `span / count`.
pub fn tick_step(min: f64, max: f64, count: usize) -> f64 {
    let span = (max - min).abs();
    if span == 0.0 || count == 0 || !span.is_finite() {
        return 0.0;
    }
    let raw = span / count as f64;
    let power = 10f64.powf(raw.log10().floor());
    let error = raw / power;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * power
}
