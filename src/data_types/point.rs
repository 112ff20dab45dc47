use super::range::Range;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Selects one numeric field of a [`SeriesPoint`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ValueKey {
    Y,
    Percent,
    Field(String),
}

impl ValueKey {
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }
}

/// A chart point. `None` values are gaps and break line continuity.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Unix seconds.
    pub x: f64,
    pub y: Option<f64>,
    pub percent: Option<f64>,
    #[serde(default)]
    pub extra: BTreeMap<String, Option<f64>>,
}

impl SeriesPoint {
    pub fn new(x: f64, y: Option<f64>) -> Self {
        Self {
            x,
            y,
            ..Default::default()
        }
    }

    pub fn with_percent(mut self, percent: Option<f64>) -> Self {
        self.percent = percent;
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: Option<f64>) -> Self {
        self.extra.insert(name.into(), value);
        self
    }

    pub fn value(&self, key: &ValueKey) -> Option<f64> {
        let v = match key {
            ValueKey::Y => self.y,
            ValueKey::Percent => self.percent,
            ValueKey::Field(name) => self.extra.get(name).copied().flatten(),
        };
        v.filter(|v| v.is_finite())
    }
}

/// Precomputed min/max per field, maintained alongside the point array so
/// axis sizing never rescans the samples.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Ranges {
    pub x: Range,
    pub y: Range,
    pub percent: Range,
    pub fields: BTreeMap<String, Range>,
}

impl Ranges {
    pub fn from_points(points: &[SeriesPoint]) -> Self {
        let mut ranges = Ranges::default();
        for point in points {
            ranges.include(point);
        }
        ranges
    }

    pub fn include(&mut self, point: &SeriesPoint) {
        self.x.include(point.x);
        if let Some(y) = point.y {
            self.y.include(y);
        }
        if let Some(p) = point.percent {
            self.percent.include(p);
        }
        for (name, value) in &point.extra {
            let entry = self.fields.entry(name.clone()).or_default();
            if let Some(v) = value {
                entry.include(*v);
            }
        }
    }

    pub fn get(&self, key: &ValueKey) -> Range {
        match key {
            ValueKey::Y => self.y,
            ValueKey::Percent => self.percent,
            ValueKey::Field(name) => self.fields.get(name).copied().unwrap_or_default(),
        }
    }
}
