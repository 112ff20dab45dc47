use super::rules::TickRuleChain;
use super::{Tick, TickKind};
use crate::config::ChartConfig;
use tracing::trace;

/// Picks the finest granularity whose tick count fits the canvas and
/// produces the concrete ticks for a visible range.
#[derive(Clone, Debug)]
pub struct TimeAxisTickGenerator {
    chain: TickRuleChain,
    tick_spacing_px: f64,
}

impl Default for TimeAxisTickGenerator {
    fn default() -> Self {
        Self::from_config(&ChartConfig::default())
    }
}

impl TimeAxisTickGenerator {
    pub fn new(chain: TickRuleChain, tick_spacing_px: f64) -> Self {
        Self {
            chain,
            tick_spacing_px,
        }
    }

    pub fn from_config(config: &ChartConfig) -> Self {
        Self::new(TickRuleChain::new(config.timezone), config.tick_spacing_px)
    }

    pub fn chain(&self) -> &TickRuleChain {
        &self.chain
    }

    /// Index of the rule used for `[start, end]` on `canvas_size` pixels, or
    /// `None` when the input is degenerate.
    pub fn select_rule(&self, start: f64, end: f64, canvas_size: f64) -> Option<usize> {
        if !is_usable_size(canvas_size) || !start.is_finite() || !end.is_finite() || start == end {
            return None;
        }
        let duration = (end - start).abs();
        let base_ticks_count = (canvas_size / self.tick_spacing_px).floor();

        let selected = self
            .chain
            .rules()
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule.magnitude(duration) <= base_ticks_count)
            .map(|(i, _)| i)
            .last()
            .unwrap_or(0);
        trace!(
            duration,
            base_ticks_count,
            rule = ?self.chain.rules()[selected],
            "time axis rule selected"
        );
        Some(selected)
    }

    pub fn generate(&self, start: f64, end: f64, canvas_size: f64) -> Vec<Tick> {
        let Some(index) = self.select_rule(start, end, canvas_size) else {
            return Vec::new();
        };
        let (start, end) = if start < end { (start, end) } else { (end, start) };
        let ticks = self.chain.fill_range(index, start, end, true);

        let px_per_unit = canvas_size / (end - start);
        thin_intermediate(ticks, px_per_unit, self.tick_spacing_px / 2.0)
    }
}

fn is_usable_size(size: f64) -> bool {
    size.is_finite() && size > 0.0
}

/// Drops intermediate ticks that would land closer than `min_gap_px` to a
/// neighbouring tick; boundary and regular ticks are always kept.
fn thin_intermediate(ticks: Vec<Tick>, px_per_unit: f64, min_gap_px: f64) -> Vec<Tick> {
    let anchors: Vec<f64> = ticks
        .iter()
        .filter(|t| t.kind != TickKind::Intermediate)
        .map(|t| t.value)
        .collect();

    let mut kept: Vec<Tick> = Vec::with_capacity(ticks.len());
    for tick in ticks {
        if tick.kind == TickKind::Intermediate {
            let too_close_to_anchor = anchors
                .iter()
                .any(|a| (a - tick.value).abs() * px_per_unit < min_gap_px);
            let too_close_to_prev = kept
                .last()
                .is_some_and(|p| (tick.value - p.value) * px_per_unit < min_gap_px);
            if too_close_to_anchor || too_close_to_prev {
                continue;
            }
        }
        kept.push(tick);
    }
    kept
}
