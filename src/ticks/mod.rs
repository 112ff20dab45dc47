//! Time-axis tick selection.

pub mod generator;
pub mod rules;

pub use generator::TimeAxisTickGenerator;
pub use rules::{Granularity, TickRuleChain};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TickKind {
    /// Start or end of the visible range, carries a full date label.
    Boundary,
    Regular,
    /// Finer hint filling the edge of a sparse grid.
    Intermediate,
}

impl TickKind {
    fn priority(&self) -> u8 {
        match self {
            Self::Boundary => 0,
            Self::Regular => 1,
            Self::Intermediate => 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// Unix seconds.
    pub value: f64,
    pub label: String,
    pub kind: TickKind,
}
