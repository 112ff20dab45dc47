use serde::{Deserialize, Serialize};

/// Which side of the plot area an axis sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisPosition {
    Left,
    Right,
    Top,
    Bottom,
}

impl AxisPosition {
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    pub fn is_vertical(&self) -> bool {
        !self.is_horizontal()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisDataType {
    /// Unix seconds.
    Time,
    #[default]
    Numeric,
}

/// How values on a numeric axis are rendered in labels and tooltips.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueFormat {
    #[default]
    Plain,
    Bytes,
    /// Values already divided by 1024².
    Mebibytes,
    Percent,
    Load,
}
