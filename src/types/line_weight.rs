//! Line weight representation for drawing entities

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stroke weight of an entity or layer
///
/// Stored as an integer in 1/100 mm, with three negative sentinels for
/// inherited weights. Serialized as that raw integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i16", into = "i16")]
pub enum LineWeight {
    /// Use the layer's line weight
    #[default]
    ByLayer,
    /// Use the block's line weight
    ByBlock,
    /// Default line weight
    Default,
    /// Specific line weight in 1/100 mm
    Value(i16),
}

impl LineWeight {
    /// Create a line weight from a raw value
    pub fn from_value(value: i16) -> Self {
        match value {
            -1 => LineWeight::ByLayer,
            -2 => LineWeight::ByBlock,
            -3 => LineWeight::Default,
            v => LineWeight::Value(v),
        }
    }

    /// Get the raw value
    pub fn value(&self) -> i16 {
        match self {
            LineWeight::ByLayer => -1,
            LineWeight::ByBlock => -2,
            LineWeight::Default => -3,
            LineWeight::Value(v) => *v,
        }
    }

    /// Get the line weight in millimeters
    pub fn millimeters(&self) -> Option<f64> {
        match self {
            LineWeight::Value(v) => Some(*v as f64 / 100.0),
            _ => None,
        }
    }

    pub fn is_by_layer(&self) -> bool {
        matches!(self, LineWeight::ByLayer)
    }

    pub const THIN: LineWeight = LineWeight::Value(13);
    pub const NORMAL: LineWeight = LineWeight::Value(25);
    pub const BOLD: LineWeight = LineWeight::Value(50);
}

impl From<i16> for LineWeight {
    fn from(value: i16) -> Self {
        LineWeight::from_value(value)
    }
}

impl From<LineWeight> for i16 {
    fn from(weight: LineWeight) -> Self {
        weight.value()
    }
}

impl fmt::Display for LineWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineWeight::ByLayer => write!(f, "ByLayer"),
            LineWeight::ByBlock => write!(f, "ByBlock"),
            LineWeight::Default => write!(f, "Default"),
            LineWeight::Value(v) => write!(f, "{:.2}mm", *v as f64 / 100.0),
        }
    }
}
