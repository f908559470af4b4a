//! Coordinate axes and axis masks

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single drawing axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// The perpendicular axis
    pub fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// Both axes in x, y order
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

bitflags! {
    /// Set of axes a constraint fixes
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AxisMask: u8 {
        const X = 0b01;
        const Y = 0b10;
    }
}

impl From<Axis> for AxisMask {
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::X => AxisMask::X,
            Axis::Y => AxisMask::Y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_other() {
        assert_eq!(Axis::X.other(), Axis::Y);
        assert_eq!(Axis::Y.other(), Axis::X);
    }

    #[test]
    fn test_axis_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Axis::X).unwrap(), "\"x\"");
        let axis: Axis = serde_json::from_str("\"y\"").unwrap();
        assert_eq!(axis, Axis::Y);
    }

    #[test]
    fn test_mask_from_axis() {
        let mut mask = AxisMask::from(Axis::X);
        assert!(mask.contains(AxisMask::X));
        mask |= Axis::Y.into();
        assert_eq!(mask, AxisMask::all());
        assert_eq!(mask - AxisMask::X, AxisMask::Y);
    }
}
