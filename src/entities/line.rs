//! Line entity

use super::{Entity, EntityCommon, EntityKind};
use crate::types::{BoundingBox2D, Transform, Vector2};
use serde::{Deserialize, Serialize};

/// A line segment defined by two endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    /// Common entity data
    #[serde(flatten)]
    pub common: EntityCommon,
    /// Start point of the line
    pub start: Vector2,
    /// End point of the line
    pub end: Vector2,
    /// Length label shown next to the line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_label: Option<String>,
    /// Formula the length label is computed from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula_label: Option<String>,
}

impl Line {
    /// Create a new line between two points
    pub fn new(start: Vector2, end: Vector2) -> Self {
        Line {
            common: EntityCommon::new(),
            start,
            end,
            length_label: None,
            formula_label: None,
        }
    }

    /// Create a new line from coordinates
    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Line::new(Vector2::new(x1, y1), Vector2::new(x2, y2))
    }

    /// Get the length of the line
    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    /// Get the direction vector (normalized)
    pub fn direction(&self) -> Vector2 {
        (self.end - self.start).normalize()
    }

    /// Get the midpoint of the line
    pub fn midpoint(&self) -> Vector2 {
        (self.start + self.end) / 2.0
    }
}

impl Default for Line {
    fn default() -> Self {
        Line::new(Vector2::ZERO, Vector2::ZERO)
    }
}

impl Entity for Line {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> EntityKind {
        EntityKind::Line
    }

    fn apply_transform(&mut self, transform: &Transform) {
        self.start = transform.apply(self.start);
        self.end = transform.apply(self.end);
    }

    fn bounding_box(&self) -> Option<BoundingBox2D> {
        BoundingBox2D::from_points(&[self.start, self.end])
    }
}
