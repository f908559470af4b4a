//! Arc entity

use super::{normalize_degrees, Entity, EntityCommon, EntityKind};
use crate::types::{BoundingBox2D, Transform, Vector2};
use serde::{Deserialize, Serialize};

/// A circular arc, angles in degrees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Arc {
    #[serde(flatten)]
    pub common: EntityCommon,
    pub center: Vector2,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    /// Sweep runs clockwise from start to end
    #[serde(default)]
    pub clockwise: bool,
}

impl Arc {
    /// Create a new counter-clockwise arc
    pub fn new(center: Vector2, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Arc {
            common: EntityCommon::new(),
            center,
            radius,
            start_angle,
            end_angle,
            clockwise: false,
        }
    }

    pub fn start_point(&self) -> Vector2 {
        Vector2::polar(self.center, self.radius, self.start_angle)
    }

    pub fn end_point(&self) -> Vector2 {
        Vector2::polar(self.center, self.radius, self.end_angle)
    }

    /// Swept angle in degrees, following the arc's direction
    pub fn sweep(&self) -> f64 {
        let ccw = normalize_degrees(self.end_angle - self.start_angle);
        if self.clockwise && ccw > 0.0 {
            360.0 - ccw
        } else {
            ccw
        }
    }
}

impl Default for Arc {
    fn default() -> Self {
        Arc::new(Vector2::ZERO, 1.0, 0.0, 90.0)
    }
}

impl Entity for Arc {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> EntityKind {
        EntityKind::Arc
    }

    fn apply_transform(&mut self, transform: &Transform) {
        let start = transform.apply(self.start_point());
        let end = transform.apply(self.end_point());
        self.center = transform.apply(self.center);
        self.start_angle = normalize_degrees((start - self.center).angle_degrees());
        self.end_angle = normalize_degrees((end - self.center).angle_degrees());
        if transform.is_reflection() {
            self.clockwise = !self.clockwise;
        }
    }

    /// Boundary points only; the curvature is not swept.
    fn bounding_box(&self) -> Option<BoundingBox2D> {
        BoundingBox2D::from_points(&[self.start_point(), self.end_point()])
    }
}
