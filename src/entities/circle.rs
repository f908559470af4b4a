//! Circle entity

use super::{Entity, EntityCommon, EntityKind};
use crate::types::{BoundingBox2D, Transform, Vector2};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A circle entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Circle {
    #[serde(flatten)]
    pub common: EntityCommon,
    pub center: Vector2,
    pub radius: f64,
}

impl Circle {
    /// Create a new circle
    pub fn new(center: Vector2, radius: f64) -> Self {
        Circle {
            common: EntityCommon::new(),
            center,
            radius,
        }
    }

    pub fn diameter(&self) -> f64 {
        self.radius * 2.0
    }

    pub fn circumference(&self) -> f64 {
        2.0 * PI * self.radius
    }
}

impl Default for Circle {
    fn default() -> Self {
        Circle::new(Vector2::ZERO, 1.0)
    }
}

impl Entity for Circle {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> EntityKind {
        EntityKind::Circle
    }

    /// Moves the center; the radius is kept as is, also under scaling.
    fn apply_transform(&mut self, transform: &Transform) {
        self.center = transform.apply(self.center);
    }

    fn bounding_box(&self) -> Option<BoundingBox2D> {
        let r = Vector2::new(self.radius, self.radius);
        BoundingBox2D::from_points(&[self.center - r, self.center + r])
    }
}
