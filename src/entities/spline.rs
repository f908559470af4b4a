//! Spline entity

use super::{Entity, EntityCommon, EntityKind};
use crate::types::{Transform, Vector2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spline {
    #[serde(flatten)]
    pub common: EntityCommon,
    #[serde(default = "Spline::default_degree")]
    pub degree: u32,
    #[serde(default)]
    pub control_points: Vec<Vector2>,
    #[serde(default)]
    pub closed: bool,
}

impl Spline {
    pub fn new(control_points: Vec<Vector2>) -> Self {
        Spline {
            common: EntityCommon::new(),
            degree: Self::default_degree(),
            control_points,
            closed: false,
        }
    }

    fn default_degree() -> u32 {
        3
    }
}

impl Entity for Spline {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> EntityKind {
        EntityKind::Spline
    }

    fn apply_transform(&mut self, transform: &Transform) {
        for point in &mut self.control_points {
            *point = transform.apply(*point);
        }
    }
}
