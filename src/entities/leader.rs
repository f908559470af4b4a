//! Leader entity

use super::{Entity, EntityCommon, EntityKind};
use crate::types::{Transform, Vector2};
use serde::{Deserialize, Serialize};

/// Polyline leader, optionally ending in an arrowhead at the first vertex
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leader {
    #[serde(flatten)]
    pub common: EntityCommon,
    #[serde(default)]
    pub vertices: Vec<Vector2>,
    #[serde(default = "Leader::default_arrowhead")]
    pub arrowhead: bool,
}

impl Leader {
    pub fn new(vertices: Vec<Vector2>) -> Self {
        Leader {
            common: EntityCommon::new(),
            vertices,
            arrowhead: true,
        }
    }

    fn default_arrowhead() -> bool {
        true
    }
}

impl Entity for Leader {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> EntityKind {
        EntityKind::Leader
    }

    fn apply_transform(&mut self, transform: &Transform) {
        for vertex in &mut self.vertices {
            *vertex = transform.apply(*vertex);
        }
    }
}
