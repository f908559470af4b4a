//! Hatch entity

use super::{Entity, EntityCommon, EntityKind};
use crate::types::{Transform, Vector2};
use serde::{Deserialize, Serialize};

/// Straight boundary edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HatchEdge {
    pub start: Vector2,
    pub end: Vector2,
}

/// Closed boundary path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HatchPath {
    #[serde(default)]
    pub edges: Vec<HatchEdge>,
    #[serde(default)]
    pub vertices: Vec<Vector2>,
}

impl HatchPath {
    /// Closed polygon path through the given vertices
    pub fn polygon(vertices: Vec<Vector2>) -> Self {
        let edges = vertices
            .iter()
            .zip(vertices.iter().cycle().skip(1))
            .map(|(start, end)| HatchEdge {
                start: *start,
                end: *end,
            })
            .collect();
        HatchPath { edges, vertices }
    }
}

/// Filled region bounded by closed paths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hatch {
    #[serde(flatten)]
    pub common: EntityCommon,
    #[serde(default)]
    pub paths: Vec<HatchPath>,
    #[serde(default = "Hatch::default_pattern")]
    pub pattern: String,
}

impl Hatch {
    pub fn new(paths: Vec<HatchPath>) -> Self {
        Hatch {
            common: EntityCommon::new(),
            paths,
            pattern: Self::default_pattern(),
        }
    }

    fn default_pattern() -> String {
        "SOLID".to_string()
    }
}

impl Entity for Hatch {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> EntityKind {
        EntityKind::Hatch
    }

    fn apply_transform(&mut self, transform: &Transform) {
        for path in &mut self.paths {
            for edge in &mut path.edges {
                edge.start = transform.apply(edge.start);
                edge.end = transform.apply(edge.end);
            }
            for vertex in &mut path.vertices {
                *vertex = transform.apply(*vertex);
            }
        }
    }

    // Hatches never contribute to extents.
}
