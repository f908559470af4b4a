//! Linear dimension entity
//!
//! A dimension stores references to the two entities it measures rather
//! than its own geometry. The rendered points are derived on demand by
//! [`crate::dimension_geometry`], unless the dimension carries baked
//! definition points.

use super::{Entity, EntityCommon, EntityKind};
use crate::types::{Axis, Transform, Vector2};
use serde::{Deserialize, Serialize};

/// Which point of a referenced entity the dimension measures from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityLocation {
    #[default]
    Start,
    End,
    Center,
    /// Endpoint with the smaller coordinate along the measured axis
    Min,
    /// Endpoint with the larger coordinate along the measured axis
    Max,
    MinX,
    MaxX,
    MinY,
    MaxY,
}

/// Reference to a measured entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionTarget {
    pub id: String,
    #[serde(default)]
    pub location: EntityLocation,
}

impl DimensionTarget {
    pub fn new(id: impl Into<String>, location: EntityLocation) -> Self {
        DimensionTarget {
            id: id.into(),
            location,
        }
    }
}

/// Policy choosing the entity whose anchor sets the dimension line level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DimensionRef {
    #[default]
    Entity1,
    Entity2,
    Longer,
    Shorter,
    MinX,
    MaxX,
    MinY,
    MaxY,
}

/// Linear dimension between two referenced entities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    #[serde(flatten)]
    pub common: EntityCommon,
    pub entity1: DimensionTarget,
    pub entity2: DimensionTarget,
    /// Measured axis; the offset is applied along the other one
    pub axis: Axis,
    /// Signed distance of the dimension line from the driving anchor
    #[serde(default)]
    pub offset: f64,
    /// Fixed perpendicular coordinate of the dimension line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_offset: Option<f64>,
    /// Baked `[line point, anchor 1, anchor 2]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition_points: Option<Vec<Vector2>>,
    #[serde(rename = "ref", default)]
    pub reference: DimensionRef,
    /// Text override; the measured value is shown otherwise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Dimension {
    pub fn new(entity1: DimensionTarget, entity2: DimensionTarget, axis: Axis, offset: f64) -> Self {
        Dimension {
            common: EntityCommon::new(),
            entity1,
            entity2,
            axis,
            offset,
            secondary_offset: None,
            definition_points: None,
            reference: DimensionRef::default(),
            text: None,
        }
    }

    /// Baked points, when exactly three are present
    pub fn baked_points(&self) -> Option<[Vector2; 3]> {
        match self.definition_points.as_deref() {
            Some([p0, p1, p2]) => Some([*p0, *p1, *p2]),
            _ => None,
        }
    }
}

impl Entity for Dimension {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> EntityKind {
        EntityKind::Dimension
    }

    /// Only baked points move; the references follow their own entities.
    fn apply_transform(&mut self, transform: &Transform) {
        if let Some(points) = &mut self.definition_points {
            for point in points.iter_mut() {
                *point = transform.apply(*point);
            }
        }
    }
}
