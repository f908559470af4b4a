//! Raster image entity

use super::{Entity, EntityCommon, EntityKind};
use crate::types::{Transform, Vector2};
use serde::{Deserialize, Serialize};

/// Placed raster image: a source rectangle of the bitmap drawn into a
/// target rectangle at `position`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(flatten)]
    pub common: EntityCommon,
    pub position: Vector2,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub source_x: f64,
    #[serde(default)]
    pub source_y: f64,
    #[serde(default)]
    pub source_width: f64,
    #[serde(default)]
    pub source_height: f64,
    /// Image location (path or URL)
    #[serde(default)]
    pub src: String,
}

impl Image {
    pub fn new(src: impl Into<String>, position: Vector2, width: f64, height: f64) -> Self {
        Image {
            common: EntityCommon::new(),
            position,
            width,
            height,
            source_x: 0.0,
            source_y: 0.0,
            source_width: width,
            source_height: height,
            src: src.into(),
        }
    }
}

impl Entity for Image {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> EntityKind {
        EntityKind::Image
    }

    fn apply_transform(&mut self, transform: &Transform) {
        self.position = transform.apply(self.position);
    }
}
