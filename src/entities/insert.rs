//! Block instance

use super::{Entity, EntityCommon, EntityKind};
use crate::types::{Transform, Vector2};
use serde::{Deserialize, Serialize};

/// Instance of an externally defined block
///
/// The block's geometry is not stored here; every transform applied to the
/// instance is accumulated in `block_transform` for the block renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insert {
    #[serde(flatten)]
    pub common: EntityCommon,
    pub block_name: String,
    pub position: Vector2,
    #[serde(default)]
    pub block_transform: Transform,
}

impl Insert {
    pub fn new(block_name: impl Into<String>, position: Vector2) -> Self {
        Insert {
            common: EntityCommon::new(),
            block_name: block_name.into(),
            position,
            block_transform: Transform::identity(),
        }
    }
}

impl Entity for Insert {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> EntityKind {
        EntityKind::Insert
    }

    fn apply_transform(&mut self, transform: &Transform) {
        self.position = transform.apply(self.position);
        self.block_transform = self.block_transform.then(transform);
    }
}
