//! Multi-line text label

use super::{Entity, EntityCommon, EntityKind};
use crate::types::{Transform, Vector2};
use serde::{Deserialize, Serialize};

/// Multi-line text anchored at an insertion point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MText {
    #[serde(flatten)]
    pub common: EntityCommon,
    /// Insertion point
    pub position: Vector2,
    /// Box-relative anchor of the insertion point, each component in 0..1
    #[serde(default)]
    pub anchor: Vector2,
    #[serde(default)]
    pub text: String,
    #[serde(default = "MText::default_font_size")]
    pub font_size: f64,
}

impl MText {
    pub fn new(position: Vector2, text: impl Into<String>) -> Self {
        MText {
            common: EntityCommon::new(),
            position,
            anchor: Vector2::ZERO,
            text: text.into(),
            font_size: Self::default_font_size(),
        }
    }

    /// Text lines as split on newlines
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    fn default_font_size() -> f64 {
        12.0
    }
}

impl Entity for MText {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> EntityKind {
        EntityKind::MText
    }

    fn apply_transform(&mut self, transform: &Transform) {
        self.position = transform.apply(self.position);
    }
}
