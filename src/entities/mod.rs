//! Drawing entity types and traits

use crate::error::{DrawingError, Result};
use crate::id::new_id;
use crate::types::{BoundingBox2D, Color, LineWeight, Transform, Vector2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod arc;
pub mod circle;
pub mod dimension;
pub mod hatch;
pub mod image;
pub mod insert;
pub mod leader;
pub mod line;
pub mod mtext;
pub mod spline;

pub use arc::Arc;
pub use circle::Circle;
pub use dimension::{Dimension, DimensionRef, DimensionTarget, EntityLocation};
pub use hatch::{Hatch, HatchEdge, HatchPath};
pub use image::Image;
pub use insert::Insert;
pub use leader::Leader;
pub use line::Line;
pub use mtext::MText;
pub use spline::Spline;

/// Base trait for all drawing entities
///
/// Variants only supply their common data, their kind and their geometric
/// transform law; the accessors are provided on top of that.
pub trait Entity {
    /// Shared entity data
    fn common(&self) -> &EntityCommon;

    /// Mutable shared entity data
    fn common_mut(&mut self) -> &mut EntityCommon;

    /// Variant of this entity
    fn entity_type(&self) -> EntityKind;

    /// Rewrite the entity's own geometry under an affine transform
    fn apply_transform(&mut self, transform: &Transform);

    /// Extent of the entity's own geometry, `None` when it contributes nothing
    fn bounding_box(&self) -> Option<BoundingBox2D> {
        None
    }

    fn id(&self) -> &str {
        &self.common().id
    }

    fn set_id(&mut self, id: String) {
        self.common_mut().id = id;
    }

    fn layer(&self) -> &str {
        &self.common().layer
    }

    fn set_layer(&mut self, layer: String) {
        self.common_mut().layer = layer;
    }

    fn color(&self) -> Color {
        self.common().color
    }

    fn set_color(&mut self, color: Color) {
        self.common_mut().color = color;
    }

    fn line_weight(&self) -> LineWeight {
        self.common().line_weight
    }

    fn set_line_weight(&mut self, weight: LineWeight) {
        self.common_mut().line_weight = weight;
    }

    fn is_visible(&self) -> bool {
        self.common().visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.common_mut().visible = visible;
    }

    /// Move the entity by an offset
    fn translate(&mut self, offset: Vector2) {
        self.apply_transform(&Transform::from_translation(offset));
    }
}

/// Common entity data shared by all entities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityCommon {
    /// Identifier, unique within the owning collection
    #[serde(default)]
    pub id: String,
    /// Layer name
    #[serde(default = "EntityCommon::default_layer")]
    pub layer: String,
    #[serde(default)]
    pub color: Color,
    #[serde(rename = "lineweight", default)]
    pub line_weight: LineWeight,
    #[serde(default = "EntityCommon::default_visible")]
    pub visible: bool,
    /// Nested entities transformed together with their owner
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<EntityType>,
    /// Transform recorded by a non-altering `transform` call
    #[serde(skip)]
    pub pending: Option<Transform>,
}

impl EntityCommon {
    /// Create new common entity data with a fresh id
    pub fn new() -> Self {
        EntityCommon {
            id: new_id(),
            layer: Self::default_layer(),
            color: Color::ByLayer,
            line_weight: LineWeight::ByLayer,
            visible: true,
            children: Vec::new(),
            pending: None,
        }
    }

    /// Create with a specific layer
    pub fn with_layer(layer: impl Into<String>) -> Self {
        EntityCommon {
            layer: layer.into(),
            ..Self::new()
        }
    }

    fn default_layer() -> String {
        "0".to_string()
    }

    fn default_visible() -> bool {
        true
    }
}

impl Default for EntityCommon {
    fn default() -> Self {
        Self::new()
    }
}

/// Entity variant name, also used as the collection bucket key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Line,
    Arc,
    Circle,
    MText,
    Dimension,
    Hatch,
    Spline,
    Leader,
    Insert,
    Image,
}

impl EntityKind {
    /// All variants in bucket order
    pub const ALL: [EntityKind; 10] = [
        EntityKind::Line,
        EntityKind::Arc,
        EntityKind::Circle,
        EntityKind::MText,
        EntityKind::Dimension,
        EntityKind::Hatch,
        EntityKind::Spline,
        EntityKind::Leader,
        EntityKind::Insert,
        EntityKind::Image,
    ];

    /// Serialized name of the variant
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Line => "line",
            EntityKind::Arc => "arc",
            EntityKind::Circle => "circle",
            EntityKind::MText => "mtext",
            EntityKind::Dimension => "dimension",
            EntityKind::Hatch => "hatch",
            EntityKind::Spline => "spline",
            EntityKind::Leader => "leader",
            EntityKind::Insert => "insert",
            EntityKind::Image => "image",
        }
    }
}

impl FromStr for EntityKind {
    type Err = DrawingError;

    fn from_str(s: &str) -> Result<Self> {
        EntityKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DrawingError::InvalidEntityType(s.to_string()))
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed set of entity variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EntityType {
    Line(Line),
    Arc(Arc),
    Circle(Circle),
    MText(MText),
    Dimension(Dimension),
    Hatch(Hatch),
    Spline(Spline),
    Leader(Leader),
    Insert(Insert),
    Image(Image),
}

impl EntityType {
    /// Get a reference to the entity trait object
    pub fn as_entity(&self) -> &dyn Entity {
        match self {
            EntityType::Line(e) => e,
            EntityType::Arc(e) => e,
            EntityType::Circle(e) => e,
            EntityType::MText(e) => e,
            EntityType::Dimension(e) => e,
            EntityType::Hatch(e) => e,
            EntityType::Spline(e) => e,
            EntityType::Leader(e) => e,
            EntityType::Insert(e) => e,
            EntityType::Image(e) => e,
        }
    }

    /// Get a mutable reference to the entity trait object
    pub fn as_entity_mut(&mut self) -> &mut dyn Entity {
        match self {
            EntityType::Line(e) => e,
            EntityType::Arc(e) => e,
            EntityType::Circle(e) => e,
            EntityType::MText(e) => e,
            EntityType::Dimension(e) => e,
            EntityType::Hatch(e) => e,
            EntityType::Spline(e) => e,
            EntityType::Leader(e) => e,
            EntityType::Insert(e) => e,
            EntityType::Image(e) => e,
        }
    }

    /// Build an entity from its exported JSON form
    ///
    /// Fails with `InvalidEntityType` for an unrecognized `type` tag and
    /// with `InvalidData` for any other malformed payload.
    pub fn from_value(value: serde_json::Value) -> Result<EntityType> {
        let tag = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| DrawingError::InvalidData("entity without a type tag".to_string()))?;
        tag.parse::<EntityKind>()?;
        serde_json::from_value(value).map_err(|e| DrawingError::InvalidData(e.to_string()))
    }

    pub fn common(&self) -> &EntityCommon {
        self.as_entity().common()
    }

    pub fn common_mut(&mut self) -> &mut EntityCommon {
        self.as_entity_mut().common_mut()
    }

    pub fn id(&self) -> &str {
        &self.common().id
    }

    pub fn kind(&self) -> EntityKind {
        self.as_entity().entity_type()
    }

    pub fn is_visible(&self) -> bool {
        self.common().visible
    }

    /// Builder-style id override
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.common_mut().id = id.into();
        self
    }

    /// Builder-style layer override
    pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
        self.common_mut().layer = layer.into();
        self
    }

    /// Transform the entity and its children.
    ///
    /// With `alter` the geometry is rewritten immediately; otherwise the
    /// matrix is accumulated and only applied by [`EntityType::apply_pending`].
    pub fn transform(&mut self, transform: &Transform, alter: bool) {
        if !alter {
            let common = self.common_mut();
            common.pending = Some(match common.pending {
                Some(pending) => pending.then(transform),
                None => *transform,
            });
            return;
        }
        self.as_entity_mut().apply_transform(transform);
        for child in &mut self.common_mut().children {
            child.transform(transform, true);
        }
    }

    /// Bake a deferred transform into the geometry
    pub fn apply_pending(&mut self) {
        if let Some(pending) = self.common_mut().pending.take() {
            self.transform(&pending, true);
        }
        for child in &mut self.common_mut().children {
            child.apply_pending();
        }
    }

    pub fn translate(&mut self, offset: Vector2) {
        self.transform(&Transform::from_translation(offset), true);
    }

    /// Own extent of the entity (children are not included)
    pub fn bounding_box(&self) -> Option<BoundingBox2D> {
        self.as_entity().bounding_box()
    }

    /// The two points an alignment or dimension reads off a line-like entity
    ///
    /// Lines give their endpoints, arcs their boundary points, circles a
    /// zero-length segment at the center.
    pub fn endpoints(&self) -> Option<(Vector2, Vector2)> {
        match self {
            EntityType::Line(line) => Some((line.start, line.end)),
            EntityType::Arc(arc) => Some((arc.start_point(), arc.end_point())),
            EntityType::Circle(circle) => Some((circle.center, circle.center)),
            _ => None,
        }
    }

    /// Find this entity or a nested child by id
    pub fn find(&self, id: &str) -> Option<&EntityType> {
        if self.id() == id {
            return Some(self);
        }
        self.common().children.iter().find_map(|child| child.find(id))
    }

    /// Find this entity or a nested child by id (mutable)
    pub fn find_mut(&mut self, id: &str) -> Option<&mut EntityType> {
        if self.id() == id {
            return Some(self);
        }
        self.common_mut()
            .children
            .iter_mut()
            .find_map(|child| child.find_mut(id))
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for EntityType {
                fn from(entity: $variant) -> Self {
                    EntityType::$variant(entity)
                }
            }
        )*
    };
}

impl_from_variant!(Line, Arc, Circle, MText, Dimension, Hatch, Spline, Leader, Insert, Image);

/// Normalize an angle in degrees to `[0, 360)`
pub(crate) fn normalize_degrees(degrees: f64) -> f64 {
    let normalized = degrees.rem_euclid(360.0);
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}
