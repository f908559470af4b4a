//! Document tree
//!
//! A [`DocumentNode`] owns its entities, layers, reference points and two
//! kinds of children: partners (docked by joint points) and components
//! (positioned by connections, see [`crate::assembly`]).

use crate::assembly::Connection;
use crate::collection::EntityCollection;
use crate::dimension_geometry::{self, DimensionPoints};
use crate::entities::{Dimension, EntityType};
use crate::error::Result;
use crate::id::new_id;
use crate::layer::{Layer, LayerList};
use crate::types::{BoundingBox2D, Color, LineWeight, Transform, Vector2};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

mod ids;
mod layout;
mod merge;

/// Named anchor used to dock partners onto each other
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointPoint {
    pub name: String,
    #[serde(rename = "valueX")]
    pub x: f64,
    #[serde(rename = "valueY")]
    pub y: f64,
}

impl JointPoint {
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        JointPoint {
            name: name.into(),
            x,
            y,
        }
    }

    pub fn position(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }
}

/// Named coordinate pair read off the start points of two referenced lines
///
/// The values are derived; see [`DocumentNode::refresh_base_lines`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseLine {
    pub name: String,
    #[serde(default)]
    pub id_x: String,
    #[serde(default)]
    pub id_y: String,
    #[serde(default)]
    pub value_x: f64,
    #[serde(default)]
    pub value_y: f64,
}

impl BaseLine {
    pub fn new(name: impl Into<String>, id_x: impl Into<String>, id_y: impl Into<String>) -> Self {
        BaseLine {
            name: name.into(),
            id_x: id_x.into(),
            id_y: id_y.into(),
            value_x: 0.0,
            value_y: 0.0,
        }
    }
}

/// Sub-assemblies and the connections positioning them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub data: Vec<DocumentNode>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl Components {
    /// Index of a direct component by id
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.data.iter().position(|component| component.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&DocumentNode> {
        self.data.iter().find(|component| component.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut DocumentNode> {
        self.data.iter_mut().find(|component| component.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty() && self.connections.is_empty()
    }
}

/// A node of the drawing tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentNode {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Free-form classification
    #[serde(rename = "type", default)]
    pub node_type: String,
    #[serde(default)]
    pub layers: LayerList,
    #[serde(default)]
    pub entities: EntityCollection,
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub options: IndexMap<String, String>,
    #[serde(default)]
    pub base_lines: Vec<BaseLine>,
    #[serde(default)]
    pub joint_points: Vec<JointPoint>,
    #[serde(default)]
    pub partners: Vec<DocumentNode>,
    #[serde(default)]
    pub components: Components,
    /// Manufacturing settings carried through unchanged
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl DocumentNode {
    /// Create an empty node with a fresh id
    pub fn new(name: impl Into<String>) -> Self {
        DocumentNode {
            id: new_id(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Create an empty node with a given id
    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        DocumentNode {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add an entity to this node's own collection
    pub fn add_entity(&mut self, entity: impl Into<EntityType>) -> bool {
        self.entities.add(entity.into())
    }

    pub fn add_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    /// Merged copy of the entities of the whole subtree
    ///
    /// The result is detached: mutating it does not touch the tree.
    pub fn get_all_entities(&self) -> EntityCollection {
        let mut all = self.entities.clone();
        for partner in &self.partners {
            all.merge(&partner.get_all_entities());
        }
        for component in &self.components.data {
            all.merge(&component.get_all_entities());
        }
        all
    }

    /// Find an entity anywhere in the subtree
    pub fn find_entity(&self, id: &str) -> Option<&EntityType> {
        self.entities
            .find(id)
            .or_else(|| self.partners.iter().find_map(|p| p.find_entity(id)))
            .or_else(|| {
                self.components
                    .data
                    .iter()
                    .find_map(|c| c.find_entity(id))
            })
    }

    /// Find an entity anywhere in the subtree (mutable)
    pub fn find_entity_mut(&mut self, id: &str) -> Option<&mut EntityType> {
        if self.entities.contains(id) {
            return self.entities.find_mut(id);
        }
        if let Some(index) = self.partners.iter().position(|p| p.find_entity(id).is_some()) {
            return self.partners[index].find_entity_mut(id);
        }
        self.components
            .data
            .iter_mut()
            .find_map(|c| c.find_entity_mut(id))
    }

    /// Find a descendant node (partner or component) by id
    pub fn find_child(&self, id: &str) -> Option<&DocumentNode> {
        self.partners
            .iter()
            .chain(self.components.data.iter())
            .find_map(|child| {
                if child.id == id {
                    Some(child)
                } else {
                    child.find_child(id)
                }
            })
    }

    /// Find a descendant node (partner or component) by id (mutable)
    pub fn find_child_mut(&mut self, id: &str) -> Option<&mut DocumentNode> {
        self.partners
            .iter_mut()
            .chain(self.components.data.iter_mut())
            .find_map(|child| {
                if child.id == id {
                    Some(child)
                } else {
                    child.find_child_mut(id)
                }
            })
    }

    /// Extent of the subtree, `None` when nothing contributes
    pub fn extent(&self) -> Option<BoundingBox2D> {
        let mut extent = self.entities.extent();
        for child in self.partners.iter().chain(self.components.data.iter()) {
            extent = BoundingBox2D::union(extent, child.extent());
        }
        extent
    }

    /// Extent of the subtree, degenerate when empty
    pub fn bounding_rect(&self) -> BoundingBox2D {
        self.extent().unwrap_or_default()
    }

    /// True when the subtree holds no entities and no children
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.partners.is_empty() && self.components.data.is_empty()
    }

    /// Transform the whole subtree: entities, joint points, partners and
    /// components. Base lines are recomputed afterwards.
    pub fn transform(&mut self, transform: &Transform) {
        self.transform_geometry(transform);
        self.refresh_base_lines();
    }

    fn transform_geometry(&mut self, transform: &Transform) {
        self.entities.transform(transform, true);
        for joint in &mut self.joint_points {
            let moved = transform.apply(joint.position());
            joint.x = moved.x;
            joint.y = moved.y;
        }
        for child in self
            .partners
            .iter_mut()
            .chain(self.components.data.iter_mut())
        {
            child.transform_geometry(transform);
        }
    }

    pub fn translate(&mut self, offset: Vector2) {
        self.transform(&Transform::from_translation(offset));
    }

    /// Recompute every base line value in the subtree from the start points
    /// of its referenced lines. Unresolved references keep their last value.
    pub fn refresh_base_lines(&mut self) {
        let values: Vec<(Option<f64>, Option<f64>)> = self
            .base_lines
            .iter()
            .map(|base| {
                (
                    self.find_entity(&base.id_x)
                        .and_then(EntityType::endpoints)
                        .map(|(start, _)| start.x),
                    self.find_entity(&base.id_y)
                        .and_then(EntityType::endpoints)
                        .map(|(start, _)| start.y),
                )
            })
            .collect();
        for (base, (x, y)) in self.base_lines.iter_mut().zip(values) {
            if let Some(x) = x {
                base.value_x = x;
            }
            if let Some(y) = y {
                base.value_y = y;
            }
        }
        for child in self
            .partners
            .iter_mut()
            .chain(self.components.data.iter_mut())
        {
            child.refresh_base_lines();
        }
    }

    /// First layer with the given name
    pub fn layer_by_name(&self, name: &str) -> Option<&Layer> {
        self.layers.by_name(name)
    }

    /// Entity color with `ByLayer` resolved against this node's layers
    pub fn effective_color(&self, entity: &EntityType) -> Color {
        let common = entity.common();
        match common.color {
            Color::ByLayer => self
                .layer_by_name(&common.layer)
                .map(|layer| layer.color)
                .unwrap_or(Color::ByLayer),
            color => color,
        }
    }

    /// Entity line weight with `ByLayer` resolved against this node's layers
    pub fn effective_line_weight(&self, entity: &EntityType) -> LineWeight {
        let common = entity.common();
        match common.line_weight {
            LineWeight::ByLayer => self
                .layer_by_name(&common.layer)
                .map(|layer| layer.line_weight)
                .unwrap_or(LineWeight::ByLayer),
            weight => weight,
        }
    }

    /// Rendered points of a dimension, resolving its references in this subtree
    pub fn dimension_points(&self, dimension: &Dimension) -> Result<DimensionPoints> {
        dimension_geometry::resolve(self, dimension)
    }

    /// Deep copy of the subtree, optionally with regenerated ids
    pub fn duplicate(&self, reset_ids: bool) -> DocumentNode {
        let mut copy = self.clone();
        if reset_ids {
            copy.reset_ids();
        }
        copy
    }
}
