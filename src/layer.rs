//! Drawing layers
//!
//! A document keeps its layers in insertion order. Duplicate names (and,
//! after merging, duplicate entries) are allowed; name lookups resolve to
//! the first match.

use crate::id::new_id;
use crate::types::{Color, LineWeight};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A named layer supplying inherited color and line weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default = "Layer::default_color")]
    pub color: Color,
    #[serde(rename = "lineweight", default = "Layer::default_line_weight")]
    pub line_weight: LineWeight,
}

impl Layer {
    /// Create a new layer with a fresh id
    pub fn new(name: impl Into<String>) -> Self {
        Layer {
            id: new_id(),
            name: name.into(),
            color: Self::default_color(),
            line_weight: Self::default_line_weight(),
        }
    }

    /// Builder-style color override
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Builder-style line weight override
    pub fn with_line_weight(mut self, line_weight: LineWeight) -> Self {
        self.line_weight = line_weight;
        self
    }

    fn default_color() -> Color {
        Color::WHITE
    }

    fn default_line_weight() -> LineWeight {
        LineWeight::Default
    }
}

/// Ordered layer list, serialized as a map keyed by layer id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerList {
    layers: Vec<Layer>,
}

impl LayerList {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    pub fn push(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    /// Append every layer of `other`, duplicates included
    pub fn extend_from(&mut self, other: &LayerList) {
        self.layers.extend(other.layers.iter().cloned());
    }

    /// Remove every layer whose id appears in `other`
    pub fn remove_matching(&mut self, other: &LayerList) {
        self.layers
            .retain(|layer| !other.layers.iter().any(|o| o.id == layer.id));
    }

    /// First layer with the given name
    pub fn by_name(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.name == name)
    }

    pub fn by_id(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Layer> {
        self.layers.iter_mut()
    }
}

impl FromIterator<Layer> for LayerList {
    fn from_iter<I: IntoIterator<Item = Layer>>(iter: I) -> Self {
        Self {
            layers: iter.into_iter().collect(),
        }
    }
}

impl Serialize for LayerList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.layers.len()))?;
        for layer in &self.layers {
            map.serialize_entry(&layer.id, layer)?;
        }
        map.end()
    }
}

struct LayerListVisitor;

impl<'de> Visitor<'de> for LayerListVisitor {
    type Value = LayerList;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a map of layers keyed by id")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<LayerList, A::Error> {
        let mut layers = Vec::new();
        while let Some((key, mut layer)) = access.next_entry::<String, Layer>()? {
            if layer.id.is_empty() {
                layer.id = key;
            }
            layers.push(layer);
        }
        Ok(LayerList { layers })
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<LayerList, E> {
        Ok(LayerList::new())
    }
}

impl<'de> Deserialize<'de> for LayerList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LayerListVisitor)
    }
}
