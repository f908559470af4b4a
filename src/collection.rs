//! Entity collection
//!
//! Entities are stored in one bucket per variant. Within a bucket, entities
//! are keyed by id and kept in insertion (rendering) order.

use crate::entities::{EntityKind, EntityType};
use crate::types::{BoundingBox2D, Transform, Vector2};
use indexmap::IndexMap;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Typed multi-bucket set of entities
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityCollection {
    buckets: IndexMap<EntityKind, IndexMap<String, EntityType>>,
}

impl EntityCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity; returns false (and changes nothing) when its id is
    /// already present in its bucket
    pub fn add(&mut self, entity: EntityType) -> bool {
        let bucket = self.buckets.entry(entity.kind()).or_default();
        if bucket.contains_key(entity.id()) {
            return false;
        }
        bucket.insert(entity.id().to_string(), entity);
        true
    }

    /// Insert an entity, replacing any entity with the same id in its bucket
    pub fn insert(&mut self, entity: EntityType) -> Option<EntityType> {
        self.buckets
            .entry(entity.kind())
            .or_default()
            .insert(entity.id().to_string(), entity)
    }

    /// Remove a top-level entity by id; `None` when absent
    pub fn remove(&mut self, id: &str) -> Option<EntityType> {
        self.buckets
            .values_mut()
            .find_map(|bucket| bucket.shift_remove(id))
    }

    /// Find an entity by id, searching nested children too
    pub fn find(&self, id: &str) -> Option<&EntityType> {
        self.buckets
            .values()
            .flat_map(|bucket| bucket.values())
            .find_map(|entity| entity.find(id))
    }

    /// Find an entity by id, searching nested children too (mutable)
    pub fn find_mut(&mut self, id: &str) -> Option<&mut EntityType> {
        self.buckets
            .values_mut()
            .flat_map(|bucket| bucket.values_mut())
            .find_map(|entity| entity.find_mut(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Entities of one variant, in rendering order
    pub fn of_kind(&self, kind: EntityKind) -> impl Iterator<Item = &EntityType> {
        self.buckets.get(&kind).into_iter().flat_map(|bucket| bucket.values())
    }

    /// Union keyed by id; on collision the incoming entity wins
    pub fn merge(&mut self, other: &EntityCollection) {
        for (kind, incoming) in &other.buckets {
            let bucket = self.buckets.entry(*kind).or_default();
            for (id, entity) in incoming {
                bucket.insert(id.clone(), entity.clone());
            }
        }
    }

    /// Remove every entity whose id appears in the same bucket of `other`
    pub fn separate(&mut self, other: &EntityCollection) {
        for (kind, removed) in &other.buckets {
            if let Some(bucket) = self.buckets.get_mut(kind) {
                bucket.retain(|id, _| !removed.contains_key(id));
            }
        }
        self.buckets.retain(|_, bucket| !bucket.is_empty());
    }

    /// Aggregate extent of the visible entities, `None` when nothing
    /// contributes a finite extent
    pub fn extent(&self) -> Option<BoundingBox2D> {
        self.iter()
            .filter(|entity| entity.is_visible())
            .filter_map(|entity| entity.bounding_box())
            .reduce(|acc, bbox| acc.merge(&bbox))
    }

    /// Aggregate extent of the visible entities, degenerate when empty
    pub fn bounding_rect(&self) -> BoundingBox2D {
        self.extent().unwrap_or_default()
    }

    /// Transform every entity
    pub fn transform(&mut self, transform: &Transform, alter: bool) {
        for entity in self.iter_mut() {
            entity.transform(transform, alter);
        }
    }

    pub fn translate(&mut self, offset: Vector2) {
        self.transform(&Transform::from_translation(offset), true);
    }

    /// Bake deferred transforms of every entity
    pub fn apply_pending(&mut self) {
        for entity in self.iter_mut() {
            entity.apply_pending();
        }
    }

    /// Iterate over all top-level entities, bucket by bucket
    pub fn iter(&self) -> impl Iterator<Item = &EntityType> {
        self.buckets.values().flat_map(|bucket| bucket.values())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut EntityType> {
        self.buckets
            .values_mut()
            .flat_map(|bucket| bucket.values_mut())
    }

    /// Number of top-level entities
    pub fn len(&self) -> usize {
        self.buckets.values().map(|bucket| bucket.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take all entities out, leaving the collection empty
    pub fn drain(&mut self) -> Vec<EntityType> {
        std::mem::take(&mut self.buckets)
            .into_values()
            .flat_map(|bucket| bucket.into_values())
            .collect()
    }
}

impl FromIterator<EntityType> for EntityCollection {
    fn from_iter<I: IntoIterator<Item = EntityType>>(iter: I) -> Self {
        let mut collection = EntityCollection::new();
        for entity in iter {
            collection.insert(entity);
        }
        collection
    }
}

impl Serialize for EntityCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let non_empty: Vec<_> = self
            .buckets
            .iter()
            .filter(|(_, bucket)| !bucket.is_empty())
            .collect();
        let mut map = serializer.serialize_map(Some(non_empty.len()))?;
        for (kind, bucket) in non_empty {
            map.serialize_entry(kind.as_str(), bucket)?;
        }
        map.end()
    }
}

struct CollectionVisitor;

impl<'de> Visitor<'de> for CollectionVisitor {
    type Value = EntityCollection;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a map of entity buckets keyed by variant name")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<EntityCollection, A::Error> {
        let mut collection = EntityCollection::new();
        while let Some(name) = access.next_key::<String>()? {
            let kind: EntityKind = name
                .parse()
                .map_err(|_| de::Error::custom(format!("unknown entity bucket `{name}`")))?;
            let entities = access.next_value::<IndexMap<String, EntityType>>()?;
            let bucket = collection.buckets.entry(kind).or_default();
            for (key, mut entity) in entities {
                if entity.kind() != kind {
                    return Err(de::Error::custom(format!(
                        "entity `{key}` of type `{}` stored in bucket `{name}`",
                        entity.kind()
                    )));
                }
                if entity.id() != key {
                    entity.common_mut().id = key.clone();
                }
                bucket.insert(key, entity);
            }
        }
        Ok(collection)
    }

    fn visit_unit<E: de::Error>(self) -> Result<EntityCollection, E> {
        Ok(EntityCollection::new())
    }
}

impl<'de> Deserialize<'de> for EntityCollection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CollectionVisitor)
    }
}
