//! Id regeneration for duplicated subtrees
//!
//! Fresh ids are assigned in a first pass; a second pass rewrites every
//! cross-reference (dimension targets, base lines, connection ids and
//! lines) that pointed at a regenerated id. Entity ids are only unique per
//! collection, so a reference is resolved against the owning node's own
//! entities first and against the whole subtree second, where the first
//! entity seen with a given id wins.

use super::DocumentNode;
use crate::entities::EntityType;
use crate::id::new_id;
use ahash::AHashMap;
use tracing::debug;

#[derive(Default)]
struct IdRemap {
    nodes: AHashMap<String, String>,
    entities: AHashMap<String, String>,
    /// Per-node entity maps in pre-order
    locals: Vec<AHashMap<String, String>>,
}

impl IdRemap {
    fn entity<'a>(&'a self, local: &'a AHashMap<String, String>, old: &str) -> Option<&'a String> {
        local.get(old).or_else(|| self.entities.get(old))
    }
}

impl DocumentNode {
    /// Regenerate every node, layer and entity id in the subtree and rewrite
    /// the references pointing at them.
    pub fn reset_ids(&mut self) {
        let mut remap = IdRemap::default();
        self.assign_fresh_ids(&mut remap);
        let mut index = 0;
        self.rewrite_references(&remap, &mut index);
        debug!(
            nodes = remap.nodes.len(),
            entities = remap.entities.len(),
            "regenerated ids"
        );
    }

    fn assign_fresh_ids(&mut self, remap: &mut IdRemap) {
        let fresh = new_id();
        let old = std::mem::replace(&mut self.id, fresh.clone());
        remap.nodes.entry(old).or_insert(fresh);

        for layer in self.layers.iter_mut() {
            layer.id = new_id();
        }

        let mut local = AHashMap::new();
        for mut entity in self.entities.drain() {
            renew_entity(&mut entity, &mut local, &mut remap.entities);
            self.entities.insert(entity);
        }
        remap.locals.push(local);

        for child in self
            .partners
            .iter_mut()
            .chain(self.components.data.iter_mut())
        {
            child.assign_fresh_ids(remap);
        }
    }

    fn rewrite_references(&mut self, remap: &IdRemap, index: &mut usize) {
        let empty = AHashMap::new();
        let local = remap.locals.get(*index).unwrap_or(&empty);
        *index += 1;

        for entity in self.entities.iter_mut() {
            rewrite_entity(entity, remap, local);
        }
        for base in &mut self.base_lines {
            if let Some(id) = remap.entity(local, &base.id_x) {
                base.id_x = id.clone();
            }
            if let Some(id) = remap.entity(local, &base.id_y) {
                base.id_y = id.clone();
            }
        }
        for connection in &mut self.components.connections {
            for id in connection.ids.iter_mut() {
                if let Some(new) = remap.nodes.get(id.as_str()) {
                    *id = new.clone();
                }
            }
            for line in connection.lines.iter_mut() {
                if let Some(new) = remap.entity(local, line) {
                    *line = new.clone();
                }
            }
        }

        for child in self
            .partners
            .iter_mut()
            .chain(self.components.data.iter_mut())
        {
            child.rewrite_references(remap, index);
        }
    }
}

fn renew_entity(
    entity: &mut EntityType,
    local: &mut AHashMap<String, String>,
    global: &mut AHashMap<String, String>,
) {
    let fresh = new_id();
    let old = std::mem::replace(&mut entity.common_mut().id, fresh.clone());
    local.entry(old.clone()).or_insert_with(|| fresh.clone());
    global.entry(old).or_insert(fresh);
    for child in &mut entity.common_mut().children {
        renew_entity(child, local, global);
    }
}

fn rewrite_entity(entity: &mut EntityType, remap: &IdRemap, local: &AHashMap<String, String>) {
    if let EntityType::Dimension(dimension) = entity {
        for target in [&mut dimension.entity1, &mut dimension.entity2] {
            if let Some(id) = remap.entity(local, &target.id) {
                target.id = id.clone();
            }
        }
    }
    for child in &mut entity.common_mut().children {
        rewrite_entity(child, remap, local);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::Connection;
    use crate::document::BaseLine;
    use crate::entities::{Dimension, DimensionTarget, EntityLocation, Line};
    use crate::layer::Layer;
    use crate::types::Axis;

    fn sample() -> DocumentNode {
        let mut root = DocumentNode::with_id("root", "root");
        root.add_layer(Layer::new("frame"));
        root.add_entity(EntityType::from(Line::from_coords(0.0, 0.0, 0.0, 10.0)).with_id("l1"));
        root.add_entity(
            EntityType::from(Dimension::new(
                DimensionTarget::new("l1", EntityLocation::Start),
                DimensionTarget::new("c-line", EntityLocation::Start),
                Axis::X,
                5.0,
            ))
            .with_id("d1"),
        );
        root.base_lines.push(BaseLine::new("origin", "l1", "l1"));

        let mut component = DocumentNode::with_id("comp", "comp");
        component.add_entity(
            EntityType::from(Line::from_coords(20.0, 0.0, 20.0, 10.0)).with_id("c-line"),
        );
        root.components.data.push(component);
        root.components
            .connections
            .push(Connection::absolute(["root", "comp"], ["l1", "c-line"], "0"));
        root
    }

    #[test]
    fn test_reset_ids_rewrites_references() {
        let mut root = sample();
        let old_layer = root.layers.iter().next().unwrap().id.clone();
        root.reset_ids();

        assert_ne!(root.id, "root");
        assert!(root.find_entity("l1").is_none());
        assert!(root.find_entity("c-line").is_none());

        let dim = root
            .entities
            .iter()
            .find_map(|e| match e {
                EntityType::Dimension(d) => Some(d.clone()),
                _ => None,
            })
            .unwrap();
        assert!(root.find_entity(&dim.entity1.id).is_some());
        assert!(root.find_entity(&dim.entity2.id).is_some());
        assert!(root.find_entity(&root.base_lines[0].id_x).is_some());

        let connection = &root.components.connections[0];
        assert_eq!(connection.ids[0], root.id);
        assert_eq!(connection.ids[1], root.components.data[0].id);
        assert!(root.find_entity(&connection.lines[1]).is_some());
        assert_ne!(root.layers.iter().next().unwrap().id, old_layer);
    }

    #[test]
    fn test_duplicate_keeps_original_untouched() {
        let root = sample();
        let copy = root.duplicate(true);
        assert_eq!(root.id, "root");
        assert!(root.find_entity("l1").is_some());
        assert_eq!(copy.entities.len(), root.entities.len());

        let same = root.duplicate(false);
        assert_eq!(same, root);
    }
}
