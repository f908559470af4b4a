//! Structural merge and separation of document trees

use super::DocumentNode;
use tracing::trace;

impl DocumentNode {
    /// Union `other` into this node.
    ///
    /// Layers are appended (duplicates allowed), entities merged per variant
    /// with incoming entities winning, conditions, options, joint points and
    /// base lines unioned by their natural key, and same-id partners and
    /// components merged recursively. Connections are unioned by their
    /// `ids` and `lines`.
    pub fn merge(&mut self, other: &DocumentNode) {
        self.merge_structure(other);
        self.refresh_base_lines();
    }

    fn merge_structure(&mut self, other: &DocumentNode) {
        trace!(node = %self.id, other = %other.id, "merging document");
        self.layers.extend_from(&other.layers);
        self.entities.merge(&other.entities);

        for condition in &other.conditions {
            if !self.conditions.contains(condition) {
                self.conditions.push(condition.clone());
            }
        }
        for (name, value) in &other.options {
            self.options.insert(name.clone(), value.clone());
        }
        for joint in &other.joint_points {
            match self.joint_points.iter_mut().find(|j| j.name == joint.name) {
                Some(existing) => *existing = joint.clone(),
                None => self.joint_points.push(joint.clone()),
            }
        }
        for base in &other.base_lines {
            match self.base_lines.iter_mut().find(|b| b.name == base.name) {
                Some(existing) => *existing = base.clone(),
                None => self.base_lines.push(base.clone()),
            }
        }

        merge_children(&mut self.partners, &other.partners);
        merge_children(&mut self.components.data, &other.components.data);

        for connection in &other.components.connections {
            if !self
                .components
                .connections
                .iter()
                .any(|c| c.same_key(connection))
            {
                self.components.connections.push(connection.clone());
            }
        }
    }

    /// Remove everything whose key appears in `other`; the structural
    /// inverse of [`DocumentNode::merge`].
    ///
    /// Same-id partners and components are separated recursively and
    /// dropped once nothing is left in them.
    pub fn separate(&mut self, other: &DocumentNode) {
        self.separate_structure(other);
        self.refresh_base_lines();
    }

    fn separate_structure(&mut self, other: &DocumentNode) {
        trace!(node = %self.id, other = %other.id, "separating document");
        self.layers.remove_matching(&other.layers);
        self.entities.separate(&other.entities);
        self.conditions.retain(|c| !other.conditions.contains(c));
        self.options.retain(|name, _| !other.options.contains_key(name));
        self.joint_points
            .retain(|j| !other.joint_points.iter().any(|o| o.name == j.name));
        self.base_lines
            .retain(|b| !other.base_lines.iter().any(|o| o.name == b.name));

        separate_children(&mut self.partners, &other.partners);
        separate_children(&mut self.components.data, &other.components.data);

        self.components
            .connections
            .retain(|c| !other.components.connections.iter().any(|o| o.same_key(c)));
    }
}

fn merge_children(children: &mut Vec<DocumentNode>, incoming: &[DocumentNode]) {
    for child in incoming {
        match children.iter_mut().find(|c| c.id == child.id) {
            Some(existing) => existing.merge_structure(child),
            None => children.push(child.clone()),
        }
    }
}

fn separate_children(children: &mut Vec<DocumentNode>, removed: &[DocumentNode]) {
    for child in removed {
        if let Some(existing) = children.iter_mut().find(|c| c.id == child.id) {
            existing.separate_structure(child);
        }
    }
    children.retain(|c| !(removed.iter().any(|r| r.id == c.id) && c.is_empty()));
}
