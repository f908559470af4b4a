//! Move cascade through the connection graph

use crate::document::DocumentNode;
use crate::error::{DrawingError, Result};
use crate::types::{AxisMask, Vector2};
use ahash::AHashSet;
use indexmap::IndexMap;
use tracing::{debug, trace};

impl DocumentNode {
    /// Move a direct component and carry the move along its connections.
    ///
    /// A connection to this node pins the component on that connection's
    /// axis, so that component of the move is not passed on. Every other
    /// neighbour receives the move restricted to the axes its connections
    /// with the component constrain. `exclude_from` is never moved; every
    /// other component moves at most once.
    pub fn move_component(
        &mut self,
        target: &str,
        translation: Vector2,
        exclude_from: Option<&str>,
    ) -> Result<()> {
        let index = self
            .components
            .index_of(target)
            .ok_or_else(|| DrawingError::ComponentNotFound(target.to_string()))?;
        let mut visited = AHashSet::new();
        if let Some(excluded) = exclude_from {
            visited.insert(excluded.to_string());
        }
        self.cascade(index, translation, &mut visited);
        Ok(())
    }

    pub(crate) fn cascade(
        &mut self,
        index: usize,
        translation: Vector2,
        visited: &mut AHashSet<String>,
    ) {
        let Some(component) = self.components.data.get_mut(index) else {
            return;
        };
        let id = component.id.clone();
        visited.insert(id.clone());
        trace!(component = %id, dx = translation.x, dy = translation.y, "moving component");
        component.translate(translation);

        let mut carried = AxisMask::all();
        let mut neighbours: IndexMap<String, AxisMask> = IndexMap::new();
        for connection in &self.components.connections {
            let (Some(other), Some(axis)) = (connection.other(&id), connection.axis) else {
                continue;
            };
            if other == self.id {
                carried -= AxisMask::from(axis);
            } else if other != id {
                *neighbours.entry(other.to_string()).or_default() |= AxisMask::from(axis);
            }
        }
        let carried = translation.masked(carried);

        for (neighbour, mask) in neighbours {
            if visited.contains(&neighbour) {
                continue;
            }
            let moved = carried.masked(mask);
            if moved.is_zero() {
                continue;
            }
            match self.components.index_of(&neighbour) {
                Some(next) => self.cascade(next, moved, visited),
                None => debug!(component = %neighbour, "connection points at a missing component"),
            }
        }
    }
}
