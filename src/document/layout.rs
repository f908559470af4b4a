//! Placement of partners and components next to their parent

use super::DocumentNode;
use crate::assembly::AssemblyFailure;
use crate::config::LayoutConfig;
use crate::types::{BoundingBox2D, Vector2};
use tracing::{debug, warn};

impl DocumentNode {
    /// Insert or replace a partner, docking it first.
    ///
    /// A joint point name shared by both nodes makes the two points
    /// coincide. Otherwise, when both extents have area, the partner is
    /// placed to the right of this node, vertically centered.
    pub fn add_partner(&mut self, partner: DocumentNode) {
        self.add_partner_with(partner, &LayoutConfig::default());
    }

    pub fn add_partner_with(&mut self, mut partner: DocumentNode, config: &LayoutConfig) {
        let shared_joint = self.joint_points.iter().find_map(|own| {
            partner
                .joint_points
                .iter()
                .find(|theirs| theirs.name == own.name)
                .map(|theirs| own.position() - theirs.position())
        });

        let offset = match shared_joint {
            Some(offset) => Some(offset),
            None => self
                .extent_excluding(&partner.id)
                .zip(partner.extent())
                .and_then(|(own, theirs)| beside(&own, &theirs, config.partner_margin)),
        };
        if let Some(offset) = offset.filter(|o| !o.is_zero()) {
            debug!(partner = %partner.id, dx = offset.x, dy = offset.y, "docking partner");
            partner.translate(offset);
        }

        match self.partners.iter_mut().find(|p| p.id == partner.id) {
            Some(existing) => *existing = partner,
            None => self.partners.push(partner),
        }
    }

    /// Insert or replace a component.
    ///
    /// The component is moved beside this node like a partner, but only
    /// when it lies farther away than the snap threshold on either axis.
    pub fn add_component(&mut self, component: DocumentNode) {
        self.add_component_with(component, &LayoutConfig::default());
    }

    pub fn add_component_with(&mut self, mut component: DocumentNode, config: &LayoutConfig) {
        let offset = self
            .extent_excluding(&component.id)
            .zip(component.extent())
            .and_then(|(own, theirs)| beside(&own, &theirs, config.partner_margin));
        if let Some(offset) = offset {
            let threshold = config.component_snap_threshold;
            if offset.x.abs() > threshold || offset.y.abs() > threshold {
                debug!(component = %component.id, dx = offset.x, dy = offset.y, "placing component");
                component.translate(offset);
            }
        }

        match self.components.data.iter_mut().find(|c| c.id == component.id) {
            Some(existing) => *existing = component,
            None => self.components.data.push(component),
        }
    }

    /// Re-dock every partner, then recurse into them
    pub fn update_partners(&mut self) {
        self.update_partners_with(&LayoutConfig::default());
    }

    pub fn update_partners_with(&mut self, config: &LayoutConfig) {
        for partner in std::mem::take(&mut self.partners) {
            self.add_partner_with(partner, config);
        }
        for partner in &mut self.partners {
            partner.update_partners_with(config);
        }
    }

    /// Re-place every component and replay the connections of the subtree.
    ///
    /// Children are updated first. Failing connections do not stop the
    /// pass: they stay in the connection list unresolved and are returned.
    pub fn update_components(&mut self) -> Vec<AssemblyFailure> {
        self.update_components_with(&LayoutConfig::default())
    }

    pub fn update_components_with(&mut self, config: &LayoutConfig) -> Vec<AssemblyFailure> {
        let mut failures = Vec::new();
        for child in self
            .components
            .data
            .iter_mut()
            .chain(self.partners.iter_mut())
        {
            failures.extend(child.update_components_with(config));
        }

        for component in std::mem::take(&mut self.components.data) {
            self.add_component_with(component, config);
        }

        for connection in std::mem::take(&mut self.components.connections) {
            if let Err(error) = self.assemble_components_with(&connection, config) {
                warn!(
                    node = %self.id,
                    ids = ?connection.ids,
                    %error,
                    "connection could not be applied"
                );
                self.components.connections.push(connection.clone());
                failures.push(AssemblyFailure {
                    node_id: self.id.clone(),
                    connection,
                    error,
                });
            }
        }
        failures
    }

    /// Extent of this node leaving out the direct child with the given id
    fn extent_excluding(&self, child_id: &str) -> Option<BoundingBox2D> {
        let mut extent = self.entities.extent();
        for child in self
            .partners
            .iter()
            .chain(self.components.data.iter())
            .filter(|child| child.id != child_id)
        {
            extent = BoundingBox2D::union(extent, child.extent());
        }
        extent
    }
}

/// Offset placing `theirs` to the right of `own`, centers aligned vertically
fn beside(own: &BoundingBox2D, theirs: &BoundingBox2D, margin: f64) -> Option<Vector2> {
    if own.is_degenerate() || theirs.is_degenerate() {
        return None;
    }
    let own_center = own.center();
    let their_center = theirs.center();
    Some(Vector2::new(
        own_center.x + own.width() / 2.0 + margin + theirs.width() / 2.0 - their_center.x,
        own_center.y - their_center.y,
    ))
}
