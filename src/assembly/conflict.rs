//! Pruning of connections superseded by a new one

use super::Connection;
use crate::document::DocumentNode;
use crate::types::Axis;
use ahash::AHashSet;
use tracing::debug;

impl DocumentNode {
    /// Drop the connections a new `first`–`second` connection on `axis`
    /// supersedes; returns how many were removed.
    ///
    /// Both rules are evaluated against the list as it was before any
    /// removal:
    /// - a connection touching `second` whose other end is connected to both
    ///   `first` and `second` belongs to a replaced chain;
    /// - a connection joining exactly two of `first`, `second` and this
    ///   node on the same axis is redundant.
    pub(crate) fn prune_conflicts(&mut self, first: &str, second: &str, axis: Axis) -> usize {
        let connections = &self.components.connections;
        let of_first = neighbours(connections, first);
        let of_second = neighbours(connections, second);
        let shared: AHashSet<&str> = of_first.intersection(&of_second).copied().collect();

        let mut members = vec![first, second, self.id.as_str()];
        members.sort_unstable();
        members.dedup();

        let stale: Vec<bool> = connections
            .iter()
            .map(|c| {
                let chain = c.other(second).is_some_and(|other| shared.contains(other));
                let touched = members.iter().filter(|id| c.touches(id)).count();
                let redundant = touched == 2 && c.axis == Some(axis);
                if chain || redundant {
                    debug!(ids = ?c.ids, axis = ?c.axis, chain, redundant, "dropping superseded connection");
                }
                chain || redundant
            })
            .collect();

        let removed = stale.iter().filter(|s| **s).count();
        let mut flags = stale.into_iter();
        self.components
            .connections
            .retain(|_| !flags.next().unwrap_or(false));
        removed
    }
}

fn neighbours<'a>(connections: &'a [Connection], id: &str) -> AHashSet<&'a str> {
    connections.iter().filter_map(|c| c.other(id)).collect()
}
