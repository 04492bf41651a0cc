//! Grid node

use std::collections::{BTreeSet, HashMap};

use crate::core::types::NodeId;

use super::cell::CellKind;

/// Id carried by a node that has not been through a renumbering pass yet.
pub(in crate::grid) const UNASSIGNED: NodeId = NodeId::MAX;

/// One grid cell with its explicit neighbor set.
///
/// Fields are only writable inside the `grid` module so that the
/// neighbor set can never be edited around [`Grid::link`](super::Grid::link).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub(in crate::grid) id: NodeId,
    pub(in crate::grid) kind: CellKind,
    pub(in crate::grid) neighbors: BTreeSet<NodeId>,
    /// Id before the last renumbering; only set while a remap is running.
    pub(in crate::grid) previous_id: Option<NodeId>,
}

impl Node {
    /// Create a blank (empty, unlinked) node. Its id is set by the next
    /// renumbering pass.
    pub fn blank() -> Self {
        Self {
            id: UNASSIGNED,
            kind: CellKind::Empty,
            neighbors: BTreeSet::new(),
            previous_id: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> CellKind {
        self.kind
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_empty()
    }

    /// Ids this node is explicitly linked to, ascending.
    pub fn neighbors(&self) -> &BTreeSet<NodeId> {
        &self.neighbors
    }

    pub fn is_linked_to(&self, other: NodeId) -> bool {
        self.neighbors.contains(&other)
    }

    /// Translate every neighbor id through `old_to_new`.
    pub(in crate::grid) fn remap_neighbors(&mut self, old_to_new: &HashMap<NodeId, NodeId>) {
        let old = std::mem::take(&mut self.neighbors);
        for id in old {
            match old_to_new.get(&id) {
                Some(&new_id) => {
                    self.neighbors.insert(new_id);
                }
                None => log::warn!("node {} dropped link to vanished node {}", self.id, id),
            }
        }
    }
}
