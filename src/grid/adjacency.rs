//! Explicit adjacency between occupied cells.
//!
//! Links are symmetric and only exist between spatially orthogonal,
//! non-empty cells. [`Grid::link`] and [`Grid::unlink`] are the only code
//! paths that write neighbor sets.

use crate::core::error::Error;
use crate::core::types::{NodeId, Result};

use super::cell::CellKind;
use super::store::Grid;

/// Order-independent key for the edge between `a` and `b`: `"min max"`.
pub fn pair_key(a: NodeId, b: NodeId) -> String {
    if a < b {
        format!("{} {}", a, b)
    } else {
        format!("{} {}", b, a)
    }
}

/// Parse a key produced by [`pair_key`] back into `(min, max)`.
pub fn parse_pair_key(key: &str) -> Option<(NodeId, NodeId)> {
    let mut parts = key.split_whitespace();
    let a: NodeId = parts.next()?.parse().ok()?;
    let b: NodeId = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((a.min(b), a.max(b)))
}

impl Grid {
    /// Link `a` and `b` on both sides. No-op if already linked.
    ///
    /// Both cells must be occupied and orthogonally adjacent, otherwise
    /// [`Error::InvalidEdge`] is returned and nothing is written.
    pub fn link(&mut self, a: NodeId, b: NodeId) -> Result<()> {
        let occupied = !self.node_at(a)?.is_empty() && !self.node_at(b)?.is_empty();
        if !occupied || !self.are_orthogonal(a, b) {
            return Err(Error::InvalidEdge { a, b });
        }
        self.node_at_mut(a)?.neighbors.insert(b);
        self.node_at_mut(b)?.neighbors.insert(a);
        Ok(())
    }

    /// Remove the link between `a` and `b` on both sides. No-op if absent.
    pub fn unlink(&mut self, a: NodeId, b: NodeId) -> Result<()> {
        self.node_at(a)?;
        self.node_at(b)?;
        self.node_at_mut(a)?.neighbors.remove(&b);
        self.node_at_mut(b)?.neighbors.remove(&a);
        Ok(())
    }

    pub fn is_linked(&self, a: NodeId, b: NodeId) -> bool {
        self.get(a).is_some_and(|n| n.is_linked_to(b))
    }

    /// Whether `a` and `b` are spatially adjacent along a row or column.
    pub fn are_orthogonal(&self, a: NodeId, b: NodeId) -> bool {
        match (self.position(a), self.position(b)) {
            (Some(pa), Some(pb)) => {
                let d = pa.as_ivec2() - pb.as_ivec2();
                d.x.abs() + d.y.abs() == 1
            }
            _ => false,
        }
    }

    /// Change the kind of cell `id`.
    ///
    /// Filling an empty cell links it to every occupied orthogonal
    /// neighbor. Clearing a cell unlinks it from everything first. Changing
    /// between two non-empty kinds leaves links alone.
    ///
    /// Returns whether anything changed.
    pub fn set_cell(&mut self, id: NodeId, kind: CellKind) -> Result<bool> {
        let previous = self.node_at(id)?.kind();
        if previous == kind {
            return Ok(false);
        }

        if kind.is_empty() {
            let linked: Vec<NodeId> = self.node_at(id)?.neighbors().iter().copied().collect();
            for other in linked {
                self.unlink(id, other)?;
            }
            self.node_at_mut(id)?.kind = kind;
            return Ok(true);
        }

        self.node_at_mut(id)?.kind = kind;
        if previous.is_empty() {
            let occupied: Vec<NodeId> = self
                .orthogonal_neighbors(id)
                .filter(|n| !n.is_empty())
                .map(|n| n.id())
                .collect();
            for other in occupied {
                self.link(id, other)?;
            }
        }
        Ok(true)
    }

    /// Flip the link between two orthogonal occupied cells.
    ///
    /// Returns `true` when the cells end up linked. Anything other than two
    /// orthogonal occupied cells is rejected with [`Error::InvalidEdge`]
    /// before any mutation.
    pub fn toggle_edge(&mut self, a: NodeId, b: NodeId) -> Result<bool> {
        let occupied = !self.node_at(a)?.is_empty() && !self.node_at(b)?.is_empty();
        if !occupied || !self.are_orthogonal(a, b) {
            return Err(Error::InvalidEdge { a, b });
        }

        if self.is_linked(a, b) {
            self.unlink(a, b)?;
            Ok(false)
        } else {
            self.link(a, b)?;
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_symmetric(grid: &Grid) {
        for node in grid.nodes() {
            for &other in node.neighbors() {
                assert!(
                    grid.node_at(other).unwrap().is_linked_to(node.id()),
                    "{} -> {} has no reverse link",
                    node.id(),
                    other
                );
            }
            if node.is_empty() {
                assert!(node.neighbors().is_empty());
            }
        }
    }

    #[test]
    fn test_pair_key_is_order_independent() {
        assert_eq!(pair_key(7, 3), "3 7");
        assert_eq!(pair_key(3, 7), "3 7");
        assert_eq!(parse_pair_key("3 7"), Some((3, 7)));
        assert_eq!(parse_pair_key("7 3"), Some((3, 7)));
        assert_eq!(parse_pair_key("3"), None);
        assert_eq!(parse_pair_key("3 7 9"), None);
        assert_eq!(parse_pair_key("a b"), None);
    }

    #[test]
    fn test_link_and_unlink_are_symmetric() {
        let mut grid = Grid::new(3, 3);
        grid.place_unlinked(0, CellKind::Rigid).unwrap();
        grid.place_unlinked(1, CellKind::Soft).unwrap();
        grid.link(0, 1).unwrap();
        assert!(grid.is_linked(0, 1));
        assert!(grid.is_linked(1, 0));

        // Linking twice is a no-op
        grid.link(1, 0).unwrap();
        assert_eq!(grid.node_at(0).unwrap().neighbors().len(), 1);

        grid.unlink(1, 0).unwrap();
        assert!(!grid.is_linked(0, 1));
        assert!(!grid.is_linked(1, 0));

        // Unlinking an absent edge is a no-op
        grid.unlink(0, 1).unwrap();
    }

    #[test]
    fn test_link_out_of_range_writes_nothing() {
        let mut grid = Grid::new(2, 2);
        assert!(grid.link(0, 10).is_err());
        assert!(grid.node_at(0).unwrap().neighbors().is_empty());
    }

    #[test]
    fn test_link_requires_orthogonal_occupied_cells() {
        let mut grid = Grid::new(3, 3);
        // Empty and diagonal
        assert!(matches!(grid.link(0, 8), Err(Error::InvalidEdge { a: 0, b: 8 })));
        // Orthogonal but empty
        assert!(matches!(grid.link(0, 1), Err(Error::InvalidEdge { .. })));

        grid.place_unlinked(0, CellKind::Rigid).unwrap();
        grid.place_unlinked(4, CellKind::Rigid).unwrap();
        grid.place_unlinked(8, CellKind::Rigid).unwrap();
        // Occupied but diagonal
        assert!(grid.link(0, 4).is_err());
        assert!(grid.link(4, 8).is_err());
        // One end empty
        assert!(grid.link(4, 5).is_err());
        // Self link
        assert!(grid.link(4, 4).is_err());

        for node in grid.nodes() {
            assert!(node.neighbors().is_empty());
        }
        assert_symmetric(&grid);
    }

    #[test]
    fn test_set_cell_autolinks_on_creation() {
        let mut grid = Grid::new(3, 3);
        grid.set_cell(4, CellKind::Rigid).unwrap();
        grid.set_cell(5, CellKind::Soft).unwrap();
        grid.set_cell(1, CellKind::Soft).unwrap();
        // Diagonal to 5, orthogonal to 4
        assert!(grid.is_linked(4, 5));
        assert!(grid.is_linked(4, 1));
        assert!(!grid.is_linked(1, 5));
        assert_symmetric(&grid);
    }

    #[test]
    fn test_set_cell_kind_change_keeps_links() {
        let mut grid = Grid::new(3, 1);
        grid.set_cell(0, CellKind::Rigid).unwrap();
        grid.set_cell(1, CellKind::Rigid).unwrap();
        grid.toggle_edge(0, 1).unwrap();
        assert!(!grid.is_linked(0, 1));

        // Kind change does not re-link
        assert!(grid.set_cell(1, CellKind::Fixed).unwrap());
        assert!(!grid.is_linked(0, 1));
        assert_eq!(grid.node_at(1).unwrap().kind(), CellKind::Fixed);

        assert!(!grid.set_cell(1, CellKind::Fixed).unwrap());
    }

    #[test]
    fn test_set_cell_empty_unlinks_everything() {
        let mut grid = Grid::new(3, 3);
        for id in [1, 3, 4, 5, 7] {
            grid.set_cell(id, CellKind::Soft).unwrap();
        }
        assert_eq!(grid.node_at(4).unwrap().neighbors().len(), 4);

        grid.set_cell(4, CellKind::Empty).unwrap();
        assert!(grid.node_at(4).unwrap().neighbors().is_empty());
        for id in [1, 3, 5, 7] {
            assert!(!grid.is_linked(id, 4));
        }
        assert_symmetric(&grid);
    }

    #[test]
    fn test_toggle_edge() {
        let mut grid = Grid::new(2, 2);
        grid.set_cell(0, CellKind::Rigid).unwrap();
        grid.set_cell(1, CellKind::Rigid).unwrap();

        assert!(!grid.toggle_edge(0, 1).unwrap());
        assert!(!grid.is_linked(0, 1));
        assert!(grid.toggle_edge(1, 0).unwrap());
        assert!(grid.is_linked(0, 1));
        assert_symmetric(&grid);
    }

    #[test]
    fn test_toggle_edge_rejects_invalid_picks() {
        let mut grid = Grid::new(3, 3);
        grid.set_cell(0, CellKind::Rigid).unwrap();
        grid.set_cell(4, CellKind::Rigid).unwrap();

        // Diagonal
        assert!(matches!(grid.toggle_edge(0, 4), Err(Error::InvalidEdge { a: 0, b: 4 })));
        // Empty partner
        assert!(matches!(grid.toggle_edge(0, 1), Err(Error::InvalidEdge { .. })));
        // Row wrap is not adjacency
        grid.set_cell(2, CellKind::Rigid).unwrap();
        grid.set_cell(3, CellKind::Rigid).unwrap();
        assert!(grid.toggle_edge(2, 3).is_err());

        assert!(!grid.is_linked(0, 4));
        assert!(!grid.is_linked(2, 3));
        assert_symmetric(&grid);
    }
}
