//! Grid store - row-major node storage and identifier assignment.

use std::collections::HashMap;

use glam::{IVec2, UVec2};

use crate::core::error::Error;
use crate::core::types::{NodeId, Result};

use super::cell::CellKind;
use super::node::{Node, UNASSIGNED};

/// Largest grid accepted from configs, files and resizes. Keeps every
/// coordinate within `u32`.
pub const MAX_CELLS: usize = 1 << 24;

/// Check that a `width` x `height` grid is non-empty and within
/// [`MAX_CELLS`]. Returns the cell count.
pub fn check_dimensions(width: usize, height: usize) -> Result<usize> {
    match width.checked_mul(height) {
        Some(count) if count > 0 && count <= MAX_CELLS => Ok(count),
        _ => Err(Error::InvalidDimensions { width, height }),
    }
}

/// Rectangular grid of nodes, row 0 at the top.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<Node>>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Build a grid of blank nodes without assigning identifiers.
    pub fn create_blank(width: usize, height: usize) -> Self {
        let rows = (0..height)
            .map(|_| (0..width).map(|_| Node::blank()).collect())
            .collect();
        Self { rows, width, height }
    }

    /// Build a blank grid with identifiers assigned.
    pub fn new(width: usize, height: usize) -> Self {
        let mut grid = Self::create_blank(width, height);
        grid.assign_ids();
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells, `width * height`.
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Renumber every node to its row-major position.
    pub fn assign_ids(&mut self) {
        let mut count = 0;
        for row in &mut self.rows {
            for node in row {
                node.id = count;
                count += 1;
            }
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id < self.cell_count()
    }

    /// Grid coordinate of `id` (x to the right, y downwards).
    pub fn position(&self, id: NodeId) -> Option<UVec2> {
        if !self.contains(id) {
            return None;
        }
        Some(UVec2::new((id % self.width) as u32, (id / self.width) as u32))
    }

    /// Row-major id of the cell at `(x, y)`.
    pub fn index_at(&self, x: usize, y: usize) -> Option<NodeId> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Node stored at the position of `id`, without checking its id.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        let pos = self.position(id)?;
        Some(&self.rows[pos.y as usize][pos.x as usize])
    }

    /// Node at `id`, verifying that the stored id matches its position.
    pub fn node_at(&self, id: NodeId) -> Result<&Node> {
        let node = self.get(id).ok_or(Error::NodeOutOfRange { id, len: self.cell_count() })?;
        if node.id != id {
            return Err(Error::IndexMismatch { position: id, found: node.id });
        }
        Ok(node)
    }

    pub(in crate::grid) fn node_at_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        let len = self.cell_count();
        let pos = self.position(id).ok_or(Error::NodeOutOfRange { id, len })?;
        let node = &mut self.rows[pos.y as usize][pos.x as usize];
        if node.id != id {
            return Err(Error::IndexMismatch { position: id, found: node.id });
        }
        Ok(node)
    }

    fn offset(&self, id: NodeId, delta: IVec2) -> Option<&Node> {
        let pos = self.position(id)?.as_ivec2() + delta;
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let id = self.index_at(pos.x as usize, pos.y as usize)?;
        self.get(id)
    }

    pub fn neighbor_left(&self, id: NodeId) -> Option<&Node> {
        self.offset(id, IVec2::NEG_X)
    }

    pub fn neighbor_right(&self, id: NodeId) -> Option<&Node> {
        self.offset(id, IVec2::X)
    }

    pub fn neighbor_up(&self, id: NodeId) -> Option<&Node> {
        self.offset(id, IVec2::NEG_Y)
    }

    pub fn neighbor_down(&self, id: NodeId) -> Option<&Node> {
        self.offset(id, IVec2::Y)
    }

    /// The up to four spatially orthogonal neighbors of `id`.
    pub fn orthogonal_neighbors(&self, id: NodeId) -> impl Iterator<Item = &Node> + '_ {
        [
            self.neighbor_left(id),
            self.neighbor_right(id),
            self.neighbor_up(id),
            self.neighbor_down(id),
        ]
        .into_iter()
        .flatten()
    }

    /// Iterate all nodes in row-major order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.rows.iter().flatten()
    }

    /// Number of non-empty cells.
    pub fn occupied_count(&self) -> usize {
        self.nodes().filter(|n| !n.is_empty()).count()
    }

    /// Ids of the cells in column `col`, top to bottom.
    pub fn column_ids(&self, col: usize) -> Vec<NodeId> {
        if col >= self.width {
            return Vec::new();
        }
        self.rows.iter().map(|row| row[col].id).collect()
    }

    /// Ids of the cells in row `row`, left to right.
    pub fn row_ids(&self, row: usize) -> Vec<NodeId> {
        self.rows
            .get(row)
            .map(|r| r.iter().map(|n| n.id).collect())
            .unwrap_or_default()
    }

    /// Insert a column of blank nodes before `col`. Ids are stale until
    /// [`Grid::renumber`] runs.
    pub fn insert_blank_column(&mut self, col: usize) -> Result<()> {
        if col > self.width {
            return Err(Error::OutOfBounds { axis: "column", index: col, len: self.width + 1 });
        }
        for row in &mut self.rows {
            row.insert(col, Node::blank());
        }
        self.width += 1;
        Ok(())
    }

    /// Physically drop column `col`. Its cells must already be cleared.
    pub fn drop_column(&mut self, col: usize) -> Result<()> {
        if col >= self.width {
            return Err(Error::OutOfBounds { axis: "column", index: col, len: self.width });
        }
        for row in &mut self.rows {
            let node = row.remove(col);
            debug_assert!(node.is_empty() && node.neighbors.is_empty());
        }
        self.width -= 1;
        Ok(())
    }

    /// Insert a row of blank nodes before `row`. Ids are stale until
    /// [`Grid::renumber`] runs.
    pub fn insert_blank_row(&mut self, row: usize) -> Result<()> {
        if row > self.height {
            return Err(Error::OutOfBounds { axis: "row", index: row, len: self.height + 1 });
        }
        self.rows.insert(row, (0..self.width).map(|_| Node::blank()).collect());
        self.height += 1;
        Ok(())
    }

    /// Physically drop row `row`. Its cells must already be cleared.
    pub fn drop_row(&mut self, row: usize) -> Result<()> {
        if row >= self.height {
            return Err(Error::OutOfBounds { axis: "row", index: row, len: self.height });
        }
        let dropped = self.rows.remove(row);
        debug_assert!(dropped.iter().all(|n| n.is_empty() && n.neighbors.is_empty()));
        self.height -= 1;
        Ok(())
    }

    /// Renumber after a structural change and rewrite every neighbor set.
    ///
    /// Returns the old -> new id map, built from a full snapshot before any
    /// neighbor set is touched. Blank nodes inserted since the last pass
    /// have no previous id and do not appear in the map.
    pub fn renumber(&mut self) -> HashMap<NodeId, NodeId> {
        for node in self.rows.iter_mut().flatten() {
            node.previous_id = (node.id != UNASSIGNED).then_some(node.id);
        }
        self.assign_ids();

        let old_to_new: HashMap<NodeId, NodeId> = self
            .nodes()
            .filter_map(|n| n.previous_id.map(|old| (old, n.id)))
            .collect();

        for node in self.rows.iter_mut().flatten() {
            node.remap_neighbors(&old_to_new);
            node.previous_id = None;
        }
        old_to_new
    }

    /// Set a kind without touching links. Used when rebuilding a grid from
    /// a file, where links are restored separately.
    pub(crate) fn place_unlinked(&mut self, id: NodeId, kind: CellKind) -> Result<()> {
        self.node_at_mut(id)?.kind = kind;
        Ok(())
    }
}
