//! Connected components over explicit links.

use std::collections::BTreeSet;

use crate::core::types::NodeId;
use crate::grid::Grid;

/// Find the connected components of occupied cells.
///
/// Cells are only connected through links; two touching cells without a
/// link land in different components. Components are returned in
/// discovery order of a row-major scan, so the index of a component is
/// its id for this pass only.
pub fn compute_components(grid: &Grid) -> Vec<BTreeSet<NodeId>> {
    let mut visited = vec![false; grid.cell_count()];
    let mut components = Vec::new();
    let mut stack = Vec::new();

    for start in grid.nodes() {
        if start.is_empty() || visited[start.id()] {
            continue;
        }

        let mut members = BTreeSet::new();
        visited[start.id()] = true;
        stack.push(start.id());

        while let Some(id) = stack.pop() {
            members.insert(id);
            let Some(node) = grid.get(id) else { continue };
            for &next in node.neighbors() {
                let reachable = grid.get(next).is_some_and(|n| !n.is_empty());
                if reachable && !visited[next] {
                    visited[next] = true;
                    stack.push(next);
                }
            }
        }

        components.push(members);
    }

    log::debug!(
        "found {} components over {} occupied cells",
        components.len(),
        grid.occupied_count()
    );
    components
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellKind;

    fn ids(items: &[NodeId]) -> BTreeSet<NodeId> {
        items.iter().copied().collect()
    }

    #[test]
    fn test_empty_grid_has_no_components() {
        let grid = Grid::new(4, 4);
        assert!(compute_components(&grid).is_empty());
    }

    #[test]
    fn test_linked_cells_form_one_component() {
        let mut grid = Grid::new(3, 3);
        for id in [0, 1, 2, 5] {
            grid.set_cell(id, CellKind::Rigid).unwrap();
        }
        let components = compute_components(&grid);
        assert_eq!(components, vec![ids(&[0, 1, 2, 5])]);
    }

    #[test]
    fn test_touching_cells_without_link_are_separate() {
        let mut grid = Grid::new(3, 1);
        for id in 0..3 {
            grid.set_cell(id, CellKind::Soft).unwrap();
        }
        grid.toggle_edge(1, 2).unwrap();

        let components = compute_components(&grid);
        assert_eq!(components, vec![ids(&[0, 1]), ids(&[2])]);
    }

    #[test]
    fn test_discovery_order_is_row_major() {
        let mut grid = Grid::new(3, 3);
        grid.set_cell(8, CellKind::Fixed).unwrap();
        grid.set_cell(0, CellKind::Fixed).unwrap();
        let components = compute_components(&grid);
        assert_eq!(components, vec![ids(&[0]), ids(&[8])]);
    }

    #[test]
    fn test_large_block_does_not_overflow() {
        // One fully linked block; deep enough to overflow a recursive fill
        let size = 256;
        let mut grid = Grid::new(size, size);
        for id in 0..size * size {
            grid.set_cell(id, CellKind::Rigid).unwrap();
        }
        let components = compute_components(&grid);
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].len(), size * size);
    }
}
