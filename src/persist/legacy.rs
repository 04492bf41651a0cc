//! Spatial link inference for files without link lists.
//!
//! Older files only list cells per object. Every pair of orthogonally
//! adjacent cells inside the same object is treated as linked; cells of
//! different objects are never linked.

use std::collections::BTreeSet;

use crate::core::types::{NodeId, Result};
use crate::grid::Grid;

/// Link all orthogonally adjacent members of one object.
pub fn infer_links(grid: &mut Grid, members: &BTreeSet<NodeId>) -> Result<()> {
    let mut pairs = Vec::new();
    for &id in members {
        // Right and down cover each pair once.
        let candidates = [grid.neighbor_right(id), grid.neighbor_down(id)];
        for other in candidates.into_iter().flatten() {
            if members.contains(&other.id()) {
                pairs.push((id, other.id()));
            }
        }
    }
    for (a, b) in pairs {
        grid.link(a, b)?;
    }
    Ok(())
}
