//! Voxforge - grid/graph engine for editing linked voxel structures.
//!
//! Cells of a rectangular grid are either empty or carry a kind. Occupied
//! cells can be linked to their orthogonal neighbors, and every connected
//! group of linked cells forms a named object. Names survive edits,
//! resizes and save/load round-trips.

pub mod core;
pub mod grid;
pub mod objects;
pub mod editor;
pub mod persist;

pub use crate::core::{Error, NodeId, ObjectId, Result};
pub use editor::{Editor, EditorConfig};
pub use grid::{CellKind, Grid};
pub use objects::{Object, ObjectSet};
