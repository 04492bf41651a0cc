//! Grid store and explicit adjacency.
//!
//! The grid owns every node in row-major order. Neighbor sets are only
//! ever changed through [`Grid::link`] and [`Grid::unlink`], which keep
//! them symmetric.

pub mod adjacency;
pub mod cell;
pub mod node;
pub mod store;

pub use adjacency::{pair_key, parse_pair_key};
pub use cell::CellKind;
pub use node::Node;
pub use store::{check_dimensions, Grid, MAX_CELLS};
