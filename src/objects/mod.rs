//! Objects: connected groups of linked cells and their stable names.

pub mod connectivity;
pub mod object;
pub mod registry;

pub use connectivity::compute_components;
pub use object::{Object, ObjectSet};
pub use registry::{load_counter_floor, reconcile, NameCounter, DEFAULT_NAME_PREFIX};
