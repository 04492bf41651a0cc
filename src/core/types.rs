//! Core type aliases and re-exports

pub use glam::{IVec2, UVec2};

/// Row-major cell identifier, `y * width + x`.
pub type NodeId = usize;

/// Identifier of an object within one connectivity pass.
///
/// Object ids are reassigned on every recomputation; only names survive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

/// Standard Result type for the crate
pub type Result<T> = std::result::Result<T, crate::core::error::Error>;
