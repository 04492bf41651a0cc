//! Error types for the structure editor

use thiserror::Error;

use crate::core::types::{NodeId, ObjectId};

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The node stored at a grid position does not carry the id of that
    /// position. Raised only when an earlier operation broke renumbering.
    #[error("index mismatch: position {position} holds node {found}")]
    IndexMismatch { position: NodeId, found: NodeId },

    #[error("node {id} is outside a grid of {len} cells")]
    NodeOutOfRange { id: NodeId, len: usize },

    /// Edge toggled between cells that are not orthogonal neighbors or
    /// not both occupied.
    #[error("cannot link nodes {a} and {b}")]
    InvalidEdge { a: NodeId, b: NodeId },

    #[error("{axis} {index} is outside 0..{len}")]
    OutOfBounds { axis: &'static str, index: usize, len: usize },

    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("unknown object {0:?}")]
    UnknownObject(ObjectId),

    #[error("duplicate object name: {0}")]
    DuplicateObjectName(String),

    #[error("format error: {0}")]
    Format(String),
}
