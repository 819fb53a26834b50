//! Error types for trichain.
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias using [`ChainError`].
pub type Result<T> = std::result::Result<T, ChainError>;

/// Errors that can occur while building adjacency graphs or extracting chains.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// A triangle repeats a vertex (degenerate triangle).
    #[error("triangle {triangle} is degenerate (has duplicate vertices)")]
    DegenerateTriangle {
        /// The triangle index within its batch.
        triangle: usize,
    },

    /// A triangle references a point index past the end of the point store.
    #[error("triangle {triangle} references invalid point index {point}")]
    InvalidPointIndex {
        /// The triangle index within its batch.
        triangle: usize,
        /// The invalid point index.
        point: usize,
    },

    /// A triangle was added before any batch was opened with `reserve_batch`.
    #[error("no active batch (call reserve_batch before add_triangle)")]
    NoActiveBatch,

    /// Every directed edge in the batch has a reverse counterpart, so no
    /// traversal start point exists. A valid triangulated polygon-with-holes
    /// region always has at least one unpaired boundary edge; this signals a
    /// closed or malformed mesh.
    #[error("no boundary edge found (closed or malformed triangulation)")]
    NoBoundaryEdge,

    /// The walk could not reach every triangle of the batch from the start
    /// edge. The upstream tessellator is expected to group one connected
    /// region per batch; anything unreachable would otherwise be silently
    /// dropped from the chain.
    #[error("disconnected batch: reached {visited} of {total} triangles")]
    DisconnectedBatch {
        /// Triangles reached by the walk.
        visited: usize,
        /// Triangles in the batch.
        total: usize,
    },
}
