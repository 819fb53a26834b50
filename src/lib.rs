//! # Trichain
//!
//! Triangle chain extraction and point quantization for compact
//! serialization of tessellated planar regions.
//!
//! An external tessellator turns a polygon with holes into batches of
//! triangles indexed into a shared point array. Trichain converts each batch
//! into an ordered *chain*: the three points of a start triangle on the
//! batch boundary, then one step per remaining triangle recording only the
//! shared edge crossed and the single new point introduced. Together with
//! integer-quantized coordinates, this lets a downstream writer avoid
//! repeating shared vertices and keep successive point deltas small for
//! byte-efficient delta encoding.
//!
//! ## Features
//!
//! - **Directed-edge adjacency index**: each batch's triangles are indexed
//!   by a hash map from directed edge to owning triangle; neighbor queries
//!   are derived from it on demand, with no pointer-based graph structures
//! - **Two traversal orders**: a greedy cost-ordered walk that minimizes
//!   coordinate deltas between consecutively emitted points, and a cheaper
//!   discovery-ordered walk
//! - **Fail-fast diagnostics**: malformed triangulations (no boundary edge)
//!   and disconnected batches surface as distinguishable errors instead of
//!   truncated output
//! - **Optional parallelism**: independent batches can be chained on a
//!   rayon pool, with emission kept sequential and deterministic
//!
//! ## Quick Start
//!
//! ```
//! use trichain::prelude::*;
//! use nalgebra::Point2;
//!
//! // The unit square, split along its diagonal by a tessellator.
//! let mut collection = BatchCollection::new();
//! collection.assign_points(&[
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(0.0, 1.0),
//! ]);
//! collection.reserve_batch(2);
//! collection.add_triangle(0, 1, 2).unwrap();
//! collection.add_triangle(0, 2, 3).unwrap();
//!
//! // Quantize into the box [(0,0), (100,100)].
//! let points = collection.quantize(
//!     Point2::new(0, 0),
//!     Point2::new(100, 100),
//!     |p| Point2::new((p.x * 100.0) as u32, (p.y * 100.0) as u32),
//! );
//!
//! // Extract chains and hand them to an emitter.
//! let mut emitted = Vec::new();
//! collection
//!     .process(&points, &ProcessOptions::default(), |start, chain| {
//!         emitted.push((start, chain.steps().len()));
//!     })
//!     .unwrap();
//!
//! assert_eq!(emitted.len(), 1);
//! assert_eq!(emitted[0].1, 1); // one step past the start triangle
//! ```
//!
//! ## Traversal Orders
//!
//! The walk over a batch's adjacency graph is shared between two pop
//! policies. [`TraversalOrder::Greedy`](crate::chain::TraversalOrder::Greedy)
//! always visits the frontier candidate whose new point is closest to the
//! most recently emitted one;
//! [`TraversalOrder::Discovery`](crate::chain::TraversalOrder::Discovery)
//! visits candidates last-discovered-first without scoring them.
//!
//! ```
//! use trichain::prelude::*;
//!
//! let options = ProcessOptions::default()
//!     .with_order(TraversalOrder::Discovery)
//!     .with_parallel(true);
//! assert_eq!(options.order, TraversalOrder::Discovery);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chain;
pub mod collection;
pub mod error;
pub mod graph;
pub mod index;
pub mod points;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use trichain::prelude::*;
/// ```
pub mod prelude {
    pub use crate::chain::{build_chain, delta_cost, Chain, ChainStep, TraversalOrder};
    pub use crate::collection::{BatchCollection, ProcessOptions};
    pub use crate::error::{ChainError, Result};
    pub use crate::graph::{AdjacencyGraph, DirectedEdge, Triangle};
    pub use crate::index::{PointId, TriangleId};
    pub use crate::points::{PointStore, QuantizedPoints};
}

// Re-export nalgebra types for convenience
pub use nalgebra;
