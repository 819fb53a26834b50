//! Batch orchestration: from tessellator callbacks to emitted chains.
//!
//! A [`BatchCollection`] is the top-level object a tessellator feeds. It owns
//! the region's [`PointStore`] and one [`AdjacencyGraph`] per tessellation
//! batch (a tessellator may decompose a polygon with holes into several
//! disjoint batches). [`BatchCollection::process`] then extracts one chain
//! per batch and hands it to a caller-supplied emitter, in batch-insertion
//! order.
//!
//! Batches are independent: nothing is shared across them beyond the
//! read-only quantized points, so chain building can optionally fan out over
//! rayon while emission stays sequential and deterministic.

use nalgebra::Point2;
use rayon::prelude::*;

use crate::chain::{build_chain, Chain, TraversalOrder};
use crate::error::{ChainError, Result};
use crate::graph::AdjacencyGraph;
use crate::index::{PointId, TriangleId};
use crate::points::{PointStore, QuantizedPoints};

/// Options for [`BatchCollection::process`].
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    /// The traversal order used for every batch (default: greedy).
    pub order: TraversalOrder,

    /// Whether to build per-batch chains in parallel (default: false).
    /// Emission order and results are identical either way; only wall-clock
    /// time differs.
    pub parallel: bool,
}

impl ProcessOptions {
    /// Set the traversal order.
    pub fn with_order(mut self, order: TraversalOrder) -> Self {
        self.order = order;
        self
    }

    /// Set whether chains are built in parallel.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// An ordered collection of triangle batches over one shared point store.
#[derive(Debug, Clone, Default)]
pub struct BatchCollection {
    points: PointStore,
    batches: Vec<AdjacencyGraph>,
}

impl BatchCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the region's points (boundary plus holes, concatenated), in the
    /// order the tessellator indexes them. See [`PointStore::assign_points`].
    pub fn assign_points(&mut self, points: &[Point2<f64>]) {
        self.points.assign_points(points);
    }

    /// The owned point store.
    #[inline]
    pub fn points(&self) -> &PointStore {
        &self.points
    }

    /// Quantize the stored points. See [`PointStore::quantize`].
    pub fn quantize<F>(&self, base: Point2<u32>, max: Point2<u32>, convert: F) -> QuantizedPoints
    where
        F: Fn(Point2<f64>) -> Point2<u32>,
    {
        self.points.quantize(base, max, convert)
    }

    /// Open a new batch with storage reserved for `count` triangles.
    /// Subsequent [`add_triangle`](Self::add_triangle) calls fill this batch
    /// until the next `reserve_batch`.
    pub fn reserve_batch(&mut self, count: usize) {
        self.batches.push(AdjacencyGraph::with_capacity(count));
    }

    /// Add a triangle (three indices into the assigned points) to the
    /// current batch.
    pub fn add_triangle(&mut self, p0: usize, p1: usize, p2: usize) -> Result<TriangleId> {
        let num_points = self.points.len();
        let batch = self.batches.last_mut().ok_or(ChainError::NoActiveBatch)?;

        let triangle = batch.len();
        for p in [p0, p1, p2] {
            if p >= num_points {
                return Err(ChainError::InvalidPointIndex { triangle, point: p });
            }
        }
        batch.add(PointId::new(p0), PointId::new(p1), PointId::new(p2))
    }

    /// Get the number of batches.
    #[inline]
    pub fn num_batches(&self) -> usize {
        self.batches.len()
    }

    /// The batches in insertion order.
    #[inline]
    pub fn batches(&self) -> &[AdjacencyGraph] {
        &self.batches
    }

    /// Extract one chain per batch and hand each to `emitter` together with
    /// the start triangle's quantized points (the start edge's endpoints
    /// followed by the apex).
    ///
    /// The emitter is invoked synchronously, once per non-empty batch, in
    /// batch-insertion order; empty batches (reserved but never filled) are
    /// skipped. The first batch that fails aborts processing and propagates
    /// its error.
    pub fn process<E>(
        &self,
        points: &QuantizedPoints,
        options: &ProcessOptions,
        mut emitter: E,
    ) -> Result<()>
    where
        E: FnMut([Point2<u32>; 3], &Chain),
    {
        if options.parallel {
            let chains: Vec<Result<Option<Chain>>> = self
                .batches
                .par_iter()
                .map(|batch| {
                    if batch.is_empty() {
                        Ok(None)
                    } else {
                        build_chain(batch, points, options.order).map(Some)
                    }
                })
                .collect();

            for result in chains {
                if let Some(chain) = result? {
                    let start = chain.start_points().map(|p| points.point(p));
                    emitter(start, &chain);
                }
            }
        } else {
            for batch in &self.batches {
                if batch.is_empty() {
                    continue;
                }
                let chain = build_chain(batch, points, options.order)?;
                let start = chain.start_points().map(|p| points.point(p));
                emitter(start, &chain);
            }
        }
        Ok(())
    }
}
