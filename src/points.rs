//! Point storage and coordinate quantization.
//!
//! A [`PointStore`] owns the ordered array of input points for one region
//! (outer boundary plus holes, concatenated in the order the tessellator
//! supplied them). Triangles reference points by [`PointId`], so the stored
//! order is part of every batch's identity and is never reordered.
//!
//! [`PointStore::quantize`] converts every stored point to bounded unsigned
//! fixed-precision coordinates using a caller-supplied conversion function
//! and a bounding box, producing a [`QuantizedPoints`] array that is shared
//! read-only across all batches of the region.

use nalgebra::Point2;

use crate::index::PointId;

/// Ordered storage for the input points of one triangulated region.
#[derive(Debug, Clone, Default)]
pub struct PointStore {
    points: Vec<Point2<f64>>,
}

impl PointStore {
    /// Create an empty point store.
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Replace the stored points with a copy of `points`, preserving order.
    ///
    /// Capacity is reserved up front; any previously stored points are
    /// discarded.
    pub fn assign_points(&mut self, points: &[Point2<f64>]) {
        self.points.clear();
        self.points.reserve(points.len());
        self.points.extend_from_slice(points);
    }

    /// Get the number of stored points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check whether the store is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get a point by id.
    #[inline]
    pub fn point(&self, id: PointId) -> Point2<f64> {
        self.points[id.index()]
    }

    /// Get the stored points as a slice, in assignment order.
    #[inline]
    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    /// Convert every stored point with `convert`, echoing the `base`/`max`
    /// bounds into the result.
    ///
    /// The caller guarantees that every stored point maps into
    /// `[base, max]` componentwise; this routine does not re-validate the
    /// bounds. Out-of-range input yields numerically meaningless quantized
    /// coordinates but never unsafety. For a pure `convert` the result is
    /// deterministic and idempotent.
    pub fn quantize<F>(&self, base: Point2<u32>, max: Point2<u32>, convert: F) -> QuantizedPoints
    where
        F: Fn(Point2<f64>) -> Point2<u32>,
    {
        QuantizedPoints {
            points: self.points.iter().map(|&p| convert(p)).collect(),
            base,
            max,
        }
    }
}

/// Quantized points, prepared for serialization.
///
/// Parallel to the [`PointStore`] it was produced from: the point at a given
/// [`PointId`] is the quantized form of the stored point with the same id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizedPoints {
    points: Vec<Point2<u32>>,
    base: Point2<u32>,
    max: Point2<u32>,
}

impl QuantizedPoints {
    /// Get a quantized point by id.
    #[inline]
    pub fn point(&self, id: PointId) -> Point2<u32> {
        self.points[id.index()]
    }

    /// Get the quantized points as a slice, parallel to the source store.
    #[inline]
    pub fn points(&self) -> &[Point2<u32>] {
        &self.points
    }

    /// Get the number of quantized points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check whether there are no quantized points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The lower bound of the quantization box, as supplied by the caller.
    #[inline]
    pub fn base(&self) -> Point2<u32> {
        self.base
    }

    /// The upper bound of the quantization box, as supplied by the caller.
    #[inline]
    pub fn max(&self) -> Point2<u32> {
        self.max
    }
}
