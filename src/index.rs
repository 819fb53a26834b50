//! Index types for batch elements.
//!
//! This module provides type-safe index wrappers for points and triangles.
//! Both are thin `u32` newtypes: a point index identifies a position in the
//! [`PointStore`](crate::points::PointStore), a triangle index identifies a
//! triangle within one batch's [`AdjacencyGraph`](crate::graph::AdjacencyGraph).
//! Keeping them distinct types prevents mixing the two index spaces.

use std::fmt::{self, Debug};

/// A type-safe point index into the point store.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct PointId(u32);

/// A type-safe triangle index within one batch.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct TriangleId(u32);

macro_rules! impl_index_type {
    ($name:ident, $display:literal) => {
        impl $name {
            /// Create a new index from a raw value.
            ///
            /// # Panics
            /// Panics in debug builds if the value does not fit in `u32`.
            #[inline]
            pub fn new(index: usize) -> Self {
                debug_assert!(index <= u32::MAX as usize, "index {} too large for u32", index);
                Self(index as u32)
            }

            /// Get the raw index value.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", $display, self.0)
            }
        }

        impl From<usize> for $name {
            fn from(v: usize) -> Self {
                Self::new(v)
            }
        }
    };
}

impl_index_type!(PointId, "P");
impl_index_type!(TriangleId, "T");
