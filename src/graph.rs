//! Triangle adjacency graph for one tessellation batch.
//!
//! Each batch of triangles delivered by the upstream tessellator is indexed
//! by an [`AdjacencyGraph`]: an arena of [`Triangle`]s with stable ids plus a
//! hash map from [`DirectedEdge`] to the owning triangle. Two triangles that
//! share an edge reference it in opposite directions (an invariant of any
//! valid planar triangulation), so a triangle's neighbor across an edge is
//! simply the owner of the reversed edge. Neighbor relationships are derived
//! on demand from the map rather than stored as back-references.
//!
//! The graph is populated fully with [`AdjacencyGraph::add`] before any chain
//! extraction reads it.

use std::collections::HashMap;

use crate::error::{ChainError, Result};
use crate::index::{PointId, TriangleId};

/// A directed edge between two points, used as the adjacency-map key.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct DirectedEdge {
    /// The edge's source point.
    pub from: PointId,
    /// The edge's destination point.
    pub to: PointId,
}

impl DirectedEdge {
    /// Create a directed edge from `from` to `to`.
    #[inline]
    pub fn new(from: PointId, to: PointId) -> Self {
        Self { from, to }
    }

    /// The same edge traversed in the opposite direction.
    #[inline]
    pub fn reversed(self) -> Self {
        Self { from: self.to, to: self.from }
    }
}

/// A triangle, stored as three point ids.
///
/// Vertex order is significant only through the three directed edges it
/// defines: p0→p1, p1→p2, p2→p0.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Triangle {
    points: [PointId; 3],
}

impl Triangle {
    /// Create a triangle from three point ids.
    #[inline]
    pub fn new(p0: PointId, p1: PointId, p2: PointId) -> Self {
        Self { points: [p0, p1, p2] }
    }

    /// The triangle's three point ids, in construction order.
    #[inline]
    pub fn points(&self) -> [PointId; 3] {
        self.points
    }

    /// The triangle's three directed edges: p0→p1, p1→p2, p2→p0.
    #[inline]
    pub fn edges(&self) -> [DirectedEdge; 3] {
        let [p0, p1, p2] = self.points;
        [
            DirectedEdge::new(p0, p1),
            DirectedEdge::new(p1, p2),
            DirectedEdge::new(p2, p0),
        ]
    }

    /// The vertex not on `edge`: the apex a chain step introduces when the
    /// walk crosses `edge` into this triangle.
    ///
    /// `edge` must connect two of this triangle's vertices (in either
    /// direction); the triangle must not be degenerate.
    pub fn apex_opposite(&self, edge: DirectedEdge) -> PointId {
        for &p in &self.points {
            if p != edge.from && p != edge.to {
                return p;
            }
        }
        debug_assert!(false, "edge {:?} spans all vertices of {:?}", edge, self);
        self.points[0]
    }
}

/// The directed-edge index for one batch of triangles.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyGraph {
    triangles: Vec<Triangle>,
    edge_owner: HashMap<DirectedEdge, TriangleId>,
}

impl AdjacencyGraph {
    /// Create an empty graph with storage reserved for `count` triangles.
    pub fn with_capacity(count: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(count),
            edge_owner: HashMap::with_capacity(count * 3),
        }
    }

    /// Get the number of triangles in the batch.
    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Check whether the batch has no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Get a triangle by id.
    #[inline]
    pub fn triangle(&self, id: TriangleId) -> &Triangle {
        &self.triangles[id.index()]
    }

    /// The batch's triangles in insertion order.
    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Append a triangle and index its three directed edges.
    ///
    /// Rejects degenerate triangles (repeated vertex). A directed edge that
    /// is already owned by an earlier triangle means the input is not a valid
    /// planar triangulation; that case trips a debug assertion, and in
    /// release builds the later triangle takes over the entry (last write
    /// wins, matching the map's insert semantics).
    pub fn add(&mut self, p0: PointId, p1: PointId, p2: PointId) -> Result<TriangleId> {
        if p0 == p1 || p1 == p2 || p0 == p2 {
            return Err(ChainError::DegenerateTriangle { triangle: self.triangles.len() });
        }

        let id = TriangleId::new(self.triangles.len());
        let triangle = Triangle::new(p0, p1, p2);
        for edge in triangle.edges() {
            let previous = self.edge_owner.insert(edge, id);
            debug_assert!(
                previous.is_none(),
                "directed edge {:?} owned by both {:?} and {:?}",
                edge,
                previous.unwrap(),
                id
            );
        }
        self.triangles.push(triangle);
        Ok(id)
    }

    /// Find a boundary edge to start the chain walk from.
    ///
    /// Scans triangles in insertion order (and each triangle's edges in
    /// definition order) for the first directed edge whose reverse has no
    /// owner, returning that edge and its owning triangle. The scan order is
    /// a deliberately non-geometric tie-break: any boundary edge is an
    /// equally valid start, and only connectivity matters for correctness.
    ///
    /// Fails with [`ChainError::NoBoundaryEdge`] when every edge is paired,
    /// which a triangulated polygon-with-holes region can never produce.
    pub fn find_start_edge(&self) -> Result<(DirectedEdge, TriangleId)> {
        for (i, triangle) in self.triangles.iter().enumerate() {
            for edge in triangle.edges() {
                if !self.edge_owner.contains_key(&edge.reversed()) {
                    return Ok((edge, TriangleId::new(i)));
                }
            }
        }
        Err(ChainError::NoBoundaryEdge)
    }

    /// The triangles adjacent to `id`, excluding the one just departed from.
    ///
    /// Yields up to two `(edge, neighbor)` pairs, where `edge` is the shared
    /// edge in `id`'s own orientation and `neighbor` owns its reverse. Fewer
    /// pairs are yielded when some of the triangle's edges are boundary
    /// edges. Pass `None` for the walk's first triangle.
    pub fn neighbors_except(
        &self,
        id: TriangleId,
        came_from: Option<TriangleId>,
    ) -> impl Iterator<Item = (DirectedEdge, TriangleId)> + '_ {
        self.triangle(id)
            .edges()
            .into_iter()
            .filter_map(move |edge| {
                self.edge_owner
                    .get(&edge.reversed())
                    .map(|&neighbor| (edge, neighbor))
            })
            .filter(move |&(_, neighbor)| Some(neighbor) != came_from)
    }
}
