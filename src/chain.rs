//! Chain extraction: walking a batch's adjacency graph.
//!
//! A chain linearizes one batch of triangles for incremental serialization.
//! The first record carries the three points of a start triangle found on the
//! batch boundary; every subsequent [`ChainStep`] crosses one shared edge and
//! introduces exactly one new point (the apex of the triangle entered). A
//! writer therefore stores three points up front and one point per triangle
//! after that, with successive deltas kept small for variable-length
//! encoding.
//!
//! The walk itself is shared between two pop policies (see
//! [`TraversalOrder`]); only the frontier container differs.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use nalgebra::Point2;

use crate::error::{ChainError, Result};
use crate::graph::{AdjacencyGraph, DirectedEdge};
use crate::index::{PointId, TriangleId};
use crate::points::QuantizedPoints;

/// The order in which the walk visits candidate triangles.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum TraversalOrder {
    /// Cost-ordered: always visit the candidate whose new apex is closest
    /// (per [`delta_cost`]) to the most recently emitted point. Smaller
    /// deltas between consecutively emitted points compress better under a
    /// delta/variable-length encoding.
    #[default]
    Greedy,

    /// Discovery-ordered: visit candidates last-discovered-first (a plain
    /// stack walk), skipping cost comparison. A cheaper fallback when
    /// compression quality does not matter.
    Discovery,
}

/// One step of a chain: the edge crossed and the point it introduces.
///
/// `edge` is oriented as the departed triangle owns it, so the triangle
/// entered by this step is `(edge.to, edge.from, apex)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ChainStep {
    /// The shared edge crossed, in the departed triangle's orientation.
    pub edge: DirectedEdge,
    /// The newly introduced apex of the triangle entered.
    pub apex: PointId,
}

/// The ordered traversal of one batch, covering every triangle exactly once.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Chain {
    start: [PointId; 3],
    steps: Vec<ChainStep>,
}

impl Chain {
    /// The start triangle's points: the start edge's endpoints followed by
    /// its apex. The apex is the last point "emitted" before any step.
    #[inline]
    pub fn start_points(&self) -> [PointId; 3] {
        self.start
    }

    /// The steps following the start triangle, in traversal order.
    #[inline]
    pub fn steps(&self) -> &[ChainStep] {
        &self.steps
    }

    /// The number of triangles the chain covers (the start triangle plus one
    /// per step).
    #[inline]
    pub fn triangle_count(&self) -> usize {
        1 + self.steps.len()
    }

    /// Sum of [`delta_cost`] between consecutively emitted points, starting
    /// from the start triangle's apex. This is the quantity the greedy
    /// traversal order tries to keep small.
    pub fn total_delta_cost(&self, points: &QuantizedPoints) -> u64 {
        let mut last = points.point(self.start[2]);
        let mut total = 0;
        for step in &self.steps {
            let apex = points.point(step.apex);
            total += delta_cost(apex, last);
            last = apex;
        }
        total
    }
}

/// Scalar cost of emitting `a` right after `b`: the Chebyshev distance
/// (componentwise maximum absolute difference) between the two quantized
/// points.
///
/// This is a tunable scoring heuristic, not a bit-exact contract; nothing
/// downstream depends on its exact value. It is pure and free of side
/// effects, so candidates can be scored without committing to a choice.
#[inline]
pub fn delta_cost(a: Point2<u32>, b: Point2<u32>) -> u64 {
    let dx = a.x.abs_diff(b.x) as u64;
    let dy = a.y.abs_diff(b.y) as u64;
    dx.max(dy)
}

/// A visitable triangle on the walk frontier.
#[derive(Debug, Clone)]
struct Candidate {
    /// Delta cost of the apex against the point most recently emitted when
    /// this candidate was discovered.
    cost: u64,
    /// The triangle to visit.
    triangle: TriangleId,
    /// The triangle it was discovered from.
    from: TriangleId,
    /// The shared edge, in `from`'s orientation.
    edge: DirectedEdge,
    /// The new point this visit would introduce.
    apex: PointId,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.triangle == other.triangle
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-cost-first behavior in a max-heap; ties broken by
        // triangle id to keep pop order deterministic.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.triangle.cmp(&self.triangle))
    }
}

/// The container behind the walk: decides which discovered candidate is
/// visited next.
trait Frontier {
    fn push(&mut self, candidate: Candidate);
    fn pop(&mut self) -> Option<Candidate>;
}

/// Min-cost-first frontier for [`TraversalOrder::Greedy`].
impl Frontier for BinaryHeap<Candidate> {
    fn push(&mut self, candidate: Candidate) {
        BinaryHeap::push(self, candidate);
    }

    fn pop(&mut self) -> Option<Candidate> {
        BinaryHeap::pop(self)
    }
}

/// LIFO frontier for [`TraversalOrder::Discovery`].
impl Frontier for Vec<Candidate> {
    fn push(&mut self, candidate: Candidate) {
        Vec::push(self, candidate);
    }

    fn pop(&mut self) -> Option<Candidate> {
        Vec::pop(self)
    }
}

/// Extract the chain covering every triangle of `graph`.
///
/// Starts at [`AdjacencyGraph::find_start_edge`] and walks the adjacency
/// graph, visiting each triangle exactly once. Fails with
/// [`ChainError::NoBoundaryEdge`] when the graph has no valid start (which
/// includes an empty graph — callers that tolerate empty batches skip them
/// before building, as [`BatchCollection::process`] does) and with
/// [`ChainError::DisconnectedBatch`] when triangles remain unreachable from
/// the start.
///
/// [`BatchCollection::process`]: crate::collection::BatchCollection::process
pub fn build_chain(
    graph: &AdjacencyGraph,
    points: &QuantizedPoints,
    order: TraversalOrder,
) -> Result<Chain> {
    match order {
        TraversalOrder::Greedy => walk(graph, points, BinaryHeap::new()),
        TraversalOrder::Discovery => walk(graph, points, Vec::new()),
    }
}

fn walk<F: Frontier>(graph: &AdjacencyGraph, points: &QuantizedPoints, mut frontier: F) -> Result<Chain> {
    let (start_edge, start_id) = graph.find_start_edge()?;
    let start_apex = graph.triangle(start_id).apex_opposite(start_edge);

    let mut visited = vec![false; graph.len()];
    visited[start_id.index()] = true;
    let mut visited_count = 1;
    let mut steps = Vec::with_capacity(graph.len() - 1);
    let mut last_emitted = points.point(start_apex);

    enqueue_neighbors(graph, points, &mut frontier, start_id, None, last_emitted, &visited);

    while let Some(candidate) = frontier.pop() {
        // A triangle can sit on the frontier once per unvisited neighbor;
        // later copies are stale by the time they surface.
        if visited[candidate.triangle.index()] {
            continue;
        }
        visited[candidate.triangle.index()] = true;
        visited_count += 1;

        steps.push(ChainStep { edge: candidate.edge, apex: candidate.apex });
        last_emitted = points.point(candidate.apex);

        enqueue_neighbors(
            graph,
            points,
            &mut frontier,
            candidate.triangle,
            Some(candidate.from),
            last_emitted,
            &visited,
        );
    }

    if visited_count < graph.len() {
        return Err(ChainError::DisconnectedBatch { visited: visited_count, total: graph.len() });
    }

    Ok(Chain { start: [start_edge.from, start_edge.to, start_apex], steps })
}

fn enqueue_neighbors<F: Frontier>(
    graph: &AdjacencyGraph,
    points: &QuantizedPoints,
    frontier: &mut F,
    from: TriangleId,
    came_from: Option<TriangleId>,
    last_emitted: Point2<u32>,
    visited: &[bool],
) {
    for (edge, neighbor) in graph.neighbors_except(from, came_from) {
        if visited[neighbor.index()] {
            continue;
        }
        let apex = graph.triangle(neighbor).apex_opposite(edge);
        frontier.push(Candidate {
            cost: delta_cost(points.point(apex), last_emitted),
            triangle: neighbor,
            from,
            edge,
            apex,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::points::PointStore;

    fn pid(i: usize) -> PointId {
        PointId::new(i)
    }

    /// Quantize integer-valued points one-to-one.
    fn quantize_identity(points: &[Point2<f64>]) -> QuantizedPoints {
        let mut store = PointStore::new();
        store.assign_points(points);
        store.quantize(Point2::new(0, 0), Point2::new(1000, 1000), |p| {
            Point2::new(p.x as u32, p.y as u32)
        })
    }

    /// The point-id set of the triangle a step enters, sorted.
    fn entered_triangle(step: &ChainStep) -> [usize; 3] {
        let mut t = [step.edge.to.index(), step.edge.from.index(), step.apex.index()];
        t.sort_unstable();
        t
    }

    /// An n-by-n grid split into 2n² triangles, as one batch.
    fn grid(n: usize) -> (AdjacencyGraph, QuantizedPoints) {
        let mut points = Vec::with_capacity((n + 1) * (n + 1));
        for j in 0..=n {
            for i in 0..=n {
                points.push(Point2::new(i as f64, j as f64));
            }
        }

        let mut graph = AdjacencyGraph::with_capacity(n * n * 2);
        for j in 0..n {
            for i in 0..n {
                let v00 = j * (n + 1) + i;
                let v10 = v00 + 1;
                let v01 = v00 + (n + 1);
                let v11 = v01 + 1;

                graph.add(pid(v00), pid(v10), pid(v11)).unwrap();
                graph.add(pid(v00), pid(v11), pid(v01)).unwrap();
            }
        }
        (graph, quantize_identity(&points))
    }

    #[test]
    fn test_single_triangle_chain() {
        let mut graph = AdjacencyGraph::with_capacity(1);
        graph.add(pid(0), pid(1), pid(2)).unwrap();
        let points = quantize_identity(&[
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ]);

        for order in [TraversalOrder::Greedy, TraversalOrder::Discovery] {
            let chain = build_chain(&graph, &points, order).unwrap();
            assert_eq!(chain.triangle_count(), 1);
            assert!(chain.steps().is_empty());
            assert_eq!(chain.start_points(), [pid(0), pid(1), pid(2)]);
        }
    }

    #[test]
    fn test_grid_chain_covers_every_triangle_once() {
        let (graph, points) = grid(3);
        let total = graph.len();

        for order in [TraversalOrder::Greedy, TraversalOrder::Discovery] {
            let chain = build_chain(&graph, &points, order).unwrap();
            assert_eq!(chain.triangle_count(), total);

            // Every step enters a distinct triangle, none of them the start.
            let mut start = chain.start_points().map(PointId::index);
            start.sort_unstable();
            let mut seen = std::collections::HashSet::new();
            for step in chain.steps() {
                let t = entered_triangle(step);
                assert_ne!(t, start);
                assert!(seen.insert(t), "triangle {:?} entered twice", t);
            }
            assert_eq!(seen.len(), total - 1);
        }
    }

    #[test]
    fn test_fan_ring_with_multiple_discovery_paths() {
        // Four triangles around a center point; the last one visited is
        // discoverable from both of its neighbors, so the frontier holds a
        // stale duplicate that must be skipped, not re-emitted.
        let mut graph = AdjacencyGraph::with_capacity(4);
        graph.add(pid(0), pid(1), pid(4)).unwrap();
        graph.add(pid(1), pid(2), pid(4)).unwrap();
        graph.add(pid(2), pid(3), pid(4)).unwrap();
        graph.add(pid(3), pid(0), pid(4)).unwrap();
        let points = quantize_identity(&[
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
            Point2::new(1.0, 1.0),
        ]);

        for order in [TraversalOrder::Greedy, TraversalOrder::Discovery] {
            let chain = build_chain(&graph, &points, order).unwrap();
            assert_eq!(chain.triangle_count(), 4);

            let mut seen: Vec<[usize; 3]> = chain.steps().iter().map(entered_triangle).collect();
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), 3);
        }
    }

    #[test]
    fn test_greedy_picks_cheaper_branch_first() {
        // A center triangle reached from T1, then a fork: T2's apex (point 4)
        // is one unit from the last emitted point, T3's apex (point 5) is 90
        // units away. Greedy takes T2 first; discovery pops the fork in
        // reverse discovery order and takes T3 first.
        let points = quantize_identity(&[
            Point2::new(0.0, 0.0),   // 0
            Point2::new(5.0, 5.0),   // 1
            Point2::new(10.0, 10.0), // 2
            Point2::new(0.0, 10.0),  // 3
            Point2::new(11.0, 10.0), // 4
            Point2::new(100.0, 10.0), // 5
        ]);
        let mut graph = AdjacencyGraph::with_capacity(4);
        graph.add(pid(0), pid(1), pid(2)).unwrap();
        graph.add(pid(1), pid(0), pid(3)).unwrap();
        graph.add(pid(2), pid(1), pid(4)).unwrap();
        graph.add(pid(0), pid(2), pid(5)).unwrap();

        let greedy = build_chain(&graph, &points, TraversalOrder::Greedy).unwrap();
        let discovery = build_chain(&graph, &points, TraversalOrder::Discovery).unwrap();

        let greedy_apexes: Vec<_> = greedy.steps().iter().map(|s| s.apex.index()).collect();
        let discovery_apexes: Vec<_> = discovery.steps().iter().map(|s| s.apex.index()).collect();
        assert_eq!(greedy_apexes, vec![2, 4, 5]);
        assert_eq!(discovery_apexes, vec![2, 5, 4]);

        let greedy_cost = greedy.total_delta_cost(&points);
        let discovery_cost = discovery.total_delta_cost(&points);
        assert_eq!(greedy_cost, 95);
        assert_eq!(discovery_cost, 184);
        assert!(greedy_cost <= discovery_cost);
    }

    #[test]
    fn test_orders_agree_on_a_strip() {
        // A fan is a linear strip of triangles: the frontier never holds more
        // than one candidate, so both pop policies walk the same chain and
        // the greedy order cannot cost more than the discovery order.
        let points = quantize_identity(&[
            Point2::new(5.0, 5.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 4.0),
            Point2::new(10.0, 8.0),
            Point2::new(6.0, 10.0),
            Point2::new(2.0, 10.0),
        ]);
        let mut graph = AdjacencyGraph::with_capacity(4);
        for i in 0..4 {
            graph.add(pid(0), pid(i + 1), pid(i + 2)).unwrap();
        }

        let greedy = build_chain(&graph, &points, TraversalOrder::Greedy).unwrap();
        let discovery = build_chain(&graph, &points, TraversalOrder::Discovery).unwrap();

        assert_eq!(greedy, discovery);
        assert_eq!(
            greedy.total_delta_cost(&points),
            discovery.total_delta_cost(&points)
        );
    }

    #[test]
    fn test_disconnected_batch_reported() {
        let mut graph = AdjacencyGraph::with_capacity(2);
        graph.add(pid(0), pid(1), pid(2)).unwrap();
        graph.add(pid(3), pid(4), pid(5)).unwrap();
        let points = quantize_identity(&[
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(5.0, 5.0),
            Point2::new(6.0, 5.0),
            Point2::new(5.0, 6.0),
        ]);

        let err = build_chain(&graph, &points, TraversalOrder::Greedy).unwrap_err();
        assert_eq!(err, ChainError::DisconnectedBatch { visited: 1, total: 2 });
    }

    #[test]
    fn test_delta_cost_is_chebyshev() {
        assert_eq!(delta_cost(Point2::new(3, 4), Point2::new(3, 4)), 0);
        assert_eq!(delta_cost(Point2::new(10, 4), Point2::new(3, 4)), 7);
        assert_eq!(delta_cost(Point2::new(1, 9), Point2::new(4, 2)), 7);
        // Symmetric
        assert_eq!(
            delta_cost(Point2::new(1, 9), Point2::new(4, 2)),
            delta_cost(Point2::new(4, 2), Point2::new(1, 9))
        );
    }
}
