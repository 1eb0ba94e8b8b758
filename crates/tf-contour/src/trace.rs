use std::collections::{BTreeMap, BTreeSet};

use tf_core::LatticePoint;

use crate::contour::{Contour, MIN_CONTOUR_POINTS};
use crate::edges::{Edge, EdgeSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceConfig {
    /// Drop interior points of straight runs from emitted contours.
    pub merge_collinear: bool,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            merge_collinear: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceOutput {
    pub contours: Vec<Contour>,
    /// Walks that reached a point with no outgoing edge before closing.
    pub dropped_open: usize,
    /// Closed walks with fewer than [`MIN_CONTOUR_POINTS`] points.
    pub dropped_short: usize,
}

/// Outgoing edges per lattice point, as destination sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyIndex {
    out: BTreeMap<LatticePoint, BTreeSet<LatticePoint>>,
}

impl AdjacencyIndex {
    pub fn from_edges(edges: &EdgeSet) -> Self {
        let mut out: BTreeMap<LatticePoint, BTreeSet<LatticePoint>> = BTreeMap::new();
        for edge in edges.iter() {
            out.entry(edge.from).or_default().insert(edge.to);
        }
        Self { out }
    }

    /// Destination of the outgoing edge taken from `p`: the smallest one.
    pub fn next_from(&self, p: LatticePoint) -> Option<LatticePoint> {
        self.out.get(&p).and_then(|dests| dests.first().copied())
    }

    pub fn out_degree(&self, p: LatticePoint) -> usize {
        self.out.get(&p).map_or(0, BTreeSet::len)
    }

    /// Removes `edge`, dropping the entry for `edge.from` once it is empty.
    pub fn remove(&mut self, edge: Edge) -> bool {
        let Some(dests) = self.out.get_mut(&edge.from) else {
            return false;
        };
        let removed = dests.remove(&edge.to);
        if dests.is_empty() {
            self.out.remove(&edge.from);
        }
        removed
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }
}

/// Walks `edges` into closed contours, consuming every edge exactly once.
///
/// Each walk starts at the smallest remaining edge. Where a point has more
/// than one outgoing edge (two pixels touching only at a corner) the edge
/// with the smallest destination is taken. Walks that get stuck before
/// returning to their start are discarded and counted, never reported as
/// errors.
pub fn trace_contours(mut edges: EdgeSet, cfg: &TraceConfig) -> TraceOutput {
    let mut adjacency = AdjacencyIndex::from_edges(&edges);
    let mut out = TraceOutput::default();

    while let Some(first) = edges.first() {
        let start = first.from;
        let mut points = vec![start];
        let mut cur = start;
        let mut closed = false;

        while let Some(next) = adjacency.next_from(cur) {
            let edge = Edge::new(cur, next);
            edges.remove(edge);
            adjacency.remove(edge);

            points.push(next);
            cur = next;
            if cur == start {
                closed = true;
                break;
            }
        }

        if !closed {
            out.dropped_open += 1;
            continue;
        }

        if points.len() < MIN_CONTOUR_POINTS {
            out.dropped_short += 1;
            continue;
        }

        if cfg.merge_collinear {
            points = merge_collinear(&points);
        }

        if let Some(contour) = Contour::new(points) {
            out.contours.push(contour);
        } else {
            out.dropped_short += 1;
        }
    }

    out
}

/// Keeps only the points where the walk changes direction.
///
/// `points` must be closed. The result starts at the first corner of the
/// cycle and is closed again.
fn merge_collinear(points: &[LatticePoint]) -> Vec<LatticePoint> {
    let cycle = &points[..points.len() - 1];
    let n = cycle.len();

    let mut corners = Vec::with_capacity(n + 1);
    for i in 0..n {
        let prev = cycle[(i + n - 1) % n];
        let cur = cycle[i];
        let next = cycle[(i + 1) % n];
        if (cur - prev).signum() != (next - cur).signum() {
            corners.push(cur);
        }
    }

    if corners.len() + 1 < MIN_CONTOUR_POINTS {
        return points.to_vec();
    }

    corners.push(corners[0]);
    corners
}
