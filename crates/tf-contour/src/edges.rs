use std::collections::BTreeSet;

use tf_core::{LatticePoint, PixelGrid};

/// Directed edge between two lattice points.
///
/// Edges built from a [`PixelGrid`] are always one unit long. Ordering is by
/// `(from, to)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    pub from: LatticePoint,
    pub to: LatticePoint,
}

impl Edge {
    pub const fn new(from: LatticePoint, to: LatticePoint) -> Self {
        Self { from, to }
    }

    pub fn reversed(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }
}

/// Boundary edges of pixel `(x, y)`, going top, right, bottom, left.
///
/// With y pointing down this walks the cell clockwise on screen.
pub fn cell_edges(x: i32, y: i32) -> [Edge; 4] {
    let tl = LatticePoint::new(x, y);
    let tr = LatticePoint::new(x + 1, y);
    let br = LatticePoint::new(x + 1, y + 1);
    let bl = LatticePoint::new(x, y + 1);
    [
        Edge::new(tl, tr),
        Edge::new(tr, br),
        Edge::new(br, bl),
        Edge::new(bl, tl),
    ]
}

/// Set of directed edges in which an edge and its reverse never coexist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeSet {
    edges: BTreeSet<Edge>,
}

impl EdgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Symmetric-difference insert.
    ///
    /// If the reverse of `edge` is present it is removed; otherwise if `edge`
    /// itself is present it is removed; otherwise `edge` is inserted. Returns
    /// `true` only in the last case.
    pub fn insert_cancelling(&mut self, edge: Edge) -> bool {
        if self.edges.remove(&edge.reversed()) {
            return false;
        }
        if self.edges.remove(&edge) {
            return false;
        }
        self.edges.insert(edge)
    }

    pub fn contains(&self, edge: Edge) -> bool {
        self.edges.contains(&edge)
    }

    pub fn remove(&mut self, edge: Edge) -> bool {
        self.edges.remove(&edge)
    }

    /// Smallest remaining edge.
    pub fn first(&self) -> Option<Edge> {
        self.edges.first().copied()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges.iter().copied()
    }
}

impl FromIterator<Edge> for EdgeSet {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        let mut set = Self::new();
        for edge in iter {
            set.insert_cancelling(edge);
        }
        set
    }
}

/// Collects the boundary of every on-pixel region in `grid`.
///
/// Edges shared by two on-pixels cancel, so only edges with an on-pixel on
/// exactly one side survive. Hole boundaries come out with the opposite
/// rotation to outer boundaries.
pub fn build_edge_set(grid: &PixelGrid) -> EdgeSet {
    let mut set = EdgeSet::new();
    for (x, y) in grid.on_pixels() {
        for edge in cell_edges(x as i32, y as i32) {
            set.insert_cancelling(edge);
        }
    }
    set
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use tf_core::{LatticePoint, PixelGrid};

    use super::{Edge, EdgeSet, build_edge_set, cell_edges};

    fn p(x: i32, y: i32) -> LatticePoint {
        LatticePoint::new(x, y)
    }

    #[test]
    fn cancelling_insert_rules() {
        let e = Edge::new(p(0, 0), p(1, 0));
        let mut set = EdgeSet::new();

        assert!(set.insert_cancelling(e));
        assert!(set.contains(e));

        assert!(!set.insert_cancelling(e.reversed()));
        assert!(set.is_empty());

        set.insert_cancelling(e);
        assert!(!set.insert_cancelling(e));
        assert!(set.is_empty());
    }

    #[test]
    fn blank_grid_has_no_edges() {
        let grid = PixelGrid::blank(8, 8).expect("valid grid");
        assert!(build_edge_set(&grid).is_empty());
    }

    #[test]
    fn single_pixel_keeps_all_four_edges() {
        let grid = PixelGrid::from_rows(&["...", ".#.", "..."]).expect("valid grid");
        let set = build_edge_set(&grid);

        assert_eq!(set.iter().collect::<Vec<_>>(), {
            let mut v = cell_edges(1, 1).to_vec();
            v.sort();
            v
        });
    }

    #[test]
    fn solid_square_keeps_only_perimeter() {
        let grid = PixelGrid::from_rows(&["###", "###", "###"]).expect("valid grid");
        let set = build_edge_set(&grid);

        assert_eq!(set.len(), 12);
        // Interior edge between (0,0) and (1,0) cancelled in both directions.
        assert!(!set.contains(Edge::new(p(1, 0), p(1, 1))));
        assert!(!set.contains(Edge::new(p(1, 1), p(1, 0))));
        assert!(set.contains(Edge::new(p(0, 0), p(1, 0))));
        assert!(set.contains(Edge::new(p(3, 2), p(3, 3))));
        assert!(set.contains(Edge::new(p(0, 1), p(0, 0))));
    }

    #[test]
    fn ring_keeps_outer_and_hole_boundaries() {
        let grid = PixelGrid::from_rows(&["####", "#..#", "#..#", "####"]).expect("valid grid");
        let set = build_edge_set(&grid);

        assert_eq!(set.len(), 16 + 8);
        // Hole top edge is the bottom edge of pixel (1, 0), walking left.
        assert!(set.contains(Edge::new(p(2, 1), p(1, 1))));
        assert!(!set.contains(Edge::new(p(1, 1), p(2, 1))));
    }

    fn expected_boundary(grid: &PixelGrid) -> EdgeSet {
        let on = |x: i32, y: i32| x >= 0 && y >= 0 && grid.is_on(x as usize, y as usize);
        let mut expected = EdgeSet::new();
        for (x, y) in grid.on_pixels() {
            let (x, y) = (x as i32, y as i32);
            let [top, right, bottom, left] = cell_edges(x, y);
            let sides = [
                (top, on(x, y - 1)),
                (right, on(x + 1, y)),
                (bottom, on(x, y + 1)),
                (left, on(x - 1, y)),
            ];
            for (edge, neighbor_on) in sides {
                if !neighbor_on {
                    expected.insert_cancelling(edge);
                }
            }
        }
        expected
    }

    fn arb_grid() -> impl Strategy<Value = PixelGrid> {
        (1usize..10, 1usize..10).prop_flat_map(|(w, h)| {
            proptest::collection::vec(any::<bool>(), w * h).prop_map(move |bits| {
                let on = bits
                    .iter()
                    .enumerate()
                    .filter(|(_, b)| **b)
                    .map(|(i, _)| (i % w, i / w));
                PixelGrid::from_on_pixels(w, h, on).expect("valid grid")
            })
        })
    }

    proptest! {
        #[test]
        fn surviving_edges_are_exactly_the_boundary(grid in arb_grid()) {
            let set = build_edge_set(&grid);
            prop_assert_eq!(set, expected_boundary(&grid));
        }

        #[test]
        fn no_edge_coexists_with_its_reverse(grid in arb_grid()) {
            let set = build_edge_set(&grid);
            for edge in set.iter() {
                prop_assert!(!set.contains(edge.reversed()));
            }
        }
    }
}
