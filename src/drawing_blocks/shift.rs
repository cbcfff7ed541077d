use fixedbitset::FixedBitSet;
use petgraph::graph::NodeIndex;
use tracing::debug;

use crate::drawing_blocks::contour::Contour;
use crate::error::LayoutError;
use crate::types::{GridPoint, PlaneGraph};

/// Horizontal shift applied to one vertex while making room for a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub vertex: usize,
    pub dx: i64,
}

/// Record of one layout step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub vertex: usize,
    pub position: GridPoint,
    /// Leftmost and rightmost contour neighbours, `None` for the first three vertices.
    pub left: Option<usize>,
    pub right: Option<usize>,
    /// Empty unless moves are recorded.
    pub moves: Vec<Move>,
}

/// De Fraysseix, Pach and Pollack's shift method, replaying a canonical order one vertex at a time.
///
/// Every contour vertex owns the vertices it buried when it was placed. Shifting a contour vertex
/// also shifts everything it owns, transitively, so the drawing below the contour moves rigidly.
#[derive(Debug, Clone)]
pub struct ShiftLayout {
    order: Vec<usize>,
    next: usize,
    coordinates: Vec<GridPoint>,
    placed: FixedBitSet,
    contour: Option<Contour>,
    covered: Vec<Vec<usize>>,
    record_moves: bool,
}

impl ShiftLayout {
    /// Checks that `order` is a permutation of the vertices whose third vertex closes a triangle
    /// with the first two. The remaining conditions are checked as the vertices get placed.
    pub fn new(graph: &PlaneGraph, order: Vec<usize>, record_moves: bool) -> Result<Self, LayoutError> {
        let n = graph.node_count();
        if order.len() != n || n < 3 {
            return Err(LayoutError::WrongLength {
                expected: n.max(3),
                found: order.len(),
            });
        }

        let mut seen = FixedBitSet::with_capacity(n);
        for &v in order.iter() {
            if v >= n || seen.put(v) {
                return Err(LayoutError::NotPermutation { vertex: v });
            }
        }

        let (v1, v2, v3) = (order[0], order[1], order[2]);
        let adjacent = |a: usize, b: usize| graph.contains_edge(NodeIndex::new(a), NodeIndex::new(b));
        if !(adjacent(v1, v2) && adjacent(v3, v1) && adjacent(v3, v2)) {
            return Err(LayoutError::BaseNotAdjacent { vertex: v3, v1, v2 });
        }

        Ok(ShiftLayout {
            order,
            next: 0,
            coordinates: vec![(0, 0); n],
            placed: FixedBitSet::with_capacity(n),
            contour: None,
            covered: vec![Vec::new(); n],
            record_moves,
        })
    }

    pub fn is_done(&self) -> bool {
        self.next == self.order.len()
    }

    /// Valid for placed vertices only.
    pub fn coordinates(&self) -> &[GridPoint] {
        &self.coordinates
    }

    /// Vertices each vertex buried under itself when it was placed.
    pub fn covering(&self) -> &[Vec<usize>] {
        &self.covered
    }

    pub fn into_parts(self) -> (Vec<GridPoint>, Vec<Vec<usize>>) {
        (self.coordinates, self.covered)
    }

    /// Current contour, left to right. Empty before the third vertex is placed.
    pub fn contour(&self) -> Vec<usize> {
        self.contour.as_ref().map(|c| c.iter().collect()).unwrap_or_default()
    }

    /// Places the next vertex of the order. Returns `None` once every vertex is placed.
    pub fn step(&mut self, graph: &PlaneGraph) -> Result<Option<Placement>, LayoutError> {
        let Some(&vertex) = self.order.get(self.next) else {
            return Ok(None);
        };

        let placement = match self.next {
            0 => self.place_base(vertex, (0, 0)),
            1 => self.place_base(vertex, (2, 0)),
            2 => {
                self.contour = Some(Contour::new(self.order.len(), self.order[0], vertex, self.order[1]));
                self.place_base(vertex, (1, 1))
            }
            _ => self.place_on_contour(graph, vertex)?,
        };

        self.placed.insert(vertex);
        self.next += 1;
        debug!(
            vertex,
            x = placement.position.0,
            y = placement.position.1,
            "vertex placed"
        );
        Ok(Some(placement))
    }

    fn place_base(&mut self, vertex: usize, position: GridPoint) -> Placement {
        self.coordinates[vertex] = position;
        Placement {
            vertex,
            position,
            left: None,
            right: None,
            moves: Vec::new(),
        }
    }

    fn place_on_contour(&mut self, graph: &PlaneGraph, vertex: usize) -> Result<Placement, LayoutError> {
        let not_consecutive = LayoutError::NonContiguousNeighbours { vertex };
        let Some(contour) = self.contour.as_mut() else {
            return Err(not_consecutive);
        };

        let mut is_neighbor = FixedBitSet::with_capacity(self.order.len());
        is_neighbor.extend(
            graph
                .neighbors(NodeIndex::new(vertex))
                .map(|w| w.index())
                .filter(|&w| self.placed[w]),
        );
        let placed_neighbors = is_neighbor.count_ones(..);

        let on_contour: Vec<usize> = contour.iter().filter(|&w| is_neighbor[w]).collect();
        let (Some(&wp), Some(&wq)) = (on_contour.first(), on_contour.last()) else {
            return Err(not_consecutive);
        };
        let inner = contour.between(wp, wq);
        if on_contour.len() < 2
            || on_contour.len() != placed_neighbors
            || inner.len() + 2 != placed_neighbors
        {
            return Err(not_consecutive);
        }

        let mut moves = Vec::new();
        for &w in inner.iter() {
            shift_tree(&mut self.coordinates, &self.covered, w, 1, self.record_moves, &mut moves);
        }
        let right_side: Vec<usize> = std::iter::successors(Some(wq), |&w| contour.next_of(w)).collect();
        for w in right_side {
            shift_tree(&mut self.coordinates, &self.covered, w, 2, self.record_moves, &mut moves);
        }

        let ((xp, yp), (xq, yq)) = (self.coordinates[wp], self.coordinates[wq]);
        debug_assert_eq!((xq - xp + yq - yp) % 2, 0);
        let position = ((xp + xq + yq - yp) / 2, (xq - xp + yq + yp) / 2);
        self.coordinates[vertex] = position;

        self.covered[vertex] = contour.splice(wp, vertex, wq);

        Ok(Placement {
            vertex,
            position,
            left: Some(wp),
            right: Some(wq),
            moves,
        })
    }
}

/// Shifts `root` and everything it covers, transitively, by `dx`.
fn shift_tree(
    coordinates: &mut [GridPoint],
    covered: &[Vec<usize>],
    root: usize,
    dx: i64,
    record: bool,
    moves: &mut Vec<Move>,
) {
    let mut stack = vec![root];
    while let Some(v) = stack.pop() {
        coordinates[v].0 += dx;
        if record {
            moves.push(Move { vertex: v, dx });
        }
        stack.extend(covered[v].iter().copied());
    }
}

/// Grid coordinates of every vertex, indexed by vertex, for a canonical `order` of `graph`.
pub fn shift_layout(graph: &PlaneGraph, order: &[usize]) -> Result<Vec<GridPoint>, LayoutError> {
    let mut layout = ShiftLayout::new(graph, order.to_vec(), false)?;
    while layout.step(graph)?.is_some() {}
    Ok(layout.into_parts().0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing_blocks::canonical::canonical_order;
    use crate::drawing_blocks::rotation::RotationSystem;
    use crate::input::from_str;
    use crate::testing::crossings::find_defect;
    use crate::testing::grids::triangulated_grid;
    use crate::testing::triangulations::{random_stacked_triangulation, random_triangulation};

    fn k4() -> PlaneGraph {
        from_str("0,0,0\n1,4,0\n2,2,4\n3,2,1\n0,1\n1,2\n2,0\n0,3\n1,3\n2,3").unwrap()
    }

    fn layout_of(graph: &PlaneGraph) -> Vec<GridPoint> {
        let rot = RotationSystem::new(graph);
        let order = canonical_order(graph, &rot).unwrap();
        shift_layout(graph, &order).unwrap()
    }

    fn assert_valid_drawing(graph: &PlaneGraph, coordinates: &[GridPoint]) {
        let n = graph.node_count() as i64;
        if let Some(defect) = find_defect(graph, coordinates) {
            panic!("{}", defect);
        }
        for &(x, y) in coordinates {
            assert!((0..=2 * n - 4).contains(&x), "x = {} out of range", x);
            assert!((0..=n - 2).contains(&y), "y = {} out of range", y);
        }
    }

    #[test]
    fn test_triangle() {
        let g = from_str("0,0,0\n1,2,0\n2,1,1\n0,1\n1,2\n2,0").unwrap();
        assert_eq!(shift_layout(&g, &[0, 1, 2]).unwrap(), vec![(0, 0), (2, 0), (1, 1)]);
    }

    #[test]
    fn test_k4() {
        let g = k4();
        let mut layout = ShiftLayout::new(&g, vec![0, 1, 3, 2], true).unwrap();
        for _ in 0..3 {
            layout.step(&g).unwrap();
        }
        assert_eq!(layout.contour(), vec![0, 3, 1]);

        let last = layout.step(&g).unwrap().unwrap();
        assert_eq!(last.left, Some(0));
        assert_eq!(last.right, Some(1));
        // 3 shifts by one, 1 by two
        assert_eq!(last.moves, vec![Move { vertex: 3, dx: 1 }, Move { vertex: 1, dx: 2 }]);
        assert_eq!(layout.step(&g).unwrap(), None);

        assert_eq!(layout.coordinates(), &[(0, 0), (4, 0), (2, 2), (2, 1)]);
        assert_eq!(layout.covering()[2], vec![3]);
        assert_eq!(layout.contour(), vec![0, 2, 1]);
        assert_valid_drawing(&g, layout.coordinates());
    }

    #[test]
    fn test_random_triangulations_are_drawn_planar() {
        for seed in 0..15 {
            let g = random_triangulation(35, seed);
            assert_valid_drawing(&g, &layout_of(&g));
        }
    }

    #[test]
    fn test_stacked_triangulations_are_drawn_planar() {
        for seed in 0..15 {
            let g = random_stacked_triangulation(35, seed);
            let coordinates = layout_of(&g);
            assert_valid_drawing(&g, &coordinates);
            // the last vertex sits on top of the whole drawing
            let n = g.node_count() as i64;
            assert_eq!(coordinates[0], (0, 0));
            assert_eq!(coordinates[1], (2 * n - 4, 0));
            assert_eq!(coordinates[2], (n - 2, n - 2));
        }
    }

    #[test]
    fn test_grid() {
        let g = triangulated_grid(4, 5);
        assert_valid_drawing(&g, &layout_of(&g));
    }

    #[test]
    fn test_same_input_same_layout() {
        let g = random_triangulation(25, 11);
        assert_eq!(layout_of(&g), layout_of(&g));
    }

    #[test]
    fn test_order_validation() {
        let g = k4();
        assert_eq!(
            ShiftLayout::new(&g, vec![0, 1, 3], false).unwrap_err(),
            LayoutError::WrongLength { expected: 4, found: 3 }
        );
        assert_eq!(
            ShiftLayout::new(&g, vec![0, 1, 3, 3], false).unwrap_err(),
            LayoutError::NotPermutation { vertex: 3 }
        );
        assert_eq!(
            ShiftLayout::new(&g, vec![0, 1, 3, 7], false).unwrap_err(),
            LayoutError::NotPermutation { vertex: 7 }
        );
    }

    #[test]
    fn test_base_must_be_triangle() {
        // square with one diagonal, 1 and 3 are not adjacent
        let g = from_str("0,0,0\n1,1,0\n2,1,1\n3,0,1\n0,1\n1,2\n2,3\n3,0\n0,2").unwrap();
        assert_eq!(
            ShiftLayout::new(&g, vec![0, 1, 3, 2], false).unwrap_err(),
            LayoutError::BaseNotAdjacent { vertex: 3, v1: 0, v2: 1 }
        );
    }

    #[test]
    fn test_non_consecutive_neighbours() {
        // 4 only sees 0 and 1, but 3 lies between them on the contour
        let g = from_str(
            "0,0,0\n1,4,0\n2,2,4\n3,2,1\n4,2,-1\n0,1\n1,2\n2,0\n0,3\n1,3\n2,3\n0,4\n1,4",
        )
        .unwrap();
        let mut layout = ShiftLayout::new(&g, vec![0, 1, 3, 4, 2], false).unwrap();
        for _ in 0..3 {
            layout.step(&g).unwrap();
        }
        assert_eq!(
            layout.step(&g).unwrap_err(),
            LayoutError::NonContiguousNeighbours { vertex: 4 }
        );
    }
}
