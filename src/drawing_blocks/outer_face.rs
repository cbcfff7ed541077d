use fixedbitset::FixedBitSet;
use petgraph::graph::NodeIndex;

use crate::drawing_blocks::faces::Face;
use crate::error::OuterFaceAmbiguousError;
use crate::types::{PlaneGraph, Point};

/// Andrew's monotone chain over the active vertices. Returns hull vertices counterclockwise starting
/// from the leftmost one, collinear points are dropped. Fewer than three points are returned as they are.
pub fn convex_hull(graph: &PlaneGraph, active: &FixedBitSet) -> Vec<usize> {
    let pos = |v: usize| graph[NodeIndex::new(v)].pos;

    let mut points: Vec<usize> = active.ones().collect();
    if points.len() < 3 {
        return points;
    }
    // by x, then y
    radsort::sort_by_key(&mut points, |&v| pos(v).y);
    radsort::sort_by_key(&mut points, |&v| pos(v).x);

    let mut hull = Vec::with_capacity(points.len() + 1);
    half_hull(&mut hull, points.iter().copied(), &pos);
    half_hull(&mut hull, points.iter().rev().copied(), &pos);
    hull
}

/// Appends one monotone chain to `hull`, without its last point, which starts the other chain.
fn half_hull(hull: &mut Vec<usize>, points: impl Iterator<Item = usize>, pos: &impl Fn(usize) -> Point) {
    let floor = hull.len();
    for v in points {
        while hull.len() >= floor + 2 {
            let (a, b) = (hull[hull.len() - 2], hull[hull.len() - 1]);
            if pos(a).cross2(&pos(b), &pos(v)) > 0.0 {
                break;
            }
            hull.pop();
        }
        hull.push(v);
    }
    hull.pop();
}

/// Picks the outer face of the active subgraph among `faces`, returning its index.
///
/// A face is a candidate when it contains every convex hull vertex. Several candidates are possible
/// when the remaining drawing is small or not convex, they are told apart first by having exactly the
/// hull's vertices, then by orientation.
pub fn find_outer_face(
    graph: &PlaneGraph,
    faces: &[Face],
    active: &FixedBitSet,
) -> Result<usize, OuterFaceAmbiguousError> {
    let hull = convex_hull(graph, active);

    let candidates: Vec<usize> = (0..faces.len())
        .filter(|&i| hull.iter().all(|&v| faces[i].contains(v)))
        .collect();
    if let [only] = candidates[..] {
        return Ok(only);
    }

    let unique = |pred: &dyn Fn(&Face) -> bool| -> Option<usize> {
        let mut matching = candidates.iter().copied().filter(|&i| pred(&faces[i]));
        match (matching.next(), matching.next()) {
            (Some(i), None) => Some(i),
            _ => None,
        }
    };

    unique(&|f: &Face| f.distinct_vertices().len() == hull.len())
        .or_else(|| unique(&|f: &Face| f.signed_area(graph) > 0.0))
        .ok_or(OuterFaceAmbiguousError {
            hull_size: hull.len(),
            candidates: candidates.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing_blocks::faces::enumerate_faces;
    use crate::drawing_blocks::rotation::RotationSystem;
    use crate::testing::grids::triangulated_grid;
    use crate::testing::triangulations::random_triangulation;
    use crate::types::Vertex;

    fn all_active(n: usize) -> FixedBitSet {
        let mut active = FixedBitSet::with_capacity(n);
        active.insert_range(..);
        active
    }

    #[test]
    fn test_hull_drops_collinear_points() {
        let g = triangulated_grid(3, 3);
        let mut hull = convex_hull(&g, &all_active(9));
        assert_eq!(hull, vec![0, 2, 8, 6]);
        hull.sort();
        assert_eq!(hull, vec![0, 2, 6, 8]);
    }

    #[test]
    fn test_hull_of_random_triangulation_is_outer_triangle() {
        let g = random_triangulation(40, 1);
        assert_eq!(convex_hull(&g, &all_active(40)), vec![0, 1, 2]);
    }

    #[test]
    fn test_hull_of_two_points() {
        let mut g = PlaneGraph::new_undirected();
        g.add_node(Vertex::new(0, 0.0, 0.0));
        g.add_node(Vertex::new(1, 1.0, 0.0));
        assert_eq!(convex_hull(&g, &all_active(2)), vec![0, 1]);
    }

    #[test]
    fn test_triangle_outer_face_by_orientation() {
        // both faces of a triangle contain the whole hull
        let mut g = PlaneGraph::new_undirected();
        for (i, (x, y)) in [(0.0, 0.0), (2.0, 0.0), (1.0, 1.0)].into_iter().enumerate() {
            g.add_node(Vertex::new(i as u32, x, y));
        }
        for (u, v) in [(0, 1), (1, 2), (2, 0)] {
            g.add_edge(NodeIndex::new(u), NodeIndex::new(v), ());
        }
        let rot = RotationSystem::new(&g);
        let active = all_active(3);
        let faces = enumerate_faces(&rot, &active).unwrap();
        let outer = find_outer_face(&g, &faces, &active).unwrap();
        assert!(faces[outer].signed_area(&g) > 0.0);
    }

    #[test]
    fn test_grid_outer_face_has_whole_boundary() {
        let g = triangulated_grid(4, 5);
        let rot = RotationSystem::new(&g);
        let active = all_active(20);
        let faces = enumerate_faces(&rot, &active).unwrap();
        let outer = &faces[find_outer_face(&g, &faces, &active).unwrap()];
        // 2 * (3 + 4) boundary vertices
        assert_eq!(outer.len(), 14);
        assert!(outer.signed_area(&g) > 0.0);
    }

    #[test]
    fn test_ambiguous_without_faces() {
        let g = random_triangulation(10, 0);
        let active = all_active(10);
        assert_eq!(
            find_outer_face(&g, &[], &active),
            Err(OuterFaceAmbiguousError {
                hull_size: 3,
                candidates: 0
            })
        );
    }
}
