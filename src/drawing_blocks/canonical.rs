use std::cmp::Ordering;
use std::collections::VecDeque;

use fixedbitset::FixedBitSet;
use petgraph::graph::NodeIndex;
use tracing::{debug, trace};

use crate::drawing_blocks::faces::{Face, enumerate_faces, walk_face};
use crate::drawing_blocks::outer_face::find_outer_face;
use crate::drawing_blocks::rotation::RotationSystem;
use crate::error::{Error, InputError, OrderingStalledError};
use crate::types::PlaneGraph;

/// One vertex removed from the active subgraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Elimination {
    pub vertex: usize,
    /// Active vertices left after the removal.
    pub remaining: usize,
    /// Outer face of the subgraph the vertex was removed from. For the final three removals, where
    /// no face is computed, the vertices that were still active.
    pub outer_face: Vec<usize>,
}

/// Compares by height: smaller y first, then smaller x, then smaller index.
fn by_height(graph: &PlaneGraph, a: usize, b: usize) -> Ordering {
    let (pa, pb) = (graph[NodeIndex::new(a)].pos, graph[NodeIndex::new(b)].pos);
    pa.y.total_cmp(&pb.y)
        .then(pa.x.total_cmp(&pb.x))
        .then(a.cmp(&b))
}

/// The lowest outer vertex and the lower of its two neighbours on the outer cycle.
fn base_pair(graph: &PlaneGraph, outer: &Face) -> Option<(usize, usize)> {
    let len = outer.vertices.len();
    let i = (0..len).min_by(|&i, &j| by_height(graph, outer.vertices[i], outer.vertices[j]))?;
    let before = outer.vertices[(i + len - 1) % len];
    let after = outer.vertices[(i + 1) % len];
    let v2 = std::cmp::min_by(before, after, |&a, &b| by_height(graph, a, b));
    Some((outer.vertices[i], v2))
}

/// Computes a canonical order by peeling vertices off the outer face, from the last one to v3.
///
/// The engine keeps only the set of active vertices, faces of the shrinking subgraph are found again
/// from the rotation system at every step. The graph and its rotation system are passed to each call
/// and must be the ones the engine was created with.
#[derive(Debug, Clone)]
pub struct CanonicalOrdering {
    n: usize,
    active: FixedBitSet,
    /// Vertices on the outer face of the whole graph.
    outer_cycle: FixedBitSet,
    remaining: usize,
    v1: usize,
    v2: usize,
    order: VecDeque<usize>,
}

impl CanonicalOrdering {
    pub fn new(graph: &PlaneGraph, rotation: &RotationSystem) -> Result<Self, Error> {
        let n = graph.node_count();
        if n < 3 {
            return Err(InputError::TooSmall { vertices: n }.into());
        }
        let mut active = FixedBitSet::with_capacity(n);
        active.insert_range(..);
        let faces = enumerate_faces(rotation, &active)?;
        let outer = find_outer_face(graph, &faces, &active)?;
        Self::with_outer_face(graph, &faces[outer])
    }

    /// Starts from an outer face found earlier, e.g. by the validity checks.
    pub fn with_outer_face(graph: &PlaneGraph, outer: &Face) -> Result<Self, Error> {
        let n = graph.node_count();
        if n < 3 {
            return Err(InputError::TooSmall { vertices: n }.into());
        }
        let (v1, v2) = base_pair(graph, outer).ok_or(OrderingStalledError { remaining: n })?;

        let mut active = FixedBitSet::with_capacity(n);
        active.insert_range(..);
        let mut outer_cycle = FixedBitSet::with_capacity(n);
        outer_cycle.extend(outer.vertices.iter().copied());

        debug!(v1, v2, outer_len = outer.len(), "base pair chosen");
        Ok(CanonicalOrdering {
            n,
            active,
            outer_cycle,
            remaining: n,
            v1,
            v2,
            order: VecDeque::with_capacity(n),
        })
    }

    pub fn base(&self) -> (usize, usize) {
        (self.v1, self.v2)
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn is_done(&self) -> bool {
        self.remaining == 0
    }

    /// Eliminated vertices in canonical order. Complete once [`is_done`](Self::is_done) holds.
    pub fn order(&self) -> Vec<usize> {
        self.order.iter().copied().collect()
    }

    pub fn into_order(self) -> Vec<usize> {
        self.order.into()
    }

    /// Eliminates one vertex. Returns `None` once all vertices are ordered.
    pub fn step(&mut self, graph: &PlaneGraph, rotation: &RotationSystem) -> Result<Option<Elimination>, Error> {
        let vertex = match self.remaining {
            0 => return Ok(None),
            1 => self.v1,
            2 => self.v2,
            3 => self
                .active
                .ones()
                .find(|&v| v != self.v1 && v != self.v2)
                .ok_or(OrderingStalledError { remaining: 3 })?,
            _ => return self.eliminate_legal(graph, rotation).map(Some),
        };

        let outer_face = self.active.ones().collect();
        Ok(Some(self.eliminate(vertex, outer_face)))
    }

    fn eliminate(&mut self, vertex: usize, outer_face: Vec<usize>) -> Elimination {
        self.active.set(vertex, false);
        self.remaining -= 1;
        self.order.push_front(vertex);
        debug!(vertex, remaining = self.remaining, "vertex eliminated");
        Elimination {
            vertex,
            remaining: self.remaining,
            outer_face,
        }
    }

    fn eliminate_legal(&mut self, graph: &PlaneGraph, rotation: &RotationSystem) -> Result<Elimination, Error> {
        let stalled = OrderingStalledError {
            remaining: self.remaining,
        };

        let faces = enumerate_faces(rotation, &self.active)?;
        let outer = &faces[find_outer_face(graph, &faces, &self.active)?];
        let base_dart = outer.dart_between(self.v1, self.v2).ok_or(stalled.clone())?;
        let chord_ends = self.chord_endpoints(rotation, outer);
        let full = self.remaining == self.n;

        let mut candidates: Vec<usize> = outer
            .distinct_vertices()
            .into_iter()
            .filter(|&v| v != self.v1 && v != self.v2)
            .collect();
        radsort::sort_by_key(&mut candidates, |&v| graph[NodeIndex::new(v)].pos.x);
        radsort::sort_by_key(&mut candidates, |&v| graph[NodeIndex::new(v)].pos.y);

        for c in candidates {
            if !(full || self.outer_cycle[c] || self.has_eliminated_neighbor(rotation, c)) {
                trace!(vertex = c, "rejected, no eliminated neighbour");
                continue;
            }
            if chord_ends[c] {
                trace!(vertex = c, "rejected, endpoint of a chord");
                continue;
            }
            if !self.neighbors_consecutive(rotation, c, base_dart)? {
                trace!(vertex = c, "rejected, neighbours not consecutive");
                continue;
            }
            return Ok(self.eliminate(c, outer.vertices.clone()));
        }

        Err(stalled.into())
    }

    fn has_eliminated_neighbor(&self, rotation: &RotationSystem, c: usize) -> bool {
        rotation.spokes[c].iter().any(|s| !self.active[s.to])
    }

    /// Endpoints of edges joining two outer face vertices without being on its boundary.
    fn chord_endpoints(&self, rotation: &RotationSystem, outer: &Face) -> FixedBitSet {
        let mut on_face = FixedBitSet::with_capacity(self.n);
        on_face.extend(outer.vertices.iter().copied());
        let mut boundary = FixedBitSet::with_capacity(rotation.edge_count());
        boundary.extend(outer.edges.iter().copied());

        let mut ends = FixedBitSet::with_capacity(self.n);
        for (e, &(u, v)) in rotation.endpoints.iter().enumerate() {
            if on_face[u] && on_face[v] && !boundary[e] {
                ends.insert(u);
                ends.insert(v);
            }
        }
        ends
    }

    /// Walks the outer boundary of the active subgraph without `c`, from the base edge around to
    /// its other end, and checks that the active neighbours of `c` are met as one run, each once.
    fn neighbors_consecutive(
        &self,
        rotation: &RotationSystem,
        c: usize,
        base_dart: (usize, usize, usize),
    ) -> Result<bool, Error> {
        let neighbors: Vec<usize> = rotation.neighbors(c, &self.active).collect();
        if neighbors.len() < 2 {
            return Ok(false);
        }

        let mut without = self.active.clone();
        without.set(c, false);
        let limit = 2 * rotation.active_edge_count(&without);
        let boundary = walk_face(rotation, &without, base_dart, limit)?;

        let mut is_neighbor = FixedBitSet::with_capacity(self.n);
        is_neighbor.extend(neighbors.iter().copied());

        let walk = boundary.vertices[1..].iter().chain(boundary.vertices[..1].iter());
        let hits: Vec<(usize, usize)> = walk
            .enumerate()
            .filter(|&(_, &v)| is_neighbor[v])
            .map(|(i, &v)| (i, v))
            .collect();

        let mut seen = FixedBitSet::with_capacity(self.n);
        seen.extend(hits.iter().map(|&(_, v)| v));
        let once = hits.len() == neighbors.len() && seen.count_ones(..) == neighbors.len();
        let run = match (hits.first(), hits.last()) {
            (Some(&(first, _)), Some(&(last, _))) => last - first + 1 == hits.len(),
            _ => false,
        };
        Ok(once && run)
    }
}

/// Canonical order of a triangulated plane graph, v1 first.
pub fn canonical_order(graph: &PlaneGraph, rotation: &RotationSystem) -> Result<Vec<usize>, Error> {
    let mut ordering = CanonicalOrdering::new(graph, rotation)?;
    while ordering.step(graph, rotation)?.is_some() {}
    Ok(ordering.into_order())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::from_str;
    use crate::testing::grids::triangulated_grid;
    use crate::testing::triangulations::{random_stacked_triangulation, random_triangulation};

    /// The outer boundary of the active subgraph as a path from v2 to v1, without the base edge.
    fn contour_of(
        graph: &PlaneGraph,
        rotation: &RotationSystem,
        active: &FixedBitSet,
        v1: usize,
        v2: usize,
    ) -> Vec<usize> {
        let faces = enumerate_faces(rotation, active).unwrap();
        let outer = &faces[find_outer_face(graph, &faces, active).unwrap()];
        let dart = outer.dart_between(v1, v2).unwrap();
        let walk = walk_face(rotation, active, dart, 2 * rotation.active_edge_count(active)).unwrap();
        walk.vertices[1..].iter().chain(walk.vertices[..1].iter()).copied().collect()
    }

    /// Checks the defining properties by replaying the order: v1 v2 is an edge, and every later vertex
    /// has at least two earlier neighbours, met as one run on the boundary of the graph before it.
    /// Vertices before the last need a later neighbour unless they lie on the outer cycle.
    fn assert_canonical(graph: &PlaneGraph, rotation: &RotationSystem, order: &[usize]) {
        let n = graph.node_count();
        assert_eq!(order.len(), n);
        let mut rank = vec![usize::MAX; n];
        for (k, &v) in order.iter().enumerate() {
            assert_eq!(rank[v], usize::MAX, "vertex {} repeated", v);
            rank[v] = k;
        }

        let mut all = FixedBitSet::with_capacity(n);
        all.insert_range(..);
        let faces = enumerate_faces(rotation, &all).unwrap();
        let outer_cycle = faces[find_outer_face(graph, &faces, &all).unwrap()].distinct_vertices();

        let (v1, v2) = (order[0], order[1]);
        assert!(graph.contains_edge(NodeIndex::new(v1), NodeIndex::new(v2)));

        let mut active = FixedBitSet::with_capacity(n);
        active.extend([v1, v2]);
        for k in 2..n {
            let v = order[k];
            let mut earlier = FixedBitSet::with_capacity(n);
            let mut later = 0;
            for w in graph.neighbors(NodeIndex::new(v)).map(|w| w.index()) {
                if rank[w] < k {
                    earlier.insert(w);
                } else {
                    later += 1;
                }
            }
            let earlier_count = earlier.count_ones(..);
            assert!(earlier_count >= 2, "vertex {} at {} has {} earlier neighbours", v, k, earlier_count);
            if k + 1 < n && outer_cycle.binary_search(&v).is_err() {
                assert!(later >= 1, "inner vertex {} at {} has no later neighbour", v, k);
            }

            if k >= 3 {
                let hits: Vec<usize> = contour_of(graph, rotation, &active, v1, v2)
                    .iter()
                    .enumerate()
                    .filter(|&(_, &w)| earlier[w])
                    .map(|(i, _)| i)
                    .collect();
                assert_eq!(hits.len(), earlier_count, "earlier neighbours of {} not each once on the contour", v);
                let span = hits[hits.len() - 1] - hits[0] + 1;
                assert_eq!(span, hits.len(), "earlier neighbours of {} not consecutive", v);
            }
            active.insert(v);
        }
    }

    #[test]
    fn test_triangle() {
        let g = from_str("0,0,0\n1,2,0\n2,1,1\n0,1\n1,2\n2,0").unwrap();
        let rot = RotationSystem::new(&g);
        assert_eq!(canonical_order(&g, &rot).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_k4_inner_vertex_comes_third() {
        let g = from_str("0,0,0\n1,4,0\n2,2,4\n3,2,1\n0,1\n1,2\n2,0\n0,3\n1,3\n2,3").unwrap();
        let rot = RotationSystem::new(&g);
        let mut ordering = CanonicalOrdering::new(&g, &rot).unwrap();
        assert_eq!(ordering.base(), (0, 1));

        let first = ordering.step(&g, &rot).unwrap().unwrap();
        assert_eq!(first.vertex, 2);
        assert_eq!(first.remaining, 3);
        assert_eq!(first.outer_face.len(), 3);

        while ordering.step(&g, &rot).unwrap().is_some() {}
        assert!(ordering.is_done());
        assert_eq!(ordering.into_order(), vec![0, 1, 3, 2]);
    }

    #[test]
    fn test_random_triangulations() {
        for seed in 0..15 {
            let g = random_triangulation(40, seed);
            let rot = RotationSystem::new(&g);
            let order = canonical_order(&g, &rot).unwrap();
            assert_eq!(&order[..2], &[0, 1]);
            assert_canonical(&g, &rot, &order);
        }
    }

    #[test]
    fn test_stacked_triangulations() {
        for seed in 0..15 {
            let g = random_stacked_triangulation(30, seed);
            let rot = RotationSystem::new(&g);
            let order = canonical_order(&g, &rot).unwrap();
            assert_eq!(*order.last().unwrap(), 2);
            assert_canonical(&g, &rot, &order);
        }
    }

    #[test]
    fn test_grid_with_long_outer_cycle() {
        let g = triangulated_grid(4, 4);
        let rot = RotationSystem::new(&g);
        let order = canonical_order(&g, &rot).unwrap();
        assert_canonical(&g, &rot, &order);
    }

    #[test]
    fn test_grid_corners_have_no_later_neighbour() {
        let g = triangulated_grid(4, 4);
        let rot = RotationSystem::new(&g);
        let order = canonical_order(&g, &rot).unwrap();
        let mut rank = vec![0; order.len()];
        for (k, &v) in order.iter().enumerate() {
            rank[v] = k;
        }
        // an outer vertex may be taken before any of its later neighbours exist
        let stranded = order[..order.len() - 1]
            .iter()
            .filter(|&&v| g.neighbors(NodeIndex::new(v)).all(|w| rank[w.index()] < rank[v]))
            .count();
        assert!(stranded > 0);
    }

    #[test]
    fn test_five_cycle_stalls() {
        // without any vertex the cycle becomes a path, whose two ends never meet as one run
        let g = from_str("0,0,0\n1,4,0\n2,5,3\n3,2,5\n4,-1,3\n0,1\n1,2\n2,3\n3,4\n4,0").unwrap();
        let rot = RotationSystem::new(&g);
        let mut active = FixedBitSet::with_capacity(5);
        active.insert_range(..);
        let faces = enumerate_faces(&rot, &active).unwrap();
        let outer = find_outer_face(&g, &faces, &active).unwrap();

        let mut ordering = CanonicalOrdering::with_outer_face(&g, &faces[outer]).unwrap();
        assert_eq!(ordering.base(), (0, 1));
        assert_eq!(
            ordering.step(&g, &rot),
            Err(Error::OrderingStalled(OrderingStalledError { remaining: 5 }))
        );
        assert_eq!(ordering.remaining(), 5);
        assert!(!ordering.is_done());
        assert!(ordering.order().is_empty());
    }

    #[test]
    fn test_step_records_cover_all_vertices() {
        let g = random_triangulation(12, 4);
        let rot = RotationSystem::new(&g);
        let mut ordering = CanonicalOrdering::new(&g, &rot).unwrap();
        let mut steps = Vec::new();
        while let Some(e) = ordering.step(&g, &rot).unwrap() {
            steps.push(e);
        }
        assert_eq!(steps.len(), 12);
        let remaining: Vec<usize> = steps.iter().map(|e| e.remaining).collect();
        assert_eq!(remaining, (0..12).rev().collect::<Vec<_>>());
        assert!(steps.iter().all(|e| e.outer_face.contains(&e.vertex)));
        assert_eq!(ordering.step(&g, &rot).unwrap(), None);
    }
}
