use fixedbitset::FixedBitSet;
use petgraph::graph::NodeIndex;

use crate::drawing_blocks::rotation::{Direction, RotationSystem};
use crate::error::TraversalError;
use crate::types::PlaneGraph;

/// Boundary walk of one face of the active subgraph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Face {
    /// `vertices[i]` is the tail of the dart along `edges[i]`. A vertex appears once per visit, so
    /// cut vertices and pendant vertices show up more than once.
    pub vertices: Vec<usize>,
    pub edges: Vec<usize>,
}

impl Face {
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn contains(&self, v: usize) -> bool {
        self.vertices.contains(&v)
    }

    /// Vertices of the face without repetition, in ascending order.
    pub fn distinct_vertices(&self) -> Vec<usize> {
        let mut vs = self.vertices.clone();
        vs.sort_unstable();
        vs.dedup();
        vs
    }

    /// First vertex visited twice by the walk, if any.
    pub fn repeated_vertex(&self) -> Option<usize> {
        let mut vs = self.vertices.clone();
        vs.sort_unstable();
        vs.windows(2).find(|w| w[0] == w[1]).map(|w| w[0])
    }

    /// Shoelace area of the walk. Positive for the outer face, negative for bounded ones.
    pub fn signed_area(&self, graph: &PlaneGraph) -> f64 {
        let len = self.vertices.len();
        let mut twice = 0.0;
        for i in 0..len {
            let p = graph[NodeIndex::new(self.vertices[i])].pos;
            let q = graph[NodeIndex::new(self.vertices[(i + 1) % len])].pos;
            twice += p.cross(&q);
        }
        twice / 2.0
    }

    /// The dart of this face running between `u` and `v` in either direction, as `(from, to, edge)`.
    pub fn dart_between(&self, u: usize, v: usize) -> Option<(usize, usize, usize)> {
        let len = self.vertices.len();
        (0..len).find_map(|i| {
            let (a, b) = (self.vertices[i], self.vertices[(i + 1) % len]);
            if (a, b) == (u, v) || (a, b) == (v, u) {
                Some((a, b, self.edges[i]))
            } else {
                None
            }
        })
    }
}

/// Walks the face to the right of the dart `from -> to` along `edge`: at every head vertex the walk
/// continues with the next active edge counterclockwise from the one it arrived on.
///
/// Fails with [`TraversalError::WalkDidNotClose`] after `limit` darts.
pub fn walk_face(
    rotation: &RotationSystem,
    active: &FixedBitSet,
    (from, to, edge): (usize, usize, usize),
    limit: usize,
) -> Result<Face, TraversalError> {
    let mut face = Face::default();
    let (mut u, mut v, mut e) = (from, to, edge);

    loop {
        if face.edges.len() == limit {
            return Err(TraversalError::WalkDidNotClose { from, to, limit });
        }
        face.vertices.push(u);
        face.edges.push(e);

        let next = rotation.next_edge(e, v, Direction::Ccw, active)?;
        let w = rotation.other_end(next, v);
        (u, v, e) = (v, w, next);

        if u == from && e == edge {
            break;
        }
    }

    Ok(face)
}

/// All faces of the subgraph induced by `active`. Every dart lies on exactly one face.
///
/// The subgraph is expected to be connected, the face count is checked against Euler's formula.
pub fn enumerate_faces(rotation: &RotationSystem, active: &FixedBitSet) -> Result<Vec<Face>, TraversalError> {
    let n = active.count_ones(..);
    let m = rotation.active_edge_count(active);
    if m == 0 {
        return Ok(Vec::new());
    }

    let mut used = FixedBitSet::with_capacity(2 * rotation.edge_count());
    let mut faces = Vec::new();

    for u in active.ones() {
        for spoke in rotation.spokes[u].iter() {
            if !active[spoke.to] || used[rotation.dart(spoke.edge, u)] {
                continue;
            }

            let face = walk_face(rotation, active, (u, spoke.to, spoke.edge), 2 * m)?;
            for (&e, &from) in face.edges.iter().zip(face.vertices.iter()) {
                used.insert(rotation.dart(e, from));
            }
            faces.push(face);
        }
    }

    let expected = (m + 2).saturating_sub(n);
    if faces.len() != expected {
        return Err(TraversalError::EulerMismatch {
            expected,
            found: faces.len(),
        });
    }

    Ok(faces)
}
