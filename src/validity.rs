use fixedbitset::FixedBitSet;
use hashbrown::{HashMap, HashSet};
use petgraph::visit::EdgeRef;
use tracing::{debug, warn};

use crate::config::Config;
use crate::drawing_blocks::faces::{Face, enumerate_faces};
use crate::drawing_blocks::outer_face::find_outer_face;
use crate::drawing_blocks::rotation::RotationSystem;
use crate::embedding::kuratowski_witness;
use crate::error::{Error, InputError};
use crate::types::PlaneGraph;

/// Embedding data computed while validating, reused by the ordering.
#[derive(Debug, Clone)]
pub struct ValidEmbedding {
    pub rotation: RotationSystem,
    pub faces: Vec<Face>,
    /// Index into `faces`.
    pub outer: usize,
}

impl ValidEmbedding {
    pub fn outer_face(&self) -> &Face {
        &self.faces[self.outer]
    }
}

fn check_size(graph: &PlaneGraph) -> Result<(), InputError> {
    let vertices = graph.node_count();
    if vertices < 3 {
        return Err(InputError::TooSmall { vertices });
    }
    Ok(())
}

fn check_simple(graph: &PlaneGraph) -> Result<(), InputError> {
    let mut seen = HashSet::new();
    for e in graph.edge_references() {
        let (u, v) = (e.source().index(), e.target().index());
        if u == v {
            return Err(InputError::SelfLoop { vertex: u });
        }
        if !seen.insert((u.min(v), u.max(v))) {
            return Err(InputError::ParallelEdge {
                u: u.min(v),
                v: u.max(v),
            });
        }
    }
    Ok(())
}

fn check_positions(graph: &PlaneGraph) -> Result<(), InputError> {
    let mut seen = HashMap::new();
    for v in graph.node_indices() {
        let p = graph[v].pos;
        // adding zero folds -0.0 into 0.0
        let key = ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits());
        if let Some(&u) = seen.get(&key) {
            return Err(InputError::CoincidentVertices { u, v: v.index() });
        }
        seen.insert(key, v.index());
    }
    Ok(())
}

/// True when the graph is a single component.
pub fn is_connected(graph: &PlaneGraph) -> bool {
    petgraph::algo::connected_components(graph) == 1
}

/// Combinatorial planarity, positions are ignored.
pub fn is_planar(graph: &PlaneGraph) -> bool {
    crate::embedding::is_planar(graph)
}

/// Every face other than the outer one is a triangle. Expects a connected, planar straight-line drawing.
pub fn is_triangulated(graph: &PlaneGraph, rotation: &RotationSystem) -> Result<bool, Error> {
    let mut active = FixedBitSet::with_capacity(graph.node_count());
    active.insert_range(..);
    let faces = enumerate_faces(rotation, &active)?;
    let outer = find_outer_face(graph, &faces, &active)?;
    Ok(first_non_triangle(&faces, outer).is_none())
}

fn first_non_triangle(faces: &[Face], outer: usize) -> Option<&Face> {
    faces
        .iter()
        .enumerate()
        .find(|&(i, f)| i != outer && f.len() != 3)
        .map(|(_, f)| f)
}

/// Runs every structural check in order and returns the embedding data once they all pass.
///
/// Fails on the first broken one: size, simplicity, distinct positions, connectivity, planarity,
/// a consistent face structure, a detectable outer face, triangulated inner faces, then a simple
/// outer cycle.
pub fn check_embedding(graph: &PlaneGraph, config: &Config) -> Result<ValidEmbedding, Error> {
    run_checks(graph, config).inspect_err(|e| warn!(error = %e, "graph rejected"))
}

fn run_checks(graph: &PlaneGraph, config: &Config) -> Result<ValidEmbedding, Error> {
    check_size(graph)?;
    check_simple(graph)?;
    check_positions(graph)?;

    let components = petgraph::algo::connected_components(graph);
    if components != 1 {
        return Err(InputError::Disconnected { components }.into());
    }

    if !is_planar(graph) {
        let witness = if config.planarity_witness {
            kuratowski_witness(graph)
        } else {
            Vec::new()
        };
        return Err(InputError::NotPlanar { witness }.into());
    }

    let rotation = RotationSystem::new(graph);
    let mut active = FixedBitSet::with_capacity(graph.node_count());
    active.insert_range(..);
    let faces = enumerate_faces(&rotation, &active)?;
    let outer = find_outer_face(graph, &faces, &active)?;

    if let Some(face) = first_non_triangle(&faces, outer) {
        return Err(InputError::NotTriangulated {
            face: face.vertices.clone(),
        }
        .into());
    }
    if let Some(repeated) = faces[outer].repeated_vertex() {
        return Err(InputError::OuterCycleNotSimple { repeated }.into());
    }

    debug!(
        vertices = graph.node_count(),
        edges = graph.edge_count(),
        faces = faces.len(),
        outer_len = faces[outer].len(),
        "graph accepted"
    );
    Ok(ValidEmbedding {
        rotation,
        faces,
        outer,
    })
}

/// Checks that `graph` can be drawn by the shift method.
pub fn validate(graph: &PlaneGraph, config: &Config) -> Result<(), Error> {
    check_embedding(graph, config).map(|_| ())
}
