use fixedbitset::FixedBitSet;
use petgraph::visit::EdgeRef;

use crate::error::TraversalError;
use crate::types::PlaneGraph;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Ccw,
    Cw,
}

/// Incident edge as seen from one of its endpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spoke {
    pub edge: usize,
    pub to: usize,
    pub angle: f64,
}

/// Cyclic order of the edges around every vertex, taken from the vertex positions.
///
/// Built once for the whole graph. Queries on an induced subgraph pass the set of active vertices and skip
/// spokes leading outside of it, so no angle is computed twice.
#[derive(Clone, Debug)]
pub struct RotationSystem {
    /// Spokes of each vertex sorted counterclockwise by angle, starting from the west direction.
    pub spokes: Vec<Vec<Spoke>>,
    /// Endpoints of each edge, in petgraph's `(source, target)` order.
    pub endpoints: Vec<(usize, usize)>,
    /// Position of each edge in the spoke lists of its source and target.
    slots: Vec<(usize, usize)>,
}

impl RotationSystem {
    /// Assumes the graph is simple.
    pub fn new(graph: &PlaneGraph) -> Self {
        let n = graph.node_count();
        let m = graph.edge_count();

        let mut spokes = vec![Vec::new(); n];
        let mut endpoints = Vec::with_capacity(m);
        for e in graph.edge_references() {
            let (u, v) = (e.source().index(), e.target().index());
            let (pu, pv) = (graph[e.source()].pos, graph[e.target()].pos);
            endpoints.push((u, v));
            spokes[u].push(Spoke {
                edge: e.id().index(),
                to: v,
                angle: pu.angle_to(&pv),
            });
            spokes[v].push(Spoke {
                edge: e.id().index(),
                to: u,
                angle: pv.angle_to(&pu),
            });
        }

        // radix sort is stable, equal angles keep edge order
        for list in spokes.iter_mut() {
            radsort::sort_by_key(list, |s| s.angle);
        }

        let mut slots = vec![(usize::MAX, usize::MAX); m];
        for (u, list) in spokes.iter().enumerate() {
            for (i, s) in list.iter().enumerate() {
                if endpoints[s.edge].0 == u {
                    slots[s.edge].0 = i;
                } else {
                    slots[s.edge].1 = i;
                }
            }
        }

        RotationSystem {
            spokes,
            endpoints,
            slots,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.spokes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.endpoints.len()
    }

    pub fn other_end(&self, edge: usize, u: usize) -> usize {
        let (s, t) = self.endpoints[edge];
        if s == u { t } else { s }
    }

    /// Index of the dart leaving `from` along `edge`, in `0..2m`.
    pub fn dart(&self, edge: usize, from: usize) -> usize {
        if self.endpoints[edge].0 == from {
            2 * edge
        } else {
            2 * edge + 1
        }
    }

    fn slot(&self, edge: usize, pivot: usize) -> Option<usize> {
        let (s, t) = *self.endpoints.get(edge)?;
        if s == pivot {
            Some(self.slots[edge].0)
        } else if t == pivot {
            Some(self.slots[edge].1)
        } else {
            None
        }
    }

    /// Neighbours of `u` inside the active subgraph, counterclockwise.
    pub fn neighbors<'a>(&'a self, u: usize, active: &'a FixedBitSet) -> impl Iterator<Item = usize> + 'a {
        self.spokes[u]
            .iter()
            .filter(move |s| active[s.to])
            .map(|s| s.to)
    }

    pub fn degree(&self, u: usize, active: &FixedBitSet) -> usize {
        self.neighbors(u, active).count()
    }

    pub fn active_edge_count(&self, active: &FixedBitSet) -> usize {
        self.endpoints
            .iter()
            .filter(|&&(u, v)| active[u] && active[v])
            .count()
    }

    /// Rotates around `pivot` starting at `edge` and returns the first other active edge met.
    ///
    /// When `edge` is the only active edge at `pivot` it is returned itself, so walks turn back
    /// at pendant vertices.
    pub fn next_edge(
        &self,
        edge: usize,
        pivot: usize,
        direction: Direction,
        active: &FixedBitSet,
    ) -> Result<usize, TraversalError> {
        let start = self.slot(edge, pivot).ok_or(TraversalError::NotIncident {
            edge,
            vertex: pivot,
        })?;

        let list = &self.spokes[pivot];
        let len = list.len();
        for step in 1..=len {
            let i = match direction {
                Direction::Ccw => (start + step) % len,
                Direction::Cw => (start + len - step) % len,
            };
            if active[list[i].to] {
                return Ok(list[i].edge);
            }
        }

        Err(TraversalError::IsolatedVertex { vertex: pivot })
    }
}
