use petgraph::graph::NodeIndex;
use tracing::debug;

use crate::config::Config;
use crate::drawing_blocks::canonical::{CanonicalOrdering, Elimination};
use crate::drawing_blocks::rotation::RotationSystem;
use crate::drawing_blocks::shift::{Placement, ShiftLayout};
use crate::error::Error;
use crate::types::{GridPoint, PlaneGraph};
use crate::validity::check_embedding;

/// One unit of work done by [`Session::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Eliminated(Elimination),
    Placed(Placement),
    Finished,
}

/// Final result of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drawing {
    /// Canonical order, v1 first.
    pub order: Vec<usize>,
    /// Grid point of every vertex, indexed by vertex.
    pub coordinates: Vec<GridPoint>,
    /// Vertices each vertex covered when it was placed.
    pub covering: Vec<Vec<usize>>,
    /// One record per layout step, in order. Empty unless moves are recorded.
    pub placements: Vec<Placement>,
}

impl Drawing {
    pub fn width(&self) -> i64 {
        self.coordinates.iter().map(|p| p.0).max().unwrap_or(0)
    }

    pub fn height(&self) -> i64 {
        self.coordinates.iter().map(|p| p.1).max().unwrap_or(0)
    }

    /// Coordinates keyed by the host's vertex labels.
    pub fn labeled(&self, graph: &PlaneGraph) -> Vec<(u32, GridPoint)> {
        self.coordinates
            .iter()
            .enumerate()
            .map(|(v, &p)| (graph[NodeIndex::new(v)].label, p))
            .collect()
    }
}

/// Drawing pipeline over a private copy of the input: validation, then the canonical ordering one
/// elimination at a time, then the shift layout one placement at a time.
///
/// The first error ends the session, every later call returns it again.
#[derive(Debug, Clone)]
pub struct Session {
    graph: PlaneGraph,
    rotation: RotationSystem,
    config: Config,
    ordering: CanonicalOrdering,
    layout: Option<ShiftLayout>,
    placements: Vec<Placement>,
    failed: Option<Error>,
}

impl Session {
    /// Validates the graph, nothing is ordered yet.
    pub fn new(graph: &PlaneGraph, config: Config) -> Result<Self, Error> {
        let graph = graph.clone();
        let embedding = check_embedding(&graph, &config)?;
        let ordering = CanonicalOrdering::with_outer_face(&graph, embedding.outer_face())?;
        Ok(Session {
            graph,
            rotation: embedding.rotation,
            config,
            ordering,
            layout: None,
            placements: Vec::new(),
            failed: None,
        })
    }

    pub fn graph(&self) -> &PlaneGraph {
        &self.graph
    }

    pub fn step(&mut self) -> Result<Step, Error> {
        if let Some(e) = &self.failed {
            return Err(e.clone());
        }
        let result = self.advance();
        if let Err(e) = &result {
            debug!(error = %e, "session failed");
            self.failed = Some(e.clone());
        }
        result
    }

    fn advance(&mut self) -> Result<Step, Error> {
        if !self.ordering.is_done() {
            if let Some(elimination) = self.ordering.step(&self.graph, &self.rotation)? {
                return Ok(Step::Eliminated(elimination));
            }
        }

        let layout = match self.layout {
            Some(ref mut layout) => layout,
            None => self.layout.insert(ShiftLayout::new(
                &self.graph,
                self.ordering.order(),
                self.config.record_moves,
            )?),
        };

        match layout.step(&self.graph)? {
            Some(placement) => {
                if self.config.record_moves {
                    self.placements.push(placement.clone());
                }
                Ok(Step::Placed(placement))
            }
            None => Ok(Step::Finished),
        }
    }

    /// Runs the remaining steps and returns the drawing.
    pub fn finish(mut self) -> Result<Drawing, Error> {
        while self.step()? != Step::Finished {}

        let order = self.ordering.into_order();
        let (coordinates, covering) = match self.layout {
            Some(layout) => layout.into_parts(),
            None => (Vec::new(), Vec::new()),
        };
        Ok(Drawing {
            order,
            coordinates,
            covering,
            placements: self.placements,
        })
    }
}

/// Validates and draws `graph` with the default configuration.
pub fn draw(graph: &PlaneGraph) -> Result<Drawing, Error> {
    Session::new(graph, Config::default())?.finish()
}
