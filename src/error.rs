use thiserror::Error;

/// Structural predicate checked by the validity checker, used to name the one that failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Check {
    Size,
    Simple,
    DistinctPositions,
    Connected,
    Planar,
    Triangulated,
    OuterCycle,
}

impl std::fmt::Display for Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Check::Size => write!(f, "size"),
            Check::Simple => write!(f, "simple"),
            Check::DistinctPositions => write!(f, "distinct positions"),
            Check::Connected => write!(f, "connected"),
            Check::Planar => write!(f, "planar"),
            Check::Triangulated => write!(f, "triangulated"),
            Check::OuterCycle => write!(f, "simple outer cycle"),
        }
    }
}

/// Input graph rejected before any ordering step runs.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("graph has {vertices} vertices, at least 3 are required")]
    TooSmall { vertices: usize },
    #[error("vertex {vertex} has a self-loop")]
    SelfLoop { vertex: usize },
    #[error("vertices {u} and {v} are joined by more than one edge")]
    ParallelEdge { u: usize, v: usize },
    #[error("vertices {u} and {v} share the same position")]
    CoincidentVertices { u: usize, v: usize },
    #[error("graph is not connected, it has {components} components")]
    Disconnected { components: usize },
    /// `witness` is a non-planar edge subset when it was requested, empty otherwise.
    #[error("graph is not planar")]
    NotPlanar { witness: Vec<(usize, usize)> },
    #[error("inner face {face:?} has {} edges, graph is not triangulated", .face.len())]
    NotTriangulated { face: Vec<usize> },
    #[error("outer face visits vertex {repeated} more than once")]
    OuterCycleNotSimple { repeated: usize },
}

impl InputError {
    /// The predicate this error reports as failed.
    pub fn check(&self) -> Check {
        match self {
            InputError::TooSmall { .. } => Check::Size,
            InputError::SelfLoop { .. } | InputError::ParallelEdge { .. } => Check::Simple,
            InputError::CoincidentVertices { .. } => Check::DistinctPositions,
            InputError::Disconnected { .. } => Check::Connected,
            InputError::NotPlanar { .. } => Check::Planar,
            InputError::NotTriangulated { .. } => Check::Triangulated,
            InputError::OuterCycleNotSimple { .. } => Check::OuterCycle,
        }
    }
}

/// A walk over the rotation system could not be completed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TraversalError {
    #[error("vertex {vertex} has no incident edge in the active subgraph")]
    IsolatedVertex { vertex: usize },
    #[error("edge {edge} is not incident to vertex {vertex}")]
    NotIncident { edge: usize, vertex: usize },
    #[error("face walk starting at dart {from}->{to} did not close within {limit} steps")]
    WalkDidNotClose { from: usize, to: usize, limit: usize },
    #[error("embedding has {found} faces, a planar one needs {expected}")]
    EulerMismatch { expected: usize, found: usize },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("no single face matches the convex hull of {hull_size} points ({candidates} candidates)")]
pub struct OuterFaceAmbiguousError {
    pub hull_size: usize,
    pub candidates: usize,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("no vertex can be eliminated, {remaining} vertices remain")]
pub struct OrderingStalledError {
    pub remaining: usize,
}

/// An order handed to the shift layout cannot be replayed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("order has {found} vertices, graph has {expected}")]
    WrongLength { expected: usize, found: usize },
    #[error("vertex {vertex} is missing or repeated in the order")]
    NotPermutation { vertex: usize },
    #[error("vertex {vertex} is not adjacent to both {v1} and {v2}")]
    BaseNotAdjacent { vertex: usize, v1: usize, v2: usize },
    #[error("placed neighbours of vertex {vertex} are not consecutive on the contour")]
    NonContiguousNeighbours { vertex: usize },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Traversal(#[from] TraversalError),
    #[error(transparent)]
    OuterFaceAmbiguous(#[from] OuterFaceAmbiguousError),
    #[error(transparent)]
    OrderingStalled(#[from] OrderingStalledError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}
