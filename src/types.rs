/// Position of a vertex in the input embedding. The y axis points up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn sub(&self, p: &Point) -> Point {
        Point::new(self.x - p.x, self.y - p.y)
    }

    pub fn cross(&self, p: &Point) -> f64 {
        self.x * p.y - self.y * p.x
    }

    /// Orientation of the turn `self -> p -> q`, positive for counterclockwise.
    pub fn cross2(&self, p: &Point, q: &Point) -> f64 {
        p.sub(self).cross(&q.sub(self))
    }

    /// Angle of the direction from `self` to `p`, in `(-pi, pi]`.
    pub fn angle_to(&self, p: &Point) -> f64 {
        let d = p.sub(self);
        d.y.atan2(d.x)
    }
}

/// Vertex of the input graph: the label given by the host and its position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub label: u32,
    pub pos: Point,
}

impl Vertex {
    pub fn new(label: u32, x: f64, y: f64) -> Self {
        Vertex {
            label,
            pos: Point::new(x, y),
        }
    }
}

impl std::fmt::Display for Vertex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@({}, {})", self.label, self.pos.x, self.pos.y)
    }
}

/// Integer grid coordinate produced by the shift method.
pub type GridPoint = (i64, i64);

/// Graph with a straight-line embedding, the input of the drawing pipeline.
pub type PlaneGraph = petgraph::graph::UnGraph<Vertex, ()>;

/// Purely combinatorial graph, node weights are labels.
pub type UnGraph = petgraph::graph::UnGraph<u32, ()>;
