use dot::{Edges, GraphWalk, Labeller, Nodes};
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use std::io::Write;

use crate::drawing::Drawing;
use crate::types::PlaneGraph;

type Node = usize;

#[derive(Debug, Clone)]
struct Edge {
    source: Node,
    target: Node,
    /// `source` covers `target` in the shift layout.
    covering: bool,
}

struct Graph<'a> {
    graph: &'a PlaneGraph,
    drawing: &'a Drawing,
    rank: Vec<usize>,
    edges: Vec<Edge>,
}

impl<'a> Labeller<'a, Node, Edge> for Graph<'a> {
    fn graph_id(&self) -> dot::Id<'_> {
        dot::Id::new("Layout").expect("identifier is alphanumeric")
    }

    fn node_id(&self, n: &Node) -> dot::Id<'_> {
        dot::Id::new(format!("N{}", n)).expect("identifier is alphanumeric")
    }

    fn node_label(&self, n: &Node) -> dot::LabelText<'a> {
        let (x, y) = self.drawing.coordinates[*n];
        dot::LabelText::label(format!(
            "{}\nv{}\n({}, {})",
            self.graph[NodeIndex::new(*n)].label,
            self.rank[*n] + 1,
            x,
            y
        ))
    }

    fn edge_style(&self, e: &Edge) -> dot::Style {
        if e.covering {
            dot::Style::Dashed
        } else {
            dot::Style::None
        }
    }

    fn kind(&self) -> dot::Kind {
        dot::Kind::Graph
    }
}

impl<'a> GraphWalk<'a, Node, Edge> for Graph<'a> {
    fn nodes(&self) -> Nodes<'_, Node> {
        (0..self.graph.node_count()).collect()
    }

    fn edges(&self) -> Edges<'_, Edge> {
        self.edges.as_slice().into()
    }

    fn source(&self, e: &Edge) -> Node {
        e.source
    }

    fn target(&self, e: &Edge) -> Node {
        e.target
    }
}

/// Writes `drawing` of `graph` as a Graphviz graph. Node labels show the host label, the position in the
/// canonical order and the grid point; covering relations are added as dashed edges.
pub fn write_dot<W: Write>(graph: &PlaneGraph, drawing: &Drawing, out: &mut W) -> std::io::Result<()> {
    let mut rank = vec![0; graph.node_count()];
    for (k, &v) in drawing.order.iter().enumerate() {
        rank[v] = k;
    }

    let mut edges: Vec<Edge> = graph
        .edge_references()
        .map(|e| Edge {
            source: e.source().index(),
            target: e.target().index(),
            covering: false,
        })
        .collect();
    for (v, covered) in drawing.covering.iter().enumerate() {
        edges.extend(covered.iter().map(|&w| Edge {
            source: v,
            target: w,
            covering: true,
        }));
    }

    let dot_graph = Graph {
        graph,
        drawing,
        rank,
        edges,
    };
    dot::render(&dot_graph, out)
}

/// [`write_dot`] into a string.
pub fn layout_to_dot(graph: &PlaneGraph, drawing: &Drawing) -> std::io::Result<String> {
    let mut buffer = Vec::new();
    write_dot(graph, drawing, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::draw;
    use crate::input::from_str;

    #[test]
    fn test_k4_dot() {
        let g = from_str("0,0,0\n1,4,0\n2,2,4\n3,2,1\n0,1\n1,2\n2,0\n0,3\n1,3\n2,3").unwrap();
        let drawing = draw(&g).unwrap();
        let dot = layout_to_dot(&g, &drawing).unwrap();
        assert!(dot.starts_with("graph Layout"));
        assert!(dot.contains("(2, 2)"));
        // six graph edges and one covering edge
        assert_eq!(dot.matches("--").count(), 7);
        assert_eq!(dot.matches("dashed").count(), 1);
    }
}
