use petgraph::graph::NodeIndex;

use crate::types::{PlaneGraph, Vertex};

/// Grid of `rows x cols` unit squares' corners, every square split by its rising diagonal.
///
/// Vertex `r * cols + c` sits at `(c, r)`. Inner faces are triangles, the outer face is the whole
/// rectangle boundary, so its collinear sides make it larger than the convex hull.
pub fn triangulated_grid(rows: usize, cols: usize) -> PlaneGraph {
    assert!(rows > 1 && cols > 1);
    let mut graph = PlaneGraph::new_undirected();

    for r in 0..rows {
        for c in 0..cols {
            graph.add_node(Vertex::new((r * cols + c) as u32, c as f64, r as f64));
        }
    }

    let id = |r: usize, c: usize| NodeIndex::new(r * cols + c);
    for r in 0..rows {
        for c in 0..cols {
            if r + 1 < rows {
                graph.add_edge(id(r, c), id(r + 1, c), ());
            }
            if c + 1 < cols {
                graph.add_edge(id(r, c), id(r, c + 1), ());
            }
            if r + 1 < rows && c + 1 < cols {
                graph.add_edge(id(r, c), id(r + 1, c + 1), ());
            }
        }
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_sizes() {
        let g = triangulated_grid(3, 4);
        assert_eq!(g.node_count(), 12);
        // 3 * 3 horizontal, 2 * 4 vertical, 2 * 3 diagonals
        assert_eq!(g.edge_count(), 9 + 8 + 6);
        assert_eq!(g[NodeIndex::new(5)].pos.x, 1.0);
        assert_eq!(g[NodeIndex::new(5)].pos.y, 1.0);
    }
}
