use petgraph::visit::EdgeRef;

use crate::embedding_blocks::{
    acceptable_adj::sort_by_nesting_depth,
    lr::test_subtree,
    orient::orient,
    structures::{DfsGraph, LrState},
};

/// Implements the LR planarity testing algorithm. Disconnected graphs are tested component by component.
///
/// Only the topology is looked at, vertex positions stored in the weights play no role.
///
/// Reference:
/// [The Left-Right Planarity Test](https://acm.math.spbu.ru/~sk1/download/papers/planar//brandes2010-planarity.pdf)
pub fn is_planar<N, E>(graph: &petgraph::graph::UnGraph<N, E>) -> bool {
    let edges = graph
        .edge_references()
        .map(|e| (e.source().index(), e.target().index()));
    is_planar_edges(graph.node_count(), edges)
}

pub(crate) fn is_planar_edges(n: usize, edges: impl IntoIterator<Item = (usize, usize)>) -> bool {
    let mut g = DfsGraph::new(n, edges);
    if n >= 3 && g.m > 3 * n - 6 {
        return false;
    }

    let mut roots = vec![];
    for u in 0..n {
        if g.height[u] == usize::MAX {
            roots.push(u);
            g.height[u] = 0;
            orient(&mut g, u);
        }
    }

    sort_by_nesting_depth(&mut g);

    let mut state = LrState::new(g.m);
    roots.iter().all(|&u| test_subtree(&g, &mut state, u))
}

/// Given a non-planar graph, extracts a deletion-minimal non-planar edge subset, a subdivision of K5 or K3,3.
/// Runs O(m) planarity tests, O(m²) time overall. Returns an empty list for planar graphs.
pub fn kuratowski_witness<N, E>(graph: &petgraph::graph::UnGraph<N, E>) -> Vec<(usize, usize)> {
    let n = graph.node_count();
    let mut pending: Vec<(usize, usize)> = graph
        .edge_references()
        .map(|e| (e.source().index(), e.target().index()))
        .collect();
    if is_planar_edges(n, pending.iter().copied()) {
        return Vec::new();
    }

    let mut kept = Vec::new();
    while let Some(edge) = pending.pop() {
        // the edge is needed iff the rest becomes planar without it
        if is_planar_edges(n, pending.iter().chain(kept.iter()).copied()) {
            kept.push(edge);
        }
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::graph_enumerator::GraphEnumeratorState;
    use crate::testing::triangulations::random_triangulation;
    use crate::types::UnGraph;

    fn complete_graph(n: usize) -> UnGraph {
        let mut g = UnGraph::new_undirected();
        let nodes: Vec<_> = (0..n).map(|i| g.add_node(i as u32)).collect();
        for i in 0..n {
            for j in i + 1..n {
                g.add_edge(nodes[i], nodes[j], ());
            }
        }
        g
    }

    fn complete_bipartite(a: usize, b: usize) -> UnGraph {
        let mut g = UnGraph::new_undirected();
        let nodes: Vec<_> = (0..a + b).map(|i| g.add_node(i as u32)).collect();
        for i in 0..a {
            for j in a..a + b {
                g.add_edge(nodes[i], nodes[j], ());
            }
        }
        g
    }

    #[test]
    fn test_small_complete_graphs() {
        assert!(is_planar(&complete_graph(1)));
        assert!(is_planar(&complete_graph(4)));
        assert!(!is_planar(&complete_graph(5)));
        assert!(!is_planar(&complete_graph(6)));
    }

    #[test]
    fn test_complete_bipartite() {
        assert!(is_planar(&complete_bipartite(2, 5)));
        assert!(!is_planar(&complete_bipartite(3, 3)));
    }

    #[test]
    fn test_k33_subdivision_is_not_planar() {
        let mut g = complete_bipartite(3, 3);
        // subdivide every edge once
        let edges: Vec<_> = g.edge_indices().collect();
        for e in edges {
            let (u, v) = g.edge_endpoints(e).unwrap();
            let w = g.add_node(100);
            g.add_edge(u, w, ());
            g.add_edge(w, v, ());
        }
        for e in g.edge_indices().rev().collect::<Vec<_>>() {
            let (u, v) = g.edge_endpoints(e).unwrap();
            if u.index() < 6 && v.index() < 6 {
                g.remove_edge(e);
            }
        }
        assert_eq!(g.edge_count(), 18);
        assert!(!is_planar(&g));
    }

    #[test]
    fn test_exhaustive_up_to_five_vertices() {
        // on at most five vertices the only non-planar graph is K5 itself
        for n in 1..=5 {
            let enumerator = GraphEnumeratorState {
                n,
                mask: 0,
                last_mask: 1 << (n * (n - 1) / 2),
            };
            for g in enumerator {
                assert_eq!(is_planar(&g), g.edge_count() != 10, "n={} m={}", n, g.edge_count());
            }
        }
    }

    #[test]
    fn test_random_triangulations_are_planar() {
        for seed in 0..20 {
            let g = random_triangulation(30, seed);
            assert_eq!(g.edge_count(), 3 * 30 - 6);
            assert!(is_planar(&g));
        }
    }

    #[test]
    fn test_witness_of_k5() {
        let g = complete_graph(5);
        let witness = kuratowski_witness(&g);
        assert_eq!(witness.len(), 10);
    }

    #[test]
    fn test_witness_is_minimal() {
        let mut g = complete_bipartite(3, 3);
        // extra planar-irrelevant edges
        let a = g.add_node(6);
        let b = g.add_node(7);
        g.add_edge(a, b, ());
        g.add_edge(petgraph::graph::NodeIndex::new(0), a, ());
        let witness = kuratowski_witness(&g);
        assert_eq!(witness.len(), 9);
        assert!(!is_planar_edges(8, witness.iter().copied()));
        for skip in 0..witness.len() {
            let rest = witness
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != skip)
                .map(|(_, &e)| e);
            assert!(is_planar_edges(8, rest));
        }
    }

    #[test]
    fn test_witness_of_planar_graph_is_empty() {
        assert!(kuratowski_witness(&complete_graph(4)).is_empty());
    }
}
