use petgraph::visit::NodeIndexable;

use crate::types::UnGraph;

/// Walks through every simple graph on `n` labelled vertices, one edge subset per mask.
pub struct GraphEnumeratorState {
    pub n: usize,
    pub mask: usize,
    pub last_mask: usize,
}

impl GraphEnumeratorState {
    pub fn new(n: usize) -> Self {
        GraphEnumeratorState {
            n,
            mask: 0,
            last_mask: 1 << (n * n.saturating_sub(1) / 2),
        }
    }
}

impl Iterator for GraphEnumeratorState {
    type Item = UnGraph;

    fn next(&mut self) -> Option<Self::Item> {
        if self.mask == self.last_mask {
            return None;
        }

        let mut graph = UnGraph::new_undirected();
        for i in 0..self.n {
            graph.add_node(i as u32);
        }

        let mut bit = 0;
        for i in 0..self.n {
            for j in (i + 1)..self.n {
                if self.mask & (1 << bit) != 0 {
                    graph.add_edge(graph.from_index(i), graph.from_index(j), ());
                }
                bit += 1;
            }
        }

        self.mask += 1;
        Some(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_all_graphs_on_four_vertices() {
        let enumerator = GraphEnumeratorState::new(4);
        let graphs: Vec<_> = enumerator.collect();
        assert_eq!(graphs.len(), 64);
        assert_eq!(graphs.last().map(|g| g.edge_count()), Some(6));
    }
}
