use crate::embedding_blocks::structures::DfsGraph;

/// Rebuilds the outgoing adjacency lists ordered by nesting depth, bucket sorted.
pub fn sort_by_nesting_depth(graph: &mut DfsGraph) {
    if graph.n == 0 {
        return;
    }
    let max_phi = 2 * (graph.n - 1) + 1;
    let phi = |eid: usize| -> usize { (max_phi as isize + graph.nesting_depth[eid]) as usize };

    let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); 2 * max_phi + 1];
    for eid in 0..graph.m {
        buckets[phi(eid)].push(eid);
    }

    let mut outgoing = vec![Vec::new(); graph.n];
    for eid in buckets.into_iter().flatten() {
        let (s, _) = graph.edges[eid];
        outgoing[s].push(eid);
    }

    graph.adj = outgoing;
}
