use std::mem;

use crate::embedding_blocks::structures::DfsGraph;

/// Lowpoint bookkeeping for `eid` once everything behind it is explored. `u` is its source.
fn close_edge(graph: &mut DfsGraph, eid: usize, u: usize) {
    graph.nesting_depth[eid] = 2 * graph.low1[eid] as isize;
    if graph.low2[eid] < graph.height[u] {
        // chordal
        graph.nesting_depth[eid] += 1;
    }

    let Some(up) = graph.parent_edge[u] else {
        return;
    };
    let (low1, low2) = (graph.low1[eid], graph.low2[eid]);
    if low1 < graph.low1[up] {
        graph.low2[up] = graph.low1[up].min(low2);
        graph.low1[up] = low1;
    } else if low1 == graph.low1[up] {
        graph.low2[up] = graph.low2[up].min(low2);
    } else {
        graph.low2[up] = graph.low2[up].min(low1);
    }
}

/// Orients the component of `root` for the planarity test: tree edges point away from the root,
/// back edges towards it. Fills heights, both lowpoints and the nesting depth used to order the
/// adjacency lists. `root` must already have height 0. Runs without recursion.
pub fn orient(graph: &mut DfsGraph, root: usize) {
    // (vertex, next slot in its adjacency list)
    let mut stack = vec![(root, 0)];

    while let Some(top) = stack.last_mut() {
        let (u, slot) = *top;
        let Some(&eid) = graph.adj[u].get(slot) else {
            stack.pop();
            if let (Some(tree_edge), Some(&(parent, _))) = (graph.parent_edge[u], stack.last()) {
                close_edge(graph, tree_edge, parent);
            }
            continue;
        };
        top.1 += 1;

        if graph.low1[eid] != usize::MAX {
            // oriented from the other end
            continue;
        }
        let to = graph.other_end(eid, u);
        if graph.edges[eid].0 == to {
            let edge = &mut graph.edges[eid];
            mem::swap(&mut edge.0, &mut edge.1);
        }
        graph.low1[eid] = graph.height[u];
        graph.low2[eid] = graph.height[u];

        if graph.height[to] == usize::MAX {
            graph.parent_edge[to] = Some(eid);
            graph.height[to] = graph.height[u] + 1;
            stack.push((to, 0));
        } else {
            graph.low1[eid] = graph.height[to];
            close_edge(graph, eid, u);
        }
    }
}
