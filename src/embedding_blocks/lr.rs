use crate::embedding_blocks::structures::{ConflictPair, DfsGraph, Interval, LrState};

/// Second DFS pass, collects left/right constraints. Returns false on the first unsatisfiable one.
pub fn test_subtree(g: &DfsGraph, state: &mut LrState, u: usize) -> bool {
    for &eid in g.adj[u].iter() {
        let to = g.other_end(eid, u);

        state.stack_bottom[eid] = state.stack.last().cloned();

        if g.parent_edge[to] == Some(eid) {
            if !test_subtree(g, state, to) {
                return false;
            }
        } else {
            state.lowpt_edge[eid] = eid;
            state.stack.push(ConflictPair {
                left: Interval::empty(),
                right: Interval::new(eid, eid),
            });
        }

        if g.low1[eid] < g.height[u] {
            // eid has a return edge, so u has a parent edge
            if eid == g.adj[u][0] {
                if let Some(par_eid) = g.parent_edge[u] {
                    state.lowpt_edge[par_eid] = state.lowpt_edge[eid];
                }
            } else if !state.merge(g, eid) {
                return false;
            }
        }
    }

    if let Some(par_eid) = g.parent_edge[u] {
        state.trim(g, par_eid);
        let parent = g.other_end(par_eid, u);

        if g.low1[par_eid] < g.height[parent] {
            let Some(top) = state.stack.last() else {
                return true;
            };
            let highest = match (top.left.ends, top.right.ends) {
                (Some((_, hl)), Some((_, hr))) => {
                    if g.low1[hl] > g.low1[hr] {
                        hl
                    } else {
                        hr
                    }
                }
                (Some((_, hl)), None) => hl,
                (None, Some((_, hr))) => hr,
                (None, None) => return true,
            };
            state.ref_edge[par_eid] = highest;
        }
    }

    true
}
