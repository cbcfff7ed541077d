use petgraph::visit::EdgeRef;

use crate::types::{GridPoint, PlaneGraph};

fn ccw(a: GridPoint, b: GridPoint, c: GridPoint) -> i64 {
    (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0)
}

fn on_segment(a: GridPoint, b: GridPoint, c: GridPoint) -> bool {
    // bounding box only, collinearity is checked by the caller
    c.0 >= a.0.min(b.0) && c.0 <= a.0.max(b.0) && c.1 >= a.1.min(b.1) && c.1 <= a.1.max(b.1)
}

/// Returns true when closed segments `p1p2` and `p3p4` share a point.
pub fn segments_intersect(p1: GridPoint, p2: GridPoint, p3: GridPoint, p4: GridPoint) -> bool {
    let o1 = ccw(p1, p2, p3);
    let o2 = ccw(p1, p2, p4);
    let o3 = ccw(p3, p4, p1);
    let o4 = ccw(p3, p4, p2);

    if o1.signum() * o2.signum() < 0 && o3.signum() * o4.signum() < 0 {
        return true;
    }

    (o1 == 0 && on_segment(p1, p2, p3))
        || (o2 == 0 && on_segment(p1, p2, p4))
        || (o3 == 0 && on_segment(p3, p4, p1))
        || (o4 == 0 && on_segment(p3, p4, p2))
}

/// Describes the first defect of a straight-line drawing of `graph` at `coordinates`: coinciding vertices,
/// two disjoint edges sharing a point, or a vertex lying on an edge it does not belong to.
pub fn find_defect(graph: &PlaneGraph, coordinates: &[GridPoint]) -> Option<String> {
    let n = graph.node_count();
    for u in 0..n {
        for v in u + 1..n {
            if coordinates[u] == coordinates[v] {
                return Some(format!("vertices {} and {} both at {:?}", u, v, coordinates[u]));
            }
        }
    }

    let edges: Vec<(usize, usize)> = graph
        .edge_references()
        .map(|e| (e.source().index(), e.target().index()))
        .collect();

    for i in 0..edges.len() {
        for j in i + 1..edges.len() {
            let (u1, v1) = edges[i];
            let (u2, v2) = edges[j];
            if u1 == u2 || u1 == v2 || v1 == u2 || v1 == v2 {
                continue;
            }
            let (p1, p2) = (coordinates[u1], coordinates[v1]);
            let (p3, p4) = (coordinates[u2], coordinates[v2]);
            if segments_intersect(p1, p2, p3, p4) {
                return Some(format!(
                    "edges {:?} and {:?} cross at {:?} {:?} {:?} {:?}",
                    edges[i], edges[j], p1, p2, p3, p4
                ));
            }
        }
    }

    for w in 0..n {
        let pw = coordinates[w];
        for &(u, v) in &edges {
            if w == u || w == v {
                continue;
            }
            let (pu, pv) = (coordinates[u], coordinates[v]);
            if ccw(pu, pv, pw) == 0 && on_segment(pu, pv, pw) {
                return Some(format!("vertex {} at {:?} lies on edge {:?}", w, pw, (u, v)));
            }
        }
    }

    None
}
