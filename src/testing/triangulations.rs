use hashbrown::HashMap;
use petgraph::graph::NodeIndex;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::types::{PlaneGraph, Point, Vertex};

const CORNERS: [(f64, f64); 3] = [(0.0, 0.0), (1000.0, 0.0), (500.0, 1000.0)];

/// Returns true when `d` lies strictly inside the circumcircle of the counterclockwise triangle `a, b, c`.
fn in_circle(a: Point, b: Point, c: Point, d: Point) -> bool {
    let (adx, ady) = (a.x - d.x, a.y - d.y);
    let (bdx, bdy) = (b.x - d.x, b.y - d.y);
    let (cdx, cdy) = (c.x - d.x, c.y - d.y);
    let det = (adx * adx + ady * ady) * (bdx * cdy - cdx * bdy)
        - (bdx * bdx + bdy * bdy) * (adx * cdy - cdx * ady)
        + (cdx * cdx + cdy * cdy) * (adx * bdy - bdx * ady);
    det > 0.0
}

/// Inserts `n - 3` random points into a fixed outer triangle, splitting the triangle containing each one.
/// Triangles are kept counterclockwise.
fn stacked_triangles(n: usize, seed: usize) -> (Vec<Point>, Vec<[usize; 3]>) {
    assert!(n >= 3);
    let mut rng = StdRng::seed_from_u64(seed as u64);
    let mut points: Vec<Point> = CORNERS.iter().map(|&(x, y)| Point::new(x, y)).collect();
    let mut triangles = vec![[0, 1, 2]];

    while points.len() < n {
        let (mut a, mut b): (f64, f64) = (rng.random_range(0.02..0.98), rng.random_range(0.02..0.98));
        if a + b > 0.98 {
            a = 1.0 - a;
            b = 1.0 - b;
        }
        let (o, p, q) = (points[0], points[1], points[2]);
        let candidate = Point::new(
            o.x + a * (p.x - o.x) + b * (q.x - o.x),
            o.y + a * (p.y - o.y) + b * (q.y - o.y),
        );

        let Some(t) = triangles.iter().position(|&[i, j, k]| {
            points[i].cross2(&points[j], &candidate) > 1e-6
                && points[j].cross2(&points[k], &candidate) > 1e-6
                && points[k].cross2(&points[i], &candidate) > 1e-6
        }) else {
            continue;
        };

        let id = points.len();
        points.push(candidate);
        let [i, j, k] = triangles[t];
        triangles[t] = [i, j, id];
        triangles.push([j, k, id]);
        triangles.push([k, i, id]);
    }

    (points, triangles)
}

/// Flips illegal edges until the triangulation is Delaunay.
fn make_delaunay(points: &[Point], triangles: &mut [[usize; 3]]) {
    for _ in 0..100_000 {
        let mut by_edge: HashMap<(usize, usize), (usize, usize)> = HashMap::new();
        let mut flip = None;

        'search: for (t, tri) in triangles.iter().enumerate() {
            for s in 0..3 {
                let (u, v, w) = (tri[s], tri[(s + 1) % 3], tri[(s + 2) % 3]);
                // the twin triangle stores the edge the other way around
                if let Some(&(t2, x)) = by_edge.get(&(v, u)) {
                    if in_circle(points[u], points[v], points[w], points[x]) {
                        flip = Some((t, u, v, w, t2, x));
                        break 'search;
                    }
                }
                by_edge.insert((u, v), (t, w));
            }
        }

        let Some((t, u, v, w, t2, x)) = flip else {
            return;
        };
        // quad u, x, v, w is convex, replace diagonal uv by wx
        triangles[t] = [u, x, w];
        triangles[t2] = [x, v, w];
    }
}

fn to_plane_graph(points: &[Point], triangles: &[[usize; 3]]) -> PlaneGraph {
    let mut graph = PlaneGraph::new_undirected();
    for (i, p) in points.iter().enumerate() {
        graph.add_node(Vertex::new(i as u32, p.x, p.y));
    }
    for tri in triangles {
        for s in 0..3 {
            let (u, v) = (tri[s], tri[(s + 1) % 3]);
            // every inner edge is seen from both sides, the outer ones only once
            let outer = u < 3 && v < 3;
            if u < v || outer {
                graph.add_edge(NodeIndex::new(u), NodeIndex::new(v), ());
            }
        }
    }
    graph
}

/// Random maximal planar graph on `n` vertices, drawn with straight lines. The outer face is the fixed
/// triangle `(0, 0), (1000, 0), (500, 1000)`, inner vertices come from random insertions.
/// Stacked triangulations are full of separating triangles.
pub fn random_stacked_triangulation(n: usize, seed: usize) -> PlaneGraph {
    let (points, triangles) = stacked_triangles(n, seed);
    to_plane_graph(&points, &triangles)
}

/// Delaunay triangulation of `n - 3` random points inside the same outer triangle.
pub fn random_triangulation(n: usize, seed: usize) -> PlaneGraph {
    let (points, mut triangles) = stacked_triangles(n, seed);
    make_delaunay(&points, &mut triangles);
    to_plane_graph(&points, &triangles)
}
