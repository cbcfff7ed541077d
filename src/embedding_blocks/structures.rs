use hashbrown::HashSet;

/// Run of back edges on one side of a conflict pair, as `(low, high)` edge ids.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Interval {
    pub ends: Option<(usize, usize)>,
}

impl Interval {
    pub fn new(lo: usize, hi: usize) -> Self {
        Interval {
            ends: Some((lo, hi)),
        }
    }

    pub fn empty() -> Self {
        Interval { ends: None }
    }

    pub fn is_empty(&self) -> bool {
        self.ends.is_none()
    }

    /// Must not be called on an empty interval.
    pub fn lo(&self) -> usize {
        self.ends.map_or(usize::MAX, |(lo, _)| lo)
    }

    /// Must not be called on an empty interval.
    pub fn hi(&self) -> usize {
        self.ends.map_or(usize::MAX, |(_, hi)| hi)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConflictPair {
    pub left: Interval,
    pub right: Interval,
}

impl ConflictPair {
    pub fn empty() -> Self {
        ConflictPair {
            left: Interval::empty(),
            right: Interval::empty(),
        }
    }

    pub fn swap_sides(&mut self) {
        std::mem::swap(&mut self.left, &mut self.right);
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }

    /// Lowest return point over both sides. `None` for an empty pair.
    pub fn lowest(&self, g: &DfsGraph) -> Option<usize> {
        match (self.left.is_empty(), self.right.is_empty()) {
            (true, true) => None,
            (true, false) => Some(g.low1[self.right.lo()]),
            (false, true) => Some(g.low1[self.left.lo()]),
            (false, false) => Some(g.low1[self.left.lo()].min(g.low1[self.right.lo()])),
        }
    }
}

/// Simple graph in the shape the DFS phases of the LR test work on.
#[derive(Debug, Clone)]
pub struct DfsGraph {
    pub n: usize,
    pub m: usize,
    /// Edge ids incident to each vertex; after orientation only outgoing ones matter.
    pub adj: Vec<Vec<usize>>,
    /// `(source, target)`, oriented from the DFS parent side after the first pass.
    pub edges: Vec<(usize, usize)>,

    pub low1: Vec<usize>,
    pub low2: Vec<usize>,
    pub nesting_depth: Vec<isize>,

    pub parent_edge: Vec<Option<usize>>,
    pub height: Vec<usize>,
}

impl DfsGraph {
    /// Self-loops and repeated pairs are dropped, they never affect planarity.
    pub fn new(n: usize, edge_list: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut seen = HashSet::new();
        let mut adj = vec![Vec::new(); n];
        let mut edges = Vec::new();
        for (u, v) in edge_list {
            if u == v || !seen.insert((u.min(v), u.max(v))) {
                continue;
            }
            let eid = edges.len();
            adj[u].push(eid);
            adj[v].push(eid);
            edges.push((u, v));
        }

        let m = edges.len();
        DfsGraph {
            n,
            m,
            adj,
            edges,
            low1: vec![usize::MAX; m],
            low2: vec![usize::MAX; m],
            nesting_depth: vec![isize::MAX; m],
            parent_edge: vec![None; n],
            height: vec![usize::MAX; n],
        }
    }

    pub fn other_end(&self, eid: usize, u: usize) -> usize {
        let (s, t) = self.edges[eid];
        if s == u { t } else { s }
    }
}

/// Constraint stack and per-edge bookkeeping of the second DFS pass.
pub struct LrState {
    pub stack_bottom: Vec<Option<ConflictPair>>,
    pub lowpt_edge: Vec<usize>,
    pub ref_edge: Vec<usize>,
    pub stack: Vec<ConflictPair>,
}

impl LrState {
    pub fn new(m: usize) -> Self {
        LrState {
            stack_bottom: vec![None; m],
            lowpt_edge: vec![0; m],
            ref_edge: vec![usize::MAX; m],
            stack: Vec::new(),
        }
    }

    fn join_into(&mut self, p: &mut Interval, q: &Interval) {
        match (p.ends.as_mut(), q.ends) {
            (Some((p_lo, _)), Some((q_lo, q_hi))) => {
                self.ref_edge[*p_lo] = q_hi;
                *p_lo = q_lo;
            }
            (None, _) => p.ends = q.ends,
            (Some(_), None) => {}
        }
    }

    /// Folds the constraints of the subtree behind `eid` into the stack.
    /// Returns false when they cannot be satisfied, i.e. the graph is not planar.
    pub fn merge(&mut self, g: &DfsGraph, eid: usize) -> bool {
        let u = g.edges[eid].0;
        let Some(par_eid) = g.parent_edge[u] else {
            return true;
        };

        let mut p = ConflictPair::empty();
        // every return edge from this subtree has to go on one side together
        loop {
            let Some(mut q) = self.stack.pop() else {
                break;
            };
            if !q.left.is_empty() {
                q.swap_sides();
            }
            if !q.left.is_empty() {
                return false;
            }

            let lo = q.right.lo();
            if g.low1[lo] > g.low1[par_eid] {
                self.join_into(&mut p.right, &q.right);
            } else {
                self.ref_edge[lo] = self.lowpt_edge[par_eid];
            }

            if self.stack.last() == self.stack_bottom[eid].as_ref() {
                break;
            }
        }

        let conflicting = |interval: &Interval| -> bool {
            !interval.is_empty() && g.low1[interval.hi()] > g.low1[eid]
        };

        while let Some(top) = self.stack.last() {
            if !(conflicting(&top.left) || conflicting(&top.right)) {
                break;
            }
            let Some(mut q) = self.stack.pop() else {
                break;
            };
            if conflicting(&q.right) {
                q.swap_sides();
            }
            if conflicting(&q.right) {
                return false;
            }
            self.join_into(&mut p.right, &q.right);
            self.join_into(&mut p.left, &q.left);
        }

        if !p.is_empty() {
            self.stack.push(p);
        }
        true
    }

    fn trim_side(&mut self, side: &mut Interval, other: &Interval, u: usize, g: &DfsGraph) {
        if side.is_empty() {
            return;
        }
        while side.hi() != usize::MAX && g.edges[side.hi()].1 == u {
            side.ends = Some((side.lo(), self.ref_edge[side.hi()]));
        }
        if side.hi() == usize::MAX {
            if !other.is_empty() {
                self.ref_edge[side.lo()] = other.lo();
            }
            *side = Interval::empty();
        }
    }

    /// Drops the back edges ending at the source of `par_eid`, they constrain nothing above it.
    pub fn trim(&mut self, g: &DfsGraph, par_eid: usize) {
        let u = g.edges[par_eid].0;

        while let Some(top) = self.stack.last() {
            if top.lowest(g) != Some(g.height[u]) {
                break;
            }
            self.stack.pop();
        }

        if let Some(mut p) = self.stack.pop() {
            let right = p.right;
            self.trim_side(&mut p.left, &right, u, g);
            let left = p.left;
            self.trim_side(&mut p.right, &left, u, g);
            if !p.is_empty() {
                self.stack.push(p);
            }
        }
    }
}
