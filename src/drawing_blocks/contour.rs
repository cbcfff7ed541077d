const NONE: usize = usize::MAX;

/// Boundary of the drawing built so far, from v1 on the left to v2 on the right.
///
/// Stored as `prev`/`next` arrays over vertex indices, so any vertex can be reached and reconnected in O(1).
/// Vertices not on the contour have both links set to `usize::MAX`.
#[derive(Debug, Clone)]
pub struct Contour {
    pub prev: Vec<usize>,
    pub next: Vec<usize>,
    pub head: usize,
    pub tail: usize,
    pub size: usize,
}

impl Contour {
    /// Contour `[left, middle, right]` of the first triangle, over `n` vertices in total.
    pub fn new(n: usize, left: usize, middle: usize, right: usize) -> Self {
        let mut contour = Self {
            prev: vec![NONE; n],
            next: vec![NONE; n],
            head: left,
            tail: right,
            size: 3,
        };
        contour.link(left, middle);
        contour.link(middle, right);
        contour
    }

    pub fn link(&mut self, u: usize, v: usize) {
        self.next[u] = v;
        self.prev[v] = u;
    }

    pub fn next_of(&self, u: usize) -> Option<usize> {
        Some(self.next[u]).filter(|&v| v != NONE)
    }

    pub fn contains(&self, u: usize) -> bool {
        u == self.head || self.prev[u] != NONE
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(Some(self.head), |&u| self.next_of(u))
    }

    /// Vertices strictly between `left` and `right`, left to right. `left` must precede `right`.
    pub fn between(&self, left: usize, right: usize) -> Vec<usize> {
        std::iter::successors(self.next_of(left), |&u| self.next_of(u))
            .take_while(|&u| u != right)
            .collect()
    }

    /// Replaces everything strictly between `left` and `right` by `v` and returns the removed run.
    pub fn splice(&mut self, left: usize, v: usize, right: usize) -> Vec<usize> {
        let removed = self.between(left, right);
        for &u in removed.iter() {
            self.prev[u] = NONE;
            self.next[u] = NONE;
        }
        self.link(left, v);
        self.link(v, right);
        self.size = self.size + 1 - removed.len();
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splice_replaces_run() {
        let mut c = Contour::new(6, 0, 2, 1);
        assert_eq!(c.iter().collect::<Vec<_>>(), vec![0, 2, 1]);

        assert!(c.splice(2, 3, 1).is_empty());
        assert_eq!(c.iter().collect::<Vec<_>>(), vec![0, 2, 3, 1]);

        assert_eq!(c.splice(0, 4, 1), vec![2, 3]);
        assert_eq!(c.iter().collect::<Vec<_>>(), vec![0, 4, 1]);
        assert_eq!(c.size, 3);
        assert!(!c.contains(2));
        assert!(c.contains(0));
        assert!(c.contains(4));
    }

    #[test]
    fn test_between() {
        let mut c = Contour::new(5, 0, 2, 1);
        c.splice(2, 3, 1);
        assert_eq!(c.between(0, 1), vec![2, 3]);
        assert_eq!(c.between(2, 3), Vec::<usize>::new());
    }
}
