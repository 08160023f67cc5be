//! The status tree: the set of segments currently crossed by the sweep
//! line, ordered top-to-bottom.
//!
//! Two active segments can only swap relative order at an intersection
//! between them, and the driver always removes and reinserts both sides of
//! an intersection when it processes one ([`crate::sweep`]). That means a
//! segment's position relative to its *current* neighbors, once inserted,
//! stays valid until it is itself removed — so unlike the event tree there
//! is no need to re-rank entries on every query. This crate keeps the
//! active set as a plain sorted `Vec` rather than a `BTreeSet`, since the
//! comparator needs the sweep's current `x` and `event_y` as context that a
//! context-free `Ord` impl can't carry.

use crate::primitives::order_at;
use crate::segment::{Segment, SegmentId};

/// The ordered set of segments the sweep line currently crosses.
///
/// Index `0` is the topmost (largest `y`) active segment.
pub struct StatusTree {
    active: Vec<Segment>,
    tol: f64,
}

impl StatusTree {
    pub fn new(tol: f64) -> Self {
        StatusTree { active: Vec::new(), tol }
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    fn position_of(&self, id: SegmentId) -> Option<usize> {
        self.active.iter().position(|s| s.id == id)
    }

    pub fn contains(&self, id: SegmentId) -> bool {
        self.position_of(id).is_some()
    }

    pub fn get(&self, id: SegmentId) -> Option<&Segment> {
        self.position_of(id).map(|i| &self.active[i])
    }

    /// Insert `seg`, ranking it against the current neighbors at sweep
    /// position `(x, event_y)`. Returns the index it landed at.
    pub fn insert(&mut self, seg: Segment, x: f64, event_y: f64) -> usize {
        let idx = self
            .active
            .iter()
            .position(|existing| order_at(existing, &seg, x, event_y, self.tol) == std::cmp::Ordering::Greater)
            .unwrap_or(self.active.len());
        self.active.insert(idx, seg);
        idx
    }

    /// Remove the segment with id `id`, returning it if present.
    pub fn remove(&mut self, id: SegmentId) -> Option<Segment> {
        self.position_of(id).map(|i| self.active.remove(i))
    }

    /// The segment immediately above `id` (smaller index), if any.
    pub fn above(&self, id: SegmentId) -> Option<&Segment> {
        let idx = self.position_of(id)?;
        if idx == 0 {
            None
        } else {
            self.active.get(idx - 1)
        }
    }

    /// The segment immediately below `id` (larger index), if any.
    pub fn below(&self, id: SegmentId) -> Option<&Segment> {
        let idx = self.position_of(id)?;
        self.active.get(idx + 1)
    }

    /// The two segments that would become neighbors of each other if `id`
    /// were removed right now: the current neighbor-of-neighbor pair.
    pub fn neighbors_of(&self, id: SegmentId) -> (Option<&Segment>, Option<&Segment>) {
        (self.above(id), self.below(id))
    }

    /// Every pair of currently-adjacent segments, for neighbor-intersection
    /// testing after a batch of insertions.
    pub fn adjacent_pairs(&self) -> impl Iterator<Item = (&Segment, &Segment)> {
        self.active.windows(2).map(|w| (&w[0], &w[1]))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.active.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::Coord;

    fn seg(id: usize, a: (f64, f64), b: (f64, f64)) -> Segment {
        Segment::from_endpoints(id, Coord { x: a.0, y: a.1 }, Coord { x: b.0, y: b.1 }).unwrap()
    }

    #[test]
    fn inserts_keep_descending_y_order() {
        let mut t = StatusTree::new(1e-6);
        t.insert(seg(0, (0., 1.), (10., 1.)), 0.0, 1.0);
        t.insert(seg(1, (0., 5.), (10., 5.)), 0.0, 5.0);
        t.insert(seg(2, (0., -2.), (10., -2.)), 0.0, -2.0);

        let ys: Vec<_> = t.iter().map(|s| s.left.y).collect();
        assert_eq!(ys, vec![5.0, 1.0, -2.0]);
    }

    #[test]
    fn neighbors_reflect_insertion_order() {
        let mut t = StatusTree::new(1e-6);
        t.insert(seg(0, (0., 1.), (10., 1.)), 0.0, 1.0);
        t.insert(seg(1, (0., 5.), (10., 5.)), 0.0, 5.0);
        t.insert(seg(2, (0., -2.), (10., -2.)), 0.0, -2.0);

        let (above, below) = t.neighbors_of(0);
        assert_eq!(above.unwrap().id, 1);
        assert_eq!(below.unwrap().id, 2);
    }

    #[test]
    fn remove_then_query_returns_none() {
        let mut t = StatusTree::new(1e-6);
        t.insert(seg(0, (0., 1.), (10., 1.)), 0.0, 1.0);
        assert!(t.remove(0).is_some());
        assert!(!t.contains(0));
        assert!(t.remove(0).is_none());
    }
}
