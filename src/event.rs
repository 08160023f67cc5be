//! The event tree: an ordered, tolerance-coalescing set of sweep events.

use std::collections::BTreeMap;

use geo_types::Coord;

use crate::point::SweepPoint;
use crate::primitives::point_eq;
use crate::role::Role;
use crate::segment::SegmentId;

/// The segments touching a single event point, partitioned by [`Role`].
///
/// Repeated `push`es of the same `(role, id)` pair (e.g. from the sweep
/// driver re-testing the same adjacent pair across several events and
/// scheduling the same future touch more than once) are idempotent: each
/// role vector holds a segment id at most once.
#[derive(Debug, Clone, Default)]
pub struct EventPayload {
    pub left: Vec<SegmentId>,
    pub right: Vec<SegmentId>,
    pub interior: Vec<SegmentId>,
    /// Set to the role a vertical segment's own endpoint was inserted under,
    /// once one has glommed to this key. Governs snap priority (see
    /// [`EventPayload::snap_rank`]): `Some(Role::Right)` is the vertical's
    /// top endpoint, `Some(Role::Left)` its bottom one, per the crate's
    /// left/right convention for vertical segments (smaller `y` is `left`).
    pub vertical_endpoint_role: Option<Role>,
}

impl EventPayload {
    fn push(&mut self, role: Role, id: SegmentId) {
        let vec = match role {
            Role::Left => &mut self.left,
            Role::Right => &mut self.right,
            Role::Interior => &mut self.interior,
        };
        if !vec.contains(&id) {
            vec.push(id);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty() && self.interior.is_empty()
    }

    /// Snap-target rank: a vertical segment's own endpoint outranks any
    /// other endpoint, which in turn outranks a key that only carries
    /// interior crossings; within the vertical-endpoint class, the top
    /// (`Role::Right`) endpoint outranks the bottom (`Role::Left`) one, per
    /// spec's "top endpoint preferred over bottom" sub-rule. Lexicographic
    /// smaller is higher rank throughout.
    fn snap_rank(&self) -> (u8, u8) {
        match self.vertical_endpoint_role {
            Some(Role::Right) => (1, 0),
            Some(Role::Left) => (1, 1),
            _ if !self.left.is_empty() || !self.right.is_empty() => (2, 0),
            _ => (3, 0),
        }
    }
}

/// An ordered set of events keyed by coalesced coordinate.
///
/// Insertion is tolerance-aware: a point within `tol` (Chebyshev distance)
/// of an existing key is folded into that key rather than creating a
/// distinct one. When several existing keys are within tolerance, the
/// highest-priority one wins as the snap target (vertical endpoint, top
/// before bottom, > other endpoint > interior-only), ties within a class
/// broken by lexicographic coordinate order, implementing the T-stem
/// priority from the crate's glomming model.
pub struct EventTree {
    map: BTreeMap<SweepPoint, EventPayload>,
    tol: f64,
}

impl EventTree {
    pub fn new(tol: f64) -> Self {
        EventTree { map: BTreeMap::new(), tol }
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Every existing key within tolerance of `point`.
    fn candidates_near(&self, point: Coord<f64>) -> impl Iterator<Item = (Coord<f64>, &EventPayload)> {
        let lower = SweepPoint(Coord { x: point.x - self.tol, y: f64::NEG_INFINITY });
        let upper = SweepPoint(Coord { x: point.x + self.tol, y: f64::INFINITY });
        self.map
            .range(lower..=upper)
            .filter(move |(k, _)| point_eq(k.0, point, self.tol))
            .map(|(k, v)| (k.0, v))
    }

    /// The highest-priority existing key within tolerance of `point`, if any.
    pub fn find_near(&self, point: Coord<f64>) -> Option<Coord<f64>> {
        self.candidates_near(point)
            .min_by(|(ka, pa), (kb, pb)| {
                pa.snap_rank()
                    .cmp(&pb.snap_rank())
                    .then_with(|| SweepPoint(*ka).cmp(&SweepPoint(*kb)))
            })
            .map(|(k, _)| k)
    }

    /// Insert `id` under `role` at `point`, glomming onto an existing event
    /// within tolerance if one exists. `vertical_endpoint` marks `point` as
    /// a vertical segment's own endpoint, raising this key's snap priority
    /// (with `role` recording whether it's the top or bottom one).
    ///
    /// Returns the coordinate the segment's endpoint should be rewritten
    /// to: either `point` itself, or the coordinate of the event it glommed
    /// onto.
    pub fn insert_with_priority(
        &mut self,
        point: Coord<f64>,
        id: SegmentId,
        role: Role,
        vertical_endpoint: bool,
    ) -> Coord<f64> {
        let key_coord = self.find_near(point).unwrap_or(point);
        let key = SweepPoint(key_coord);
        let entry = self.map.entry(key).or_default();
        entry.push(role, id);
        if vertical_endpoint {
            entry.vertical_endpoint_role = Some(role);
        }
        key_coord
    }

    /// As [`EventTree::insert_with_priority`], for a non-vertical-endpoint
    /// insertion (the common case: ordinary endpoints and interior
    /// crossings discovered mid-sweep).
    pub fn insert(&mut self, point: Coord<f64>, id: SegmentId, role: Role) -> Coord<f64> {
        self.insert_with_priority(point, id, role, false)
    }

    /// Remove and return the lexicographically smallest event.
    pub fn pop_min(&mut self) -> Option<(Coord<f64>, EventPayload)> {
        let key = *self.map.keys().next()?;
        self.map.remove(&key).map(|payload| (key.0, payload))
    }

    pub fn peek_min(&self) -> Option<Coord<f64>> {
        self.map.keys().next().map(|k| k.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord<f64>, &EventPayload)> {
        self.map.iter().map(|(k, v)| (k.0, v))
    }
}
