//! The sweep driver: pulls events off the event tree in order, maintains
//! the status tree, and discovers new intersections among newly-adjacent
//! active segments.

use geo_types::Coord;

use crate::error::SweepError;
use crate::event::{EventPayload, EventTree};
use crate::primitives::{point_eq, segment_intersect, Intersection};
use crate::role::Role;
use crate::segment::{Segment, SegmentId};
use crate::status::StatusTree;

/// The segments touching one processed event point, in the order the
/// driver resolved them.
#[derive(Debug, Clone)]
pub struct EventRecord {
    pub point: Coord<f64>,
    pub left: Vec<SegmentId>,
    pub right: Vec<SegmentId>,
    pub interior: Vec<SegmentId>,
}

/// Hook for observing a sweep as it runs, e.g. for tracing, collecting
/// statistics, or driving a debug visualization. All methods are no-ops by
/// default. `on_event` receives the status tree as it stands immediately
/// after the event's removals and insertions, alongside the event itself, so
/// a visualizer can draw the active segment stack at each step.
pub trait SweepObserver {
    fn on_event(&mut self, _status: &StatusTree, _record: &EventRecord) {}
    fn on_intersection_found(&mut self, _a: SegmentId, _b: SegmentId, _at: Coord<f64>) {}
}

/// An observer that does nothing, for callers with no interest in
/// mid-sweep hooks.
pub struct NullObserver;

impl SweepObserver for NullObserver {}

/// Run the sweep to completion, discarding intermediate hooks.
pub fn run(segments: &[Segment], events: EventTree, tol: f64) -> Result<Vec<EventRecord>, SweepError> {
    run_with_observer(segments, events, tol, &mut NullObserver)
}

/// Run the sweep to completion, calling back into `observer` as events and
/// intersections are discovered.
pub fn run_with_observer<O: SweepObserver>(
    segments: &[Segment],
    mut events: EventTree,
    tol: f64,
    observer: &mut O,
) -> Result<Vec<EventRecord>, SweepError> {
    let mut status = StatusTree::new(tol);
    let mut output = Vec::new();

    while let Some((point, payload)) = events.pop_min() {
        for id in payload.right.iter().chain(payload.interior.iter()) {
            status.remove(*id).ok_or(SweepError::StatusInvariant {
                detail: "removal targeted a segment absent from the status tree",
            })?;
        }

        for id in payload.left.iter().chain(payload.interior.iter()) {
            let seg = segments[*id];
            if !status.contains(seg.id) {
                status.insert(seg, point.x, point.y);
            }
        }

        discover_adjacent_intersections(&status, &mut events, tol, point, observer);

        let record = EventRecord {
            point,
            left: payload.left,
            right: payload.right,
            interior: payload.interior,
        };
        observer.on_event(&status, &record);
        output.push(record);
    }

    if !status.is_empty() {
        return Err(SweepError::StatusInvariant { detail: "status tree non-empty at termination" });
    }

    Ok(output)
}

/// Test every currently-adjacent pair in the status tree for an
/// intersection, scheduling a future event for any crossing strictly ahead
/// of the sweep.
///
/// This re-tests the whole adjacency list on every event rather than only
/// the pairs that just became adjacent; for the input sizes this crate
/// targets that's cheap enough, and it sidesteps having to track adjacency
/// deltas precisely under tolerance-based coalescing.
fn discover_adjacent_intersections<O: SweepObserver>(
    status: &StatusTree,
    events: &mut EventTree,
    tol: f64,
    current: Coord<f64>,
    observer: &mut O,
) {
    for (a, b) in status.adjacent_pairs() {
        match segment_intersect(a, b, tol) {
            Intersection::None => {}
            Intersection::Point(p) => {
                observer.on_intersection_found(a.id, b.id, p);
                schedule_future_touch(events, tol, current, a, p);
                schedule_future_touch(events, tol, current, b, p);
            }
            Intersection::Overlap(p1, p2) => {
                observer.on_intersection_found(a.id, b.id, p1);
                for p in [p1, p2] {
                    schedule_future_touch(events, tol, current, a, p);
                    schedule_future_touch(events, tol, current, b, p);
                }
            }
        }
    }
}

fn schedule_future_touch(events: &mut EventTree, tol: f64, current: Coord<f64>, seg: &Segment, point: Coord<f64>) {
    if point_eq(point, seg.left, tol) || point_eq(point, seg.right, tol) {
        return;
    }
    if !is_strictly_after(current, point, tol) {
        return;
    }
    events.insert(point, seg.id, Role::Interior);
}

/// Whether `point` is strictly after `current` in sweep order, with
/// `tol`-close points treated as simultaneous (and hence not "after").
fn is_strictly_after(current: Coord<f64>, point: Coord<f64>, tol: f64) -> bool {
    if point_eq(current, point, tol) {
        return false;
    }
    point.x > current.x || (point.x == current.x && point.y > current.y)
}
