//! Tolerance-aware planar line-segment intersection.
//!
//! This crate runs a Bentley-Ottmann-style sweep over a set of line
//! segments and reports every point where two or more of them meet,
//! including near-misses that fall within a caller-supplied tolerance
//! (`tol`) rather than only exact coincidences. Segment endpoints and
//! crossing points that land within `tol` of each other are coalesced
//! ("glommed") into a single event so that nearly-coincident input data
//! doesn't produce a cloud of spurious, numerically unstable events.
//!
//! The entry point is [`intersect`]. For visibility into the sweep as it
//! runs, use [`intersect_with_observer`] with a [`SweepObserver`]
//! implementation.
//!
//! ```
//! use geo_types::Coord;
//! use sweep_tol::intersect;
//!
//! let segments = vec![
//!     (Coord { x: 0.0, y: 0.0 }, Coord { x: 10.0, y: 10.0 }),
//!     (Coord { x: 0.0, y: 10.0 }, Coord { x: 10.0, y: 0.0 }),
//! ];
//! let (_, events) = intersect(&segments, 1e-6).unwrap();
//! assert!(events.iter().any(|e| !e.interior.is_empty()));
//! ```

#[macro_use]
extern crate log;

mod error;
mod event;
mod point;
mod preprocess;
mod primitives;
mod role;
mod segment;
mod status;
mod sweep;

pub use error::SweepError;
pub use event::{EventPayload, EventTree};
pub use point::SweepPoint;
pub use primitives::{on_segment, order_at, point_eq, segment_intersect, Intersection, Orientation};
pub use role::Role;
pub use segment::{Segment, SegmentId};
pub use status::StatusTree;
pub use sweep::{run, run_with_observer, EventRecord, NullObserver, SweepObserver};

use geo_types::Coord;

/// Run the sweep over `segments` at tolerance `tol`.
///
/// Returns the normalized segments (endpoints may have moved by up to
/// `tol` during preprocessing, and vertical nudging may have changed
/// `vertical`) alongside every event the sweep produced, in sweep order.
///
/// # Errors
///
/// Returns [`SweepError::InvalidInput`] for a non-finite coordinate or a
/// zero-length segment, and [`SweepError::VerticalCollision`] for two
/// distinct vertical segments that fall within `tol` in `x` with
/// overlapping `y`-extents (see [`preprocess`]).
pub fn intersect(
    segments: &[(Coord<f64>, Coord<f64>)],
    tol: f64,
) -> Result<(Vec<Segment>, Vec<EventRecord>), SweepError> {
    intersect_with_observer(segments, tol, &mut NullObserver)
}

/// As [`intersect`], but calling back into `observer` as the sweep runs.
pub fn intersect_with_observer<O: SweepObserver>(
    segments: &[(Coord<f64>, Coord<f64>)],
    tol: f64,
    observer: &mut O,
) -> Result<(Vec<Segment>, Vec<EventRecord>), SweepError> {
    debug!("starting sweep over {} segments at tol={tol}", segments.len());
    let (normalized, events) = preprocess::preprocess(segments, tol)?;
    let output = sweep::run_with_observer(&normalized, events, tol, observer)?;
    trace!("sweep produced {} events", output.len());
    Ok((normalized, output))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_to_end_crossing() {
        let segments = vec![
            (Coord { x: 0.0, y: 0.0 }, Coord { x: 10.0, y: 10.0 }),
            (Coord { x: 0.0, y: 10.0 }, Coord { x: 10.0, y: 0.0 }),
        ];
        let (_, events) = intersect(&segments, 1e-6).unwrap();
        assert!(events.iter().any(|e| e.interior.len() == 2));
    }

    #[test]
    fn rejects_degenerate_segment() {
        let segments = vec![(Coord { x: 0.0, y: 0.0 }, Coord { x: 0.0, y: 0.0 })];
        assert!(intersect(&segments, 1e-6).is_err());
    }
}
