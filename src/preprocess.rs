//! Input normalization: vertical nudging, endpoint snapping and
//! vertical-projection snapping, run once before the sweep proper starts.

use geo_types::Coord;

use crate::error::SweepError;
use crate::event::EventTree;
use crate::primitives::{on_segment, point_eq};
use crate::role::Role;
use crate::segment::Segment;

/// Build segments from raw endpoint pairs and load the initial event tree.
///
/// Runs, in order:
/// 1. per-segment validation (non-finite coordinates, zero-length spans);
/// 2. vertical nudging, snapping any segment whose angle from the vertical
///    axis is smaller than `atan(tol / length)` to exactly vertical, since
///    such a segment cannot be distinguished from a vertical one at this
///    tolerance and leaving it "almost vertical" only invites numerical
///    noise in [`Segment::y_at`];
/// 3. a vertical collision check among the (now-exact) vertical segments;
/// 4. event-tree loading: verticals first, so later endpoints snap onto
///    them rather than the other way around, then every other segment's
///    endpoints, each glommed through [`EventTree::insert`];
/// 5. vertical-projection snapping: any endpoint that lies in a vertical
///    segment's tolerance tube but missed the coordinate-proximity glom in
///    step 4 (because it differs in `x` by up to `tol` but was never close
///    enough in the lexicographic key to collide) is re-keyed onto that
///    vertical segment's `x`.
pub fn preprocess(
    raw: &[(Coord<f64>, Coord<f64>)],
    tol: f64,
) -> Result<(Vec<Segment>, EventTree), SweepError> {
    let mut segments = Vec::with_capacity(raw.len());
    for (id, &(a, b)) in raw.iter().enumerate() {
        if !a.x.is_finite() || !a.y.is_finite() || !b.x.is_finite() || !b.y.is_finite() {
            return Err(SweepError::InvalidInput { segment_index: id, reason: "non-finite coordinate" });
        }
        if point_eq(a, b, tol) {
            return Err(SweepError::InvalidInput {
                segment_index: id,
                reason: "zero-length segment (endpoints within tolerance)",
            });
        }
        segments.push(Segment::from_endpoints(id, a, b)?);
    }

    for seg in segments.iter_mut() {
        nudge_vertical(seg, tol);
    }

    check_vertical_collisions(&segments, tol)?;

    let mut events = EventTree::new(tol);

    for seg in segments.iter_mut() {
        if seg.vertical {
            seg.left = events.insert_with_priority(seg.left, seg.id, Role::Left, true);
            seg.right = events.insert_with_priority(seg.right, seg.id, Role::Right, true);
        }
    }

    for seg in segments.iter_mut() {
        if seg.vertical {
            continue;
        }
        seg.left = events.insert(seg.left, seg.id, Role::Left);
        seg.right = events.insert(seg.right, seg.id, Role::Right);
    }

    snap_to_verticals(&mut segments, &mut events, tol);

    Ok((segments, events))
}

/// Snap a segment exactly vertical if its angle from the vertical axis is
/// smaller than `atan(tol / length)`; equivalently, if its horizontal run
/// is no more than `tol`.
fn nudge_vertical(seg: &mut Segment, tol: f64) {
    if seg.vertical {
        return;
    }
    let len = seg.length();
    if len == 0.0 {
        return;
    }
    let dx = (seg.right.x - seg.left.x).abs();
    let angle = (dx / len).atan();
    let threshold = (tol / len).atan();
    if angle <= threshold {
        let x = seg.left.x;
        seg.right.x = x;
        seg.vertical = true;
        if seg.left.y > seg.right.y {
            std::mem::swap(&mut seg.left, &mut seg.right);
        }
    }
}

fn check_vertical_collisions(segments: &[Segment], tol: f64) -> Result<(), SweepError> {
    let verticals: Vec<&Segment> = segments.iter().filter(|s| s.vertical).collect();
    for i in 0..verticals.len() {
        for j in (i + 1)..verticals.len() {
            let a = verticals[i];
            let b = verticals[j];
            if (a.left.x - b.left.x).abs() <= tol {
                let y_overlap = a.left.y.max(b.left.y) <= a.right.y.min(b.right.y) + tol;
                if y_overlap {
                    return Err(SweepError::VerticalCollision { first: a.id, second: b.id });
                }
            }
        }
    }
    Ok(())
}

/// Re-key any non-vertical segment endpoint that falls within a vertical
/// segment's tube onto that vertical segment's `x`.
fn snap_to_verticals(segments: &mut [Segment], events: &mut EventTree, tol: f64) {
    let verticals: Vec<Segment> = segments.iter().filter(|s| s.vertical).copied().collect();
    if verticals.is_empty() {
        return;
    }

    for seg in segments.iter_mut() {
        if seg.vertical {
            continue;
        }
        for endpoint in [&mut seg.left, &mut seg.right] {
            for v in &verticals {
                if (endpoint.x - v.left.x).abs() <= tol && on_segment(*endpoint, v, tol) {
                    let snapped = Coord { x: v.left.x, y: endpoint.y };
                    if !point_eq(snapped, *endpoint, f64::EPSILON) {
                        let role = if *endpoint == seg.left { Role::Left } else { Role::Right };
                        let resolved = events.insert(snapped, seg.id, role);
                        *endpoint = resolved;
                    }
                    break;
                }
            }
        }
    }
}
