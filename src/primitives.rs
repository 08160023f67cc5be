//! Tolerance-aware geometric predicates.
//!
//! Every structural decision made by the event tree, the status tree and
//! the sweep driver ultimately reduces to one of the functions in this
//! module, so they are the single source of numerical truth for the whole
//! crate.

use geo_types::Coord;

use crate::segment::Segment;

/// Orientation of three points, via a robust determinant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
    Collinear,
}

fn orient(p: Coord<f64>, q: Coord<f64>, r: Coord<f64>) -> Orientation {
    let det = robust::orient2d(
        robust::Coord { x: p.x, y: p.y },
        robust::Coord { x: q.x, y: q.y },
        robust::Coord { x: r.x, y: r.y },
    );
    if det > 0.0 {
        Orientation::CounterClockwise
    } else if det < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// `true` iff `p` and `q` lie within a Chebyshev ball of radius `tol`.
///
/// This is the proximal-box test used throughout the crate: a square, not a
/// circle, since it composes cheaply with the axis-aligned range searches
/// the event tree relies on.
pub fn point_eq(p: Coord<f64>, q: Coord<f64>, tol: f64) -> bool {
    (p.x - q.x).abs().max((p.y - q.y).abs()) <= tol
}

/// `true` iff `p` lies within `s`'s tolerance tube: within `tol` of the
/// infinite line through `s`, and within the axis-aligned extent of `s`
/// extended by `tol` on each end ("squared ends").
pub fn on_segment(p: Coord<f64>, s: &Segment, tol: f64) -> bool {
    let a = s.left;
    let b = s.right;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len2 = dx * dx + dy * dy;

    if len2 == 0.0 {
        return point_eq(p, a, tol);
    }

    let cross = (p.x - a.x) * dy - (p.y - a.y) * dx;
    let perp_dist = cross.abs() / len2.sqrt();
    if perp_dist > tol {
        return false;
    }

    let len = len2.sqrt();
    let t = ((p.x - a.x) * dx + (p.y - a.y) * dy) / len2;
    let ext = tol / len;
    t >= -ext && t <= 1.0 + ext
}

/// Result of intersecting two segments under tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intersection {
    None,
    Point(Coord<f64>),
    Overlap(Coord<f64>, Coord<f64>),
}

fn bbox_overlap(a: &Segment, b: &Segment, tol: f64) -> bool {
    let (a_lo_x, a_hi_x) = (a.left.x.min(a.right.x), a.left.x.max(a.right.x));
    let (a_lo_y, a_hi_y) = (a.left.y.min(a.right.y), a.left.y.max(a.right.y));
    let (b_lo_x, b_hi_x) = (b.left.x.min(b.right.x), b.left.x.max(b.right.x));
    let (b_lo_y, b_hi_y) = (b.left.y.min(b.right.y), b.left.y.max(b.right.y));
    a_lo_x - tol <= b_hi_x && b_lo_x - tol <= a_hi_x && a_lo_y - tol <= b_hi_y && b_lo_y - tol <= a_hi_y
}

/// Exact line/line crossing point, via homogeneous coordinates.
///
/// Returns `None` for parallel (or ill-conditioned near-parallel) lines.
fn raw_line_intersection(a: &Segment, b: &Segment) -> Option<Coord<f64>> {
    let (p1, p2) = (a.left, a.right);
    let (q1, q2) = (b.left, b.right);

    let px = p1.y - p2.y;
    let py = p2.x - p1.x;
    let pw = p1.x * p2.y - p2.x * p1.y;

    let qx = q1.y - q2.y;
    let qy = q2.x - q1.x;
    let qw = q1.x * q2.y - q2.x * q1.y;

    let xw = py * qw - qy * pw;
    let yw = qx * pw - px * qw;
    let w = px * qy - qx * py;

    if w == 0.0 {
        return None;
    }
    let x = xw / w;
    let y = yw / w;
    if x.is_finite() && y.is_finite() {
        Some(Coord { x, y })
    } else {
        None
    }
}

/// Snap an intersection point onto either segment's endpoint if it falls
/// within that endpoint's tolerance ball; otherwise return it unchanged.
///
/// Preferring the exact endpoint coordinate over the (possibly
/// ill-conditioned) computed value keeps glomming coordinate-identity
/// consistent downstream.
fn snap_to_tube(p: Coord<f64>, a: &Segment, b: &Segment, tol: f64) -> Coord<f64> {
    for cand in [a.left, a.right, b.left, b.right] {
        if point_eq(p, cand, tol) {
            return cand;
        }
    }
    p
}

/// Perpendicular distance from `p` to the infinite line through `a`-`b`,
/// or `0.0` if `a == b`.
fn perp_distance(p: Coord<f64>, a: Coord<f64>, b: Coord<f64>) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return ((p.x - a.x).powi(2) + (p.y - a.y).powi(2)).sqrt();
    }
    let cross = (p.x - a.x) * dy - (p.y - a.y) * dx;
    cross.abs() / len2.sqrt()
}

/// `true` iff `a` and `b` are collinear or near-parallel-and-overlapping
/// within tolerance: both of `b`'s endpoints lie within `tol` of `a`'s
/// infinite line (or vice versa).
fn tube_collinear(a: &Segment, b: &Segment, tol: f64) -> bool {
    let a_sees_b = perp_distance(b.left, a.left, a.right) <= tol
        && perp_distance(b.right, a.left, a.right) <= tol;
    let b_sees_a = perp_distance(a.left, b.left, b.right) <= tol
        && perp_distance(a.right, b.left, b.right) <= tol;
    a_sees_b || b_sees_a
}

/// Project `p` onto the `a`-`b` line's parameterization, returning `t` such
/// that the projected point is `a + t * (b - a)`.
fn project_t(p: Coord<f64>, a: Coord<f64>, b: Coord<f64>) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return 0.0;
    }
    ((p.x - a.x) * dx + (p.y - a.y) * dy) / len2
}

/// The overlapping sub-range of two tube-collinear segments, projected onto
/// `a`'s line, or `None` if their projected extents don't overlap by more
/// than a trivial epsilon.
fn overlap_range(a: &Segment, b: &Segment, tol: f64) -> Option<(Coord<f64>, Coord<f64>)> {
    let len = a.length();
    if len == 0.0 {
        return None;
    }
    let t0 = 0.0;
    let t1 = 1.0;
    let tb0 = project_t(b.left, a.left, a.right);
    let tb1 = project_t(b.right, a.left, a.right);
    let (tb_lo, tb_hi) = if tb0 <= tb1 { (tb0, tb1) } else { (tb1, tb0) };

    let lo = t0.max(tb_lo);
    let hi = t1.min(tb_hi);
    let eps = tol / len;
    if hi - lo <= eps {
        return None;
    }

    let at = |t: f64| Coord {
        x: a.left.x + t * (a.right.x - a.left.x),
        y: a.left.y + t * (a.right.y - a.left.y),
    };
    Some((at(lo), at(hi)))
}

/// Intersect two segments under tolerance `tol`.
///
/// Returns `None` if disjoint, `Point` for a single crossing or tangency
/// (endpoints that fall within tolerance of the other segment's tube are
/// snapped to the tube), or `Overlap` for a collinear (or near-parallel and
/// tube-overlapping) overlap.
pub fn segment_intersect(a: &Segment, b: &Segment, tol: f64) -> Intersection {
    if !bbox_overlap(a, b, tol) {
        return Intersection::None;
    }

    let o1 = orient(a.left, a.right, b.left);
    let o2 = orient(a.left, a.right, b.right);
    let o3 = orient(b.left, b.right, a.left);
    let o4 = orient(b.left, b.right, a.right);

    let strictly_cross = o1 != o2
        && o3 != o4
        && o1 != Orientation::Collinear
        && o2 != Orientation::Collinear
        && o3 != Orientation::Collinear
        && o4 != Orientation::Collinear;

    if strictly_cross {
        if let Some(p) = raw_line_intersection(a, b) {
            return Intersection::Point(snap_to_tube(p, a, b, tol));
        }
    }

    if tube_collinear(a, b, tol) {
        if let Some((p1, p2)) = overlap_range(a, b, tol) {
            if point_eq(p1, p2, tol) {
                return Intersection::Point(p1);
            }
            return Intersection::Overlap(p1, p2);
        }
    }

    for (p, other) in [
        (a.left, b),
        (a.right, b),
        (b.left, a),
        (b.right, a),
    ] {
        if on_segment(p, other, tol) {
            return Intersection::Point(p);
        }
    }

    if !strictly_cross {
        if let Some(p) = raw_line_intersection(a, b) {
            if on_segment(p, a, tol) && on_segment(p, b, tol) {
                return Intersection::Point(snap_to_tube(p, a, b, tol));
            }
        }
    }

    Intersection::None
}

/// Whether `a` is strictly above, indistinguishable from, or below `b` at
/// sweep position `x`. `event_y` resolves the ambiguity for vertical
/// segments (see [`Segment::y_at`]).
///
/// "Above" means larger `y` (standard math convention). Ties within `tol`
/// are broken by slope, so a bundle of segments passing through a shared
/// point sort consistently just to the right of it.
pub fn order_at(a: &Segment, b: &Segment, x: f64, event_y: f64, tol: f64) -> std::cmp::Ordering {
    let ya = a.y_at(x, event_y);
    let yb = b.y_at(x, event_y);
    if (ya - yb).abs() > tol {
        return yb.partial_cmp(&ya).unwrap();
    }
    // Indistinguishable in y: steeper upward slope ends up above, just
    // past this x.
    match b.slope().partial_cmp(&a.slope()) {
        Some(std::cmp::Ordering::Equal) | None => a.id.cmp(&b.id),
        Some(o) => o,
    }
}
