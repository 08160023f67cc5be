use geo_types::Coord;

use crate::error::SweepError;

/// Stable identity of an input segment, preserved across a run.
///
/// An index into the caller's original segment slice.
pub type SegmentId = usize;

/// A planar line segment carrying a stable id.
///
/// After preprocessing (see [`crate::preprocess`]), a segment is either
/// strictly non-vertical with `left.x < right.x`, or exactly vertical with
/// `left.y < right.y`. Endpoints are mutable: preprocessing and glomming
/// during the sweep may rewrite them in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub id: SegmentId,
    pub left: Coord<f64>,
    pub right: Coord<f64>,
    pub vertical: bool,
}

impl Segment {
    /// Build a segment from an unordered endpoint pair, orienting it per
    /// the left/right rule: smaller `x` is left (ties by smaller `y`);
    /// vertical segments (equal `x`) take the smaller `y` as left.
    pub fn from_endpoints(id: SegmentId, a: Coord<f64>, b: Coord<f64>) -> Result<Self, SweepError> {
        if !a.x.is_finite() || !a.y.is_finite() || !b.x.is_finite() || !b.y.is_finite() {
            return Err(SweepError::InvalidInput {
                segment_index: id,
                reason: "non-finite coordinate",
            });
        }
        let vertical = a.x == b.x;
        let (left, right) = if vertical {
            if a.y <= b.y { (a, b) } else { (b, a) }
        } else if a.x < b.x || (a.x == b.x && a.y < b.y) {
            (a, b)
        } else {
            (b, a)
        };
        Ok(Segment { id, left, right, vertical })
    }

    /// Length of the segment (used to scale angle-to-vertical tolerance).
    pub fn length(&self) -> f64 {
        let dx = self.right.x - self.left.x;
        let dy = self.right.y - self.left.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// `y` of this segment's line at `x`, interpolated linearly.
    ///
    /// For a vertical segment this is undefined in general (the segment
    /// covers a whole `y`-range at a single `x`); callers must supply
    /// `event_y`, the `y` of the point currently under consideration, which
    /// is used verbatim since it necessarily already lies on the segment.
    pub fn y_at(&self, x: f64, event_y: f64) -> f64 {
        if self.vertical {
            return event_y;
        }
        let dx = self.right.x - self.left.x;
        if dx == 0.0 {
            return event_y;
        }
        let t = (x - self.left.x) / dx;
        self.left.y + t * (self.right.y - self.left.y)
    }

    /// Slope used as the secondary sort key when two segments' `y` at the
    /// sweep `x` are indistinguishable within tolerance. A vertical segment
    /// has the steepest possible upward slope by convention.
    pub fn slope(&self) -> f64 {
        if self.vertical {
            return f64::INFINITY;
        }
        let dx = self.right.x - self.left.x;
        (self.right.y - self.left.y) / dx
    }
}
