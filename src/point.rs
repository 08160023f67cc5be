use std::cmp::Ordering;
use std::ops::Deref;

use geo_types::Coord;

/// A lexicographically ordered point, `(x, then y)`.
///
/// A thin wrapper around [`Coord<f64>`] so it can live as a `BTreeMap` key.
/// It is a logical error to construct this with a non-finite coordinate;
/// callers are expected to have rejected those during input validation.
#[derive(Clone, Copy, Debug)]
pub struct SweepPoint(pub Coord<f64>);

impl PartialEq for SweepPoint {
    fn eq(&self, other: &Self) -> bool {
        self.0.x == other.0.x && self.0.y == other.0.y
    }
}

impl Eq for SweepPoint {}

impl PartialOrd for SweepPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.0.x.partial_cmp(&other.0.x) {
            Some(Ordering::Equal) => self.0.y.partial_cmp(&other.0.y),
            o => o,
        }
    }
}

/// Derive `Ord` from `PartialOrd`, assuming no NaN ever reaches this type.
impl Ord for SweepPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.partial_cmp(other)
            .expect("SweepPoint coordinates must be finite")
    }
}

impl Deref for SweepPoint {
    type Target = Coord<f64>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Coord<f64>> for SweepPoint {
    fn from(c: Coord<f64>) -> Self {
        SweepPoint(c)
    }
}

impl From<(f64, f64)> for SweepPoint {
    fn from((x, y): (f64, f64)) -> Self {
        SweepPoint(Coord { x, y })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexicographic_ordering() {
        let p1 = SweepPoint::from((0., 0.));
        let p2 = SweepPoint::from((1., 0.));
        let p3 = SweepPoint::from((1., 1.));
        let p4 = SweepPoint::from((1., 1.));

        assert!(p1 < p2);
        assert!(p1 < p3);
        assert!(p2 < p3);
        assert!(p3 <= p4);
    }
}
