use std::fmt;

/// Fatal errors produced by a sweep run.
///
/// All three variants are unrecoverable: the numeric and structural
/// assumptions the sweep depends on cannot be repaired mid-run, so a caller
/// that hits one must discard the input (or re-run with different segments
/// or a different tolerance) rather than retry in place.
#[derive(Debug, Clone, PartialEq)]
pub enum SweepError {
    /// A segment endpoint pair collapsed to a single point within
    /// tolerance, or a coordinate was non-finite.
    InvalidInput { segment_index: usize, reason: &'static str },

    /// Two distinct vertical segments fall within tolerance in `x` and
    /// their `y`-extents overlap by more than tolerance, so they would glom
    /// to the same event key with ambiguous ordering.
    VerticalCollision { first: usize, second: usize },

    /// An internal structural invariant was violated: the status tree was
    /// non-empty at termination, or a removal targeted a segment that
    /// wasn't active.
    StatusInvariant { detail: &'static str },
}

impl std::error::Error for SweepError {}

impl fmt::Display for SweepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepError::InvalidInput { segment_index, reason } => {
                write!(f, "invalid input at segment {segment_index}: {reason}")
            }
            SweepError::VerticalCollision { first, second } => {
                write!(
                    f,
                    "vertical segments {first} and {second} are within tolerance and overlap in y-extent"
                )
            }
            SweepError::StatusInvariant { detail } => {
                write!(f, "status tree invariant violated: {detail}")
            }
        }
    }
}
