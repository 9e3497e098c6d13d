/// A half-open time interval `[start, end)` in seconds.
///
/// The constructor clamps malformed input instead of rejecting it: a negative
/// start is moved to 0.0, and an end before the start collapses the interval
/// to zero length at `start`. Callers never observe `end < start`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeInterval {
    start: f64,
    end: f64,
}

impl TimeInterval {
    pub fn new(start: f64, end: f64) -> Self {
        let start = start.max(0.0);
        Self {
            start,
            end: end.max(start),
        }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Length of the time-axis intersection with `other`.
    ///
    /// Zero when the intervals are disjoint or merely touch at a boundary.
    /// Symmetric: `a.overlap(&b) == b.overlap(&a)`.
    pub fn overlap(&self, other: &TimeInterval) -> f64 {
        (self.end.min(other.end) - self.start.max(other.start)).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_new_keeps_well_formed_bounds() {
        let i = TimeInterval::new(1.5, 4.0);
        assert_eq!(i.start(), 1.5);
        assert_eq!(i.end(), 4.0);
        assert_relative_eq!(i.duration(), 2.5);
    }

    #[test]
    fn test_new_clamps_negative_start() {
        let i = TimeInterval::new(-2.0, 1.0);
        assert_eq!(i.start(), 0.0);
        assert_eq!(i.end(), 1.0);
    }

    #[test]
    fn test_new_clamps_inverted_bounds_to_empty() {
        let i = TimeInterval::new(5.0, 3.0);
        assert_eq!(i.start(), 5.0);
        assert_eq!(i.end(), 5.0);
        assert_eq!(i.duration(), 0.0);
    }

    #[test]
    fn test_overlap_disjoint_is_zero() {
        let a = TimeInterval::new(0.0, 1.0);
        let b = TimeInterval::new(2.0, 3.0);
        assert_eq!(a.overlap(&b), 0.0);
    }

    #[test]
    fn test_overlap_touching_is_zero() {
        let a = TimeInterval::new(0.0, 1.0);
        let b = TimeInterval::new(1.0, 2.0);
        assert_eq!(a.overlap(&b), 0.0);
    }

    #[test]
    fn test_self_overlap_equals_duration() {
        let a = TimeInterval::new(1.0, 4.5);
        assert_relative_eq!(a.overlap(&a), a.duration());
    }

    #[rstest]
    #[case::partial(0.0, 3.0, 2.0, 5.0, 1.0)]
    #[case::contained(0.0, 10.0, 2.0, 5.0, 3.0)]
    #[case::identical(1.0, 2.0, 1.0, 2.0, 1.0)]
    #[case::disjoint(0.0, 1.0, 5.0, 6.0, 0.0)]
    fn test_overlap_cases(
        #[case] a0: f64,
        #[case] a1: f64,
        #[case] b0: f64,
        #[case] b1: f64,
        #[case] expected: f64,
    ) {
        let a = TimeInterval::new(a0, a1);
        let b = TimeInterval::new(b0, b1);
        assert_relative_eq!(a.overlap(&b), expected);
        assert_relative_eq!(b.overlap(&a), expected);
    }
}
