use crate::shared::time_interval::TimeInterval;

/// A timed span of transcribed text.
///
/// Produced in chronological order (by interval start, the order speech was
/// recognized) and never mutated afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub interval: TimeInterval,
    pub text: String,
}

impl Segment {
    pub fn new(interval: TimeInterval, text: impl Into<String>) -> Self {
        Self {
            interval,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_fields() {
        let s = Segment::new(TimeInterval::new(1.0, 2.5), "hello");
        assert_eq!(s.interval.start(), 1.0);
        assert_eq!(s.interval.end(), 2.5);
        assert_eq!(s.text, "hello");
    }
}
