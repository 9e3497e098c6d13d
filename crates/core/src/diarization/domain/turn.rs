use crate::shared::time_interval::TimeInterval;

/// A timed span attributed to one speaker.
///
/// The speaker label is opaque and only stable within a single diarization
/// run. Turn collections carry no order guarantee and may overlap slightly
/// at boundaries, depending on the diarization model.
#[derive(Clone, Debug, PartialEq)]
pub struct Turn {
    pub interval: TimeInterval,
    pub speaker: String,
}

impl Turn {
    pub fn new(interval: TimeInterval, speaker: impl Into<String>) -> Self {
        Self {
            interval,
            speaker: speaker.into(),
        }
    }
}
