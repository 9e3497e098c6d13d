use crate::audio::domain::audio_segment::AudioSegment;

use super::segment::Segment;

/// Domain interface for speech-to-text transcription.
///
/// Implementations run inference on audio and return segments ordered by
/// start time. The language hint is passed through to the engine; `None`
/// means auto-detect.
pub trait Transcriber: Send {
    fn transcribe(
        &self,
        audio: &AudioSegment,
        language: Option<&str>,
    ) -> Result<Vec<Segment>, Box<dyn std::error::Error>>;
}
