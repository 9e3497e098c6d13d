use crate::audio::domain::audio_segment::AudioSegment;

use super::turn::Turn;

/// Domain interface for speaker diarization.
///
/// Implementations partition the audio into speaker-attributed turns.
/// The returned collection has no guaranteed order.
pub trait Diarizer: Send {
    fn diarize(&self, audio: &AudioSegment) -> Result<Vec<Turn>, Box<dyn std::error::Error>>;
}
