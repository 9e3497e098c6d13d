use crate::audio::domain::audio_segment::AudioSegment;
use crate::diarization::domain::diarizer::Diarizer;
use crate::diarization::domain::overlap_aligner::{AlignedSegment, OverlapAligner};
use crate::transcription::domain::transcriber::Transcriber;

/// Transcribes meeting audio and resolves a speaker per segment.
///
/// Diarization is optional; without it every segment comes back with an
/// unresolved speaker. Transcription and diarization both run to completion
/// before alignment starts.
pub struct TranscribeMeetingUseCase {
    transcriber: Box<dyn Transcriber>,
    diarizer: Option<Box<dyn Diarizer>>,
    language: Option<String>,
}

impl TranscribeMeetingUseCase {
    pub fn new(
        transcriber: Box<dyn Transcriber>,
        diarizer: Option<Box<dyn Diarizer>>,
        language: Option<String>,
    ) -> Self {
        Self {
            transcriber,
            diarizer,
            language,
        }
    }

    pub fn run(&self, audio: &AudioSegment) -> Result<Vec<AlignedSegment>, Box<dyn std::error::Error>> {
        let segments = self.transcriber.transcribe(audio, self.language.as_deref())?;
        log::info!("Transcribed {} segments", segments.len());

        let aligned = match self.diarizer {
            Some(ref diarizer) => {
                let turns = diarizer.diarize(audio)?;
                OverlapAligner::align(&segments, &turns)
            }
            None => segments
                .into_iter()
                .map(|segment| AlignedSegment {
                    segment,
                    speaker: None,
                })
                .collect(),
        };

        Ok(aligned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diarization::domain::turn::Turn;
    use crate::shared::time_interval::TimeInterval;
    use crate::transcription::domain::segment::Segment;
    use std::sync::{Arc, Mutex};

    // ─── Stubs ───

    struct StubTranscriber {
        segments: Vec<Segment>,
        seen_language: Arc<Mutex<Option<String>>>,
    }

    impl Transcriber for StubTranscriber {
        fn transcribe(
            &self,
            _: &AudioSegment,
            language: Option<&str>,
        ) -> Result<Vec<Segment>, Box<dyn std::error::Error>> {
            *self.seen_language.lock().unwrap() = language.map(str::to_string);
            Ok(self.segments.clone())
        }
    }

    struct StubDiarizer {
        turns: Vec<Turn>,
    }

    impl Diarizer for StubDiarizer {
        fn diarize(&self, _: &AudioSegment) -> Result<Vec<Turn>, Box<dyn std::error::Error>> {
            Ok(self.turns.clone())
        }
    }

    struct FailingDiarizer;

    impl Diarizer for FailingDiarizer {
        fn diarize(&self, _: &AudioSegment) -> Result<Vec<Turn>, Box<dyn std::error::Error>> {
            Err("diarization service unavailable".into())
        }
    }

    fn silent_audio() -> AudioSegment {
        AudioSegment::new(vec![0.0; 16000], 16000)
    }

    fn segment(start: f64, end: f64, text: &str) -> Segment {
        Segment::new(TimeInterval::new(start, end), text)
    }

    fn stub_transcriber(segments: Vec<Segment>) -> StubTranscriber {
        StubTranscriber {
            segments,
            seen_language: Arc::new(Mutex::new(None)),
        }
    }

    #[test]
    fn test_without_diarizer_all_speakers_unresolved() {
        let uc = TranscribeMeetingUseCase::new(
            Box::new(stub_transcriber(vec![
                segment(0.0, 2.0, "hello"),
                segment(2.0, 4.0, "world"),
            ])),
            None,
            None,
        );
        let aligned = uc.run(&silent_audio()).unwrap();
        assert_eq!(aligned.len(), 2);
        assert!(aligned.iter().all(|a| a.speaker.is_none()));
        assert_eq!(aligned[0].segment.text, "hello");
    }

    #[test]
    fn test_with_diarizer_speakers_resolved_by_overlap() {
        let uc = TranscribeMeetingUseCase::new(
            Box::new(stub_transcriber(vec![
                segment(0.0, 2.0, "hi"),
                segment(3.0, 5.0, "there"),
            ])),
            Some(Box::new(StubDiarizer {
                turns: vec![
                    Turn::new(TimeInterval::new(0.0, 2.5), "SPEAKER_00"),
                    Turn::new(TimeInterval::new(2.5, 6.0), "SPEAKER_01"),
                ],
            })),
            None,
        );
        let aligned = uc.run(&silent_audio()).unwrap();
        assert_eq!(aligned[0].speaker.as_deref(), Some("SPEAKER_00"));
        assert_eq!(aligned[1].speaker.as_deref(), Some("SPEAKER_01"));
    }

    #[test]
    fn test_language_hint_reaches_transcriber() {
        let transcriber = stub_transcriber(vec![]);
        let seen = transcriber.seen_language.clone();
        let uc = TranscribeMeetingUseCase::new(
            Box::new(transcriber),
            None,
            Some("de".to_string()),
        );
        uc.run(&silent_audio()).unwrap();
        assert_eq!(seen.lock().unwrap().as_deref(), Some("de"));
    }

    #[test]
    fn test_diarizer_failure_propagates() {
        let uc = TranscribeMeetingUseCase::new(
            Box::new(stub_transcriber(vec![segment(0.0, 1.0, "x")])),
            Some(Box::new(FailingDiarizer)),
            None,
        );
        let result = uc.run(&silent_audio());
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_transcription_yields_empty_output() {
        let uc = TranscribeMeetingUseCase::new(
            Box::new(stub_transcriber(vec![])),
            Some(Box::new(StubDiarizer { turns: vec![] })),
            None,
        );
        assert!(uc.run(&silent_audio()).unwrap().is_empty());
    }
}
