use std::io::Write;

use crate::diarization::domain::overlap_aligner::AlignedSegment;

/// Domain interface for rendering aligned transcript segments.
pub trait TranscriptPresenter {
    fn present(&mut self, aligned: &AlignedSegment) -> Result<(), Box<dyn std::error::Error>>;
}

/// Renders segments as plain text lines:
/// `[12.5s - 15.0s] SPEAKER_00: and that's the plan`
///
/// Segments with no resolved speaker drop the label, not the text.
pub struct TextPresenter<W: Write> {
    out: W,
}

impl<W: Write> TextPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> TranscriptPresenter for TextPresenter<W> {
    fn present(&mut self, aligned: &AlignedSegment) -> Result<(), Box<dyn std::error::Error>> {
        let interval = &aligned.segment.interval;
        match aligned.speaker {
            Some(ref speaker) => writeln!(
                self.out,
                "[{:.1}s - {:.1}s] {}: {}",
                interval.start(),
                interval.end(),
                speaker,
                aligned.segment.text
            )?,
            None => writeln!(
                self.out,
                "[{:.1}s - {:.1}s] {}",
                interval.start(),
                interval.end(),
                aligned.segment.text
            )?,
        }
        Ok(())
    }
}
