use crate::transcription::domain::segment::Segment;

use super::turn::Turn;

/// A transcript segment with its resolved speaker.
///
/// `speaker` is `None` when no diarization turn overlapped the segment.
/// That is a normal outcome, not an error.
#[derive(Clone, Debug, PartialEq)]
pub struct AlignedSegment {
    pub segment: Segment,
    pub speaker: Option<String>,
}

/// Assigns each transcript segment the speaker of the diarization turn it
/// shares the most time with.
///
/// A pure mapping: inputs are borrowed immutably and never modified. Naive
/// O(segments × turns) scan; turns are typically few (tens), so no interval
/// index is needed.
pub struct OverlapAligner;

impl OverlapAligner {
    /// Speaker of the turn maximizing overlap with `segment`, or `None` when
    /// the turn collection is empty or no turn intersects the segment.
    ///
    /// Ties on positive overlap resolve to the turn appearing first in the
    /// given order, making the result reproducible regardless of how the
    /// upstream diarizer happens to order its output. Zero overlap is never
    /// selected, tie or not.
    pub fn assign_speaker<'a>(segment: &Segment, turns: &'a [Turn]) -> Option<&'a str> {
        let mut best: Option<(&str, f64)> = None;
        for turn in turns {
            let overlap = segment.interval.overlap(&turn.interval);
            if overlap <= 0.0 {
                continue;
            }
            match best {
                Some((_, best_overlap)) if overlap <= best_overlap => {}
                _ => best = Some((&turn.speaker, overlap)),
            }
        }
        best.map(|(speaker, _)| speaker)
    }

    /// Align a full segment sequence against one fixed turn set.
    ///
    /// Each segment is resolved independently; the output preserves input
    /// order.
    pub fn align(segments: &[Segment], turns: &[Turn]) -> Vec<AlignedSegment> {
        segments
            .iter()
            .map(|segment| AlignedSegment {
                segment: segment.clone(),
                speaker: Self::assign_speaker(segment, turns).map(str::to_string),
            })
            .collect()
    }
}
