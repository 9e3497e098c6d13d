pub mod diarizer;
pub mod overlap_aligner;
pub mod turn;
