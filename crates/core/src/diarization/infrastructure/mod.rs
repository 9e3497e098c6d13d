pub mod hosted_diarizer;
