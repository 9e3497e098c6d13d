pub mod audio;
pub mod chat;
pub mod diarization;
pub mod pipeline;
pub mod shared;
pub mod transcription;
