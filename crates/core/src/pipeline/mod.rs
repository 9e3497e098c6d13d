pub mod meeting_notes_use_case;
pub mod transcribe_meeting_use_case;
pub mod transcript_presenter;
