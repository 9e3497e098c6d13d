use crate::chat::domain::chat_client::{ChatClient, ChatError, ChatMessage, ChatStream};
use crate::shared::constants::{SUMMARY_PROMPT, TASKS_PROMPT};

/// Generates meeting notes from a finished transcript via a chat provider.
///
/// Returns streams rather than strings so callers can display fragments as
/// they arrive and stop consuming early to cancel the request.
pub struct MeetingNotesUseCase {
    client: Box<dyn ChatClient>,
}

impl MeetingNotesUseCase {
    pub fn new(client: Box<dyn ChatClient>) -> Self {
        Self { client }
    }

    pub fn summarize(&self, transcript: &str) -> Result<ChatStream, ChatError> {
        self.request(SUMMARY_PROMPT, transcript)
    }

    pub fn extract_tasks(&self, transcript: &str) -> Result<ChatStream, ChatError> {
        self.request(TASKS_PROMPT, transcript)
    }

    fn request(&self, prompt: &str, transcript: &str) -> Result<ChatStream, ChatError> {
        let messages = vec![ChatMessage::user(format!("{prompt}{transcript}"))];
        self.client.chat(&messages, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct StubChatClient {
        seen: Arc<Mutex<Vec<(String, bool)>>>,
        reply: Vec<String>,
    }

    impl ChatClient for StubChatClient {
        fn chat(&self, messages: &[ChatMessage], stream: bool) -> Result<ChatStream, ChatError> {
            self.seen
                .lock()
                .unwrap()
                .push((messages[0].content.clone(), stream));
            let reply = self.reply.clone();
            Ok(Box::new(reply.into_iter().map(Ok::<String, ChatError>)))
        }
    }

    fn stub(reply: Vec<&str>) -> (StubChatClient, Arc<Mutex<Vec<(String, bool)>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        (
            StubChatClient {
                seen: seen.clone(),
                reply: reply.into_iter().map(str::to_string).collect(),
            },
            seen,
        )
    }

    #[test]
    fn test_summarize_prepends_prompt_and_streams() {
        let (client, seen) = stub(vec!["A ", "summary"]);
        let uc = MeetingNotesUseCase::new(Box::new(client));

        let chunks: Vec<String> = uc
            .summarize("we talked")
            .unwrap()
            .map(|c| c.unwrap())
            .collect();
        assert_eq!(chunks, vec!["A ", "summary"]);

        let calls = seen.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, format!("{SUMMARY_PROMPT}we talked"));
        assert!(calls[0].1, "notes generation should stream");
    }

    #[test]
    fn test_extract_tasks_uses_tasks_prompt() {
        let (client, seen) = stub(vec!["- do things"]);
        let uc = MeetingNotesUseCase::new(Box::new(client));

        let _ = uc.extract_tasks("we talked").unwrap().count();
        let calls = seen.lock().unwrap();
        assert_eq!(calls[0].0, format!("{TASKS_PROMPT}we talked"));
    }
}
