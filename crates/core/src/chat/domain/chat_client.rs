use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("chat request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("chat API error {status}: {body}")]
    Api { status: u16, body: String },
    #[error("malformed chat response: {0}")]
    Malformed(String),
    #[error("error reading chat stream: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Lazy, forward-only sequence of response text fragments.
///
/// Finite: ends when the provider signals completion. Not restartable.
/// Dropping it early drops the underlying HTTP response, cancelling the
/// stream.
pub type ChatStream = Box<dyn Iterator<Item = Result<String, ChatError>> + Send>;

/// Capability interface over interchangeable chat completion providers.
///
/// With `stream` false the returned sequence yields the complete response as
/// a single fragment; with `stream` true it yields fragments as the provider
/// produces them.
pub trait ChatClient: Send {
    fn chat(&self, messages: &[ChatMessage], stream: bool) -> Result<ChatStream, ChatError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), "\"system\"");
    }

    #[test]
    fn test_message_serializes_to_wire_format() {
        let msg = ChatMessage::user("hello");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "hello");
    }
}
