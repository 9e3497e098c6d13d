use std::io::{BufRead, BufReader};

use serde::{Deserialize, Serialize};

use crate::chat::domain::chat_client::{ChatClient, ChatError, ChatMessage, ChatStream};

/// Client for Ollama's native `/api/chat` endpoint.
///
/// Ollama streams newline-delimited JSON objects rather than SSE; the last
/// object carries `"done": true`.
pub struct OllamaClient {
    base_url: String,
    model: String,
    http: reqwest::blocking::Client,
}

#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
}

#[derive(Deserialize)]
struct OllamaChunk {
    #[serde(default)]
    message: Option<OllamaMessage>,
    #[serde(default)]
    done: bool,
}

#[derive(Deserialize)]
struct OllamaMessage {
    content: String,
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            http: reqwest::blocking::Client::new(),
        }
    }

    fn send(&self, messages: &[ChatMessage], stream: bool) -> Result<reqwest::blocking::Response, ChatError> {
        let url = format!("{}/api/chat", self.base_url.trim_end_matches('/'));
        let body = OllamaRequest {
            model: &self.model,
            messages,
            stream,
        };

        let response = self.http.post(&url).json(&body).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::Api {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }
        Ok(response)
    }
}

impl ChatClient for OllamaClient {
    fn chat(&self, messages: &[ChatMessage], stream: bool) -> Result<ChatStream, ChatError> {
        let response = self.send(messages, stream)?;

        if stream {
            Ok(Box::new(NdjsonChunks::new(BufReader::new(response))))
        } else {
            let parsed: OllamaChunk = response
                .json()
                .map_err(|e| ChatError::Malformed(e.to_string()))?;
            let content = parsed.message.map(|m| m.content).unwrap_or_default();
            Ok(Box::new(std::iter::once(Ok(content))))
        }
    }
}

/// Pulls content fragments out of an NDJSON response body, one JSON object
/// per line, stopping after the object marked `done`.
struct NdjsonChunks<R: BufRead> {
    lines: std::io::Lines<R>,
    done: bool,
}

impl<R: BufRead> NdjsonChunks<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for NdjsonChunks<R> {
    type Item = Result<String, ChatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    self.done = true;
                    return Some(Err(ChatError::Io(e)));
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<OllamaChunk>(&line) {
                Ok(chunk) => {
                    if chunk.done {
                        self.done = true;
                    }
                    let content = chunk.message.map(|m| m.content).unwrap_or_default();
                    if content.is_empty() && self.done {
                        // Final bookkeeping object carries no text
                        return None;
                    }
                    return Some(Ok(content));
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(ChatError::Malformed(e.to_string())));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn collect(body: &str) -> Vec<Result<String, ChatError>> {
        NdjsonChunks::new(Cursor::new(body.to_string())).collect()
    }

    #[test]
    fn test_ndjson_extracts_content_in_order() {
        let body = concat!(
            "{\"message\":{\"content\":\"Hel\"},\"done\":false}\n",
            "{\"message\":{\"content\":\"lo\"},\"done\":false}\n",
            "{\"message\":{\"content\":\"\"},\"done\":true}\n",
        );
        let chunks: Vec<String> = collect(body).into_iter().map(|c| c.unwrap()).collect();
        assert_eq!(chunks, vec!["Hel", "lo"]);
    }

    #[test]
    fn test_ndjson_final_chunk_with_content_is_yielded() {
        let body = "{\"message\":{\"content\":\"bye\"},\"done\":true}\n";
        let chunks: Vec<String> = collect(body).into_iter().map(|c| c.unwrap()).collect();
        assert_eq!(chunks, vec!["bye"]);
    }

    #[test]
    fn test_ndjson_stops_after_done() {
        let body = concat!(
            "{\"message\":{\"content\":\"x\"},\"done\":true}\n",
            "{\"message\":{\"content\":\"never\"},\"done\":false}\n",
        );
        let chunks = collect(body);
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn test_ndjson_skips_blank_lines() {
        let body = "\n{\"message\":{\"content\":\"ok\"},\"done\":true}\n";
        let chunks: Vec<String> = collect(body).into_iter().map(|c| c.unwrap()).collect();
        assert_eq!(chunks, vec!["ok"]);
    }

    #[test]
    fn test_ndjson_malformed_line_yields_error_then_stops() {
        let body = "{broken\n{\"message\":{\"content\":\"x\"},\"done\":false}\n";
        let chunks = collect(body);
        assert_eq!(chunks.len(), 1);
        assert!(matches!(chunks[0], Err(ChatError::Malformed(_))));
    }

    #[test]
    fn test_request_body_shape() {
        let messages = vec![ChatMessage::user("hi")];
        let body = OllamaRequest {
            model: "llama3.1",
            messages: &messages,
            stream: true,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "llama3.1");
        assert_eq!(json["stream"], true);
        assert_eq!(json["messages"][0]["content"], "hi");
    }
}
