use std::io::{BufRead, BufReader};

use serde::{Deserialize, Serialize};

use crate::chat::domain::chat_client::{ChatClient, ChatError, ChatMessage, ChatStream};

/// Client for the OpenAI `/chat/completions` wire format.
///
/// Covers OpenAI itself plus Groq and LM Studio, which expose the same
/// endpoint shape; only base URL, key, and model differ.
pub struct OpenAiCompatibleClient {
    base_url: String,
    api_key: Option<String>,
    model: String,
    temperature: Option<f64>,
    http: reqwest::blocking::Client,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct StreamChunk {
    choices: Vec<StreamChoice>,
}

#[derive(Deserialize)]
struct StreamChoice {
    delta: StreamDelta,
}

#[derive(Deserialize)]
struct StreamDelta {
    content: Option<String>,
}

impl OpenAiCompatibleClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
        temperature: Option<f64>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
            model: model.into(),
            temperature,
            http: reqwest::blocking::Client::new(),
        }
    }

    fn send(&self, messages: &[ChatMessage], stream: bool) -> Result<reqwest::blocking::Response, ChatError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let body = CompletionRequest {
            model: &self.model,
            messages,
            stream,
            temperature: self.temperature,
        };

        let mut request = self.http.post(&url).json(&body);
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send()?;
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

impl ChatClient for OpenAiCompatibleClient {
    fn chat(&self, messages: &[ChatMessage], stream: bool) -> Result<ChatStream, ChatError> {
        let response = self.send(messages, stream)?;

        if stream {
            Ok(Box::new(SseChunks::new(BufReader::new(response))))
        } else {
            let parsed: CompletionResponse = response
                .json()
                .map_err(|e| ChatError::Malformed(e.to_string()))?;
            let content = parsed
                .choices
                .into_iter()
                .next()
                .and_then(|c| c.message.content)
                .unwrap_or_default();
            Ok(Box::new(std::iter::once(Ok(content))))
        }
    }
}

/// Pulls content fragments out of a server-sent-event response body.
///
/// Each event line looks like `data: {json chunk}`; the stream terminates
/// with `data: [DONE]`. Lines that aren't data events (blank keep-alives,
/// comments) are skipped.
struct SseChunks<R: BufRead> {
    lines: std::io::Lines<R>,
    done: bool,
}

impl<R: BufRead> SseChunks<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for SseChunks<R> {
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

            let data = match line.strip_prefix("data:") {
                Some(rest) => rest.trim_start(),
                None => continue,
            };
            if data == "[DONE]" {
                self.done = true;
                return None;
            }

            match serde_json::from_str::<StreamChunk>(data) {
                Ok(chunk) => {
                    let content = chunk
                        .choices
                        .into_iter()
                        .next()
                        .and_then(|c| c.delta.content)
                        .unwrap_or_default();
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
