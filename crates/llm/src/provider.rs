use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One chat-completions message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A chat-completions backend that turns messages into one reply.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send the conversation and return the assistant's reply text.
    ///
    /// `max_tokens = None` sends no completion cap.
    async fn complete(
        &self,
        messages: Vec<Message>,
        temperature: f32,
        max_tokens: Option<u32>,
    ) -> Result<String, LlmError>;

    /// Short label for logs, e.g. `groq/llama-3.1-8b-instant`.
    fn name(&self) -> String;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error: {status} — {body}")]
    ApiError { status: u16, body: String },
    #[error("failed to parse response: {0}")]
    ParseError(String),
    #[error("provider not configured: {0}")]
    NotConfigured(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        let json = serde_json::to_value(Message::system("be brief")).unwrap();
        assert_eq!(json["role"], "system");
        assert_eq!(json["content"], "be brief");
        assert_eq!(serde_json::to_value(Role::Assistant).unwrap(), "assistant");
    }

    #[test]
    fn api_error_message() {
        let err = LlmError::ApiError {
            status: 401,
            body: "invalid api key".into(),
        };
        assert_eq!(err.to_string(), "API error: 401 — invalid api key");
    }
}
