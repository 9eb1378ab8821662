use recap_core::config::LlmConfig;
use tracing::info;

use crate::provider::{LlmError, LlmProvider, Message};
use crate::providers::create_provider;

pub const SYSTEM_PROMPT: &str = "You are an AI summarizer that must strictly follow the instructions.";

/// Build the user turn: the instruction first, then the text to summarize.
pub fn build_prompt(text: &str, instruction: &str) -> String {
    format!("Instruction: {instruction}\n\nText:\n{text}")
}

/// Sends assembled meeting text to the configured model and returns its summary.
pub struct Summarizer {
    provider: Box<dyn LlmProvider>,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl Summarizer {
    pub fn new(provider: Box<dyn LlmProvider>, temperature: f32, max_tokens: Option<u32>) -> Self {
        Self {
            provider,
            temperature,
            max_tokens,
        }
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let provider = create_provider(config)?;
        Ok(Self::new(provider, config.temperature, config.max_tokens))
    }

    pub fn provider_name(&self) -> String {
        self.provider.name()
    }

    pub async fn summarize(&self, text: &str, instruction: &str) -> Result<String, LlmError> {
        let messages = vec![
            Message::system(SYSTEM_PROMPT),
            Message::user(build_prompt(text, instruction)),
        ];
        let summary = self
            .provider
            .complete(messages, self.temperature, self.max_tokens)
            .await?;
        info!(
            "Summarized {} chars with {} ({} chars out)",
            text.chars().count(),
            self.provider.name(),
            summary.chars().count()
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::provider::Role;

    struct Recorder {
        seen: Arc<Mutex<Vec<(Vec<Message>, f32, Option<u32>)>>>,
        reply: Result<String, u16>,
    }

    #[async_trait]
    impl LlmProvider for Recorder {
        async fn complete(
            &self,
            messages: Vec<Message>,
            temperature: f32,
            max_tokens: Option<u32>,
        ) -> Result<String, LlmError> {
            self.seen.lock().unwrap().push((messages, temperature, max_tokens));
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(LlmError::ApiError {
                    status: *status,
                    body: "rate limited".into(),
                }),
            }
        }

        fn name(&self) -> String {
            "fake/recorder".into()
        }
    }

    #[tokio::test]
    async fn sends_system_and_user_turns() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let summarizer = Summarizer::new(
            Box::new(Recorder {
                seen: seen.clone(),
                reply: Ok("- decided X".into()),
            }),
            0.5,
            None,
        );

        let summary = summarizer
            .summarize("Ana: let's do X", "Extract only key points")
            .await
            .unwrap();
        assert_eq!(summary, "- decided X");

        let seen = seen.lock().unwrap();
        let (messages, temperature, max_tokens) = &seen[0];
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, SYSTEM_PROMPT);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(
            messages[1].content,
            "Instruction: Extract only key points\n\nText:\nAna: let's do X"
        );
        assert_eq!((*temperature, *max_tokens), (0.5, None));
    }

    #[tokio::test]
    async fn provider_errors_pass_through() {
        let summarizer = Summarizer::new(
            Box::new(Recorder {
                seen: Arc::new(Mutex::new(Vec::new())),
                reply: Err(429),
            }),
            0.5,
            None,
        );
        let err = summarizer.summarize("text", "Detailed summary").await.unwrap_err();
        assert!(matches!(err, LlmError::ApiError { status: 429, .. }));
    }

    #[test]
    fn unconfigured_provider_is_reported() {
        let err = Summarizer::from_config(&LlmConfig::default()).err().unwrap();
        assert!(matches!(err, LlmError::NotConfigured(_)));
    }
}
