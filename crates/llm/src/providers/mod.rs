pub mod openai;

use std::time::Duration;

use recap_core::config::LlmConfig;

use crate::provider::{LlmError, LlmProvider};

pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai";
pub const OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Create the LLM provider selected by config.
pub fn create_provider(llm_config: &LlmConfig) -> Result<Box<dyn LlmProvider>, LlmError> {
    let timeout = Duration::from_secs(llm_config.timeout_secs);
    match llm_config.provider.as_str() {
        "groq" => {
            let api_key = llm_config
                .groq_api_key
                .as_ref()
                .ok_or_else(|| LlmError::NotConfigured("GROQ_API_KEY is not set".into()))?;
            let base_url = llm_config.groq_base_url.as_deref().unwrap_or(GROQ_BASE_URL);
            Ok(Box::new(openai::OpenAiProvider::new(
                "groq",
                api_key.clone(),
                llm_config.groq_model.clone(),
                base_url.to_string(),
                timeout,
            )?))
        }
        "openai" => {
            let api_key = llm_config
                .openai_api_key
                .as_ref()
                .ok_or_else(|| LlmError::NotConfigured("OPENAI_API_KEY is not set".into()))?;
            let base_url = llm_config.openai_base_url.as_deref().unwrap_or(OPENAI_BASE_URL);
            Ok(Box::new(openai::OpenAiProvider::new(
                "openai",
                api_key.clone(),
                llm_config.openai_model.clone(),
                base_url.to_string(),
                timeout,
            )?))
        }
        other => Err(LlmError::NotConfigured(format!(
            "unknown LLM provider: '{}'",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groq_requires_key() {
        let config = LlmConfig::default();
        let err = create_provider(&config).err().unwrap();
        assert!(err.to_string().contains("GROQ_API_KEY is not set"));
    }

    #[test]
    fn groq_with_key() {
        let config = LlmConfig {
            groq_api_key: Some("gsk_test".into()),
            ..LlmConfig::default()
        };
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.name(), "groq/llama-3.1-8b-instant");
    }

    #[test]
    fn openai_with_key() {
        let config = LlmConfig {
            provider: "openai".into(),
            openai_api_key: Some("sk-test".into()),
            ..LlmConfig::default()
        };
        assert_eq!(create_provider(&config).unwrap().name(), "openai/gpt-4o-mini");
    }

    #[test]
    fn unknown_provider() {
        let config = LlmConfig {
            provider: "carrier-pigeon".into(),
            ..LlmConfig::default()
        };
        assert!(matches!(create_provider(&config), Err(LlmError::NotConfigured(_))));
    }
}
