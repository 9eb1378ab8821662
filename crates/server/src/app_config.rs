//! Application configuration builders.
//!
//! Constructs the extractor and summarizer from `Config`.

use std::sync::Arc;

use recap_core::Config;
use recap_ingest::TextExtractor;
use recap_llm::Summarizer;
use tracing::{info, warn};

use crate::state::AppState;

/// Load configuration from `.env` and environment variables.
pub fn load_config() -> Config {
    recap_core::config::load_dotenv();
    Config::from_env()
}

/// Build the summarizer, or `None` when the provider is not configured.
pub fn build_summarizer(config: &Config) -> Option<Summarizer> {
    match Summarizer::from_config(&config.llm) {
        Ok(summarizer) => {
            info!("LLM summarizer ready (provider: {})", summarizer.provider_name());
            Some(summarizer)
        }
        Err(e) => {
            warn!("LLM summarizer not available: {} - POST /summarize will return 503", e);
            None
        }
    }
}

pub fn build_app_state(config: Config) -> Arc<AppState> {
    let extractor = TextExtractor::from_config(&config.ocr);
    let summarizer = build_summarizer(&config);
    Arc::new(AppState::new(config, extractor, summarizer))
}
