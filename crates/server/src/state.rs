use std::sync::Arc;

use recap_core::{Config, HistoryLog};
use recap_ingest::TextExtractor;
use recap_llm::Summarizer;
use tokio::sync::RwLock;

/// Shared state of the single summarizer session.
pub struct AppState {
    pub config: Config,
    /// Shared with blocking extraction tasks.
    pub extractor: Arc<TextExtractor>,
    /// `None` when no LLM provider could be built from config.
    pub summarizer: Option<Summarizer>,
    /// Append-only; handlers never edit or remove entries.
    pub history: RwLock<HistoryLog>,
}

impl AppState {
    pub fn new(config: Config, extractor: TextExtractor, summarizer: Option<Summarizer>) -> Self {
        Self {
            config,
            extractor: Arc::new(extractor),
            summarizer,
            history: RwLock::new(HistoryLog::new()),
        }
    }
}
