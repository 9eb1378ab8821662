pub mod provider;
pub mod providers;
pub mod summarize;

pub use provider::{LlmError, LlmProvider, Message, Role};
pub use providers::create_provider;
pub use summarize::Summarizer;
