pub mod config;
pub mod document;
pub mod error;
pub mod session;

pub use config::{Config, LlmConfig, OcrConfig, ServerConfig};
pub use document::*;
pub use error::*;
pub use session::*;
