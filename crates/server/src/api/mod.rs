//! Domain-focused API endpoint modules.
//!
//! Each sub-module owns a single responsibility area.
//! Shared error mapping lives here in mod.rs.

pub mod doc;
mod export;
mod health;
mod history;
mod summarize;

use axum::http::StatusCode;
use recap_core::RecapError;
use recap_export::ExportError;
use recap_ingest::ExtractionError;
use recap_llm::LlmError;
use tokio::task::JoinError;

/// Error half of every handler result: status plus a plain-text message.
pub type ApiError = (StatusCode, String);

// ── Error mapping ────────────────────────────────────────────────

pub(crate) fn recap_error(e: RecapError) -> ApiError {
    let status = match e {
        RecapError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        RecapError::HistoryEntryNotFound(_) => StatusCode::NOT_FOUND,
    };
    (status, e.to_string())
}

pub(crate) fn extraction_error(e: ExtractionError) -> ApiError {
    let status = match e {
        ExtractionError::Decode(_) => StatusCode::BAD_REQUEST,
        ExtractionError::Ocr(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, e.to_string())
}

pub(crate) fn llm_error(e: LlmError) -> ApiError {
    let status = match e {
        LlmError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::BAD_GATEWAY,
    };
    (status, format!("Summarization failed: {e}"))
}

pub(crate) fn export_error(e: ExportError) -> ApiError {
    let status = match e {
        ExportError::UnsupportedFormat(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, e.to_string())
}

pub(crate) fn join_error(e: JoinError) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Background task failed: {e}"),
    )
}

// ── Re-exports ───────────────────────────────────────────────────
// Preserves flat `api::foo` import paths used by route registration.

pub use export::export;
pub use health::{config, health, instructions};
pub use history::{history_export, history_get, history_list, record_summary};
pub use summarize::summarize;
