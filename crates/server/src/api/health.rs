//! Health, config, and instruction preset endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use recap_core::{DEFAULT_PRESET, INSTRUCTION_PRESETS};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub llm_configured: bool,
    pub llm_provider: Option<String>,
    pub history_len: usize,
}

/// Server liveness and summarizer availability
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Server is up", body = HealthResponse))
)]
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let history_len = state.history.read().await.len();
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        llm_configured: state.summarizer.is_some(),
        llm_provider: state.summarizer.as_ref().map(|s| s.provider_name()),
        history_len,
    })
}

/// Active configuration with secrets removed
#[utoipa::path(
    get,
    path = "/config",
    tag = "Health",
    responses((status = 200, description = "Redacted configuration"))
)]
pub async fn config(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(state.config.redacted_summary())
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct InstructionsResponse {
    pub presets: Vec<&'static str>,
    pub default: &'static str,
}

/// Preset summary styles and the default selection
#[utoipa::path(
    get,
    path = "/instructions",
    tag = "Summaries",
    responses((status = 200, description = "Preset styles", body = InstructionsResponse))
)]
pub async fn instructions() -> Json<InstructionsResponse> {
    Json(InstructionsResponse {
        presets: INSTRUCTION_PRESETS.to_vec(),
        default: DEFAULT_PRESET,
    })
}
