use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use recap_core::{history_label, HistoryEntry, RecapError};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::export::{download_response, encode, parse_format};
use super::{recap_error, ApiError};
use crate::state::AppState;

#[derive(Serialize, utoipa::ToSchema)]
pub struct HistoryResponse {
    /// Newest first.
    #[schema(value_type = Vec<Object>)]
    pub entries: Vec<HistoryEntry>,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct RecordSummaryRequest {
    #[serde(default)]
    pub instruction: String,
    pub summary: String,
}

/// List past summaries, newest first
#[utoipa::path(
    get,
    path = "/history",
    tag = "History",
    responses((status = 200, description = "Session history", body = HistoryResponse))
)]
pub async fn history_list(State(state): State<Arc<AppState>>) -> Json<HistoryResponse> {
    let history = state.history.read().await;
    Json(HistoryResponse {
        entries: history.iter_newest_first().cloned().collect(),
    })
}

/// One past summary by its 1-based number
#[utoipa::path(
    get,
    path = "/history/{number}",
    tag = "History",
    params(("number" = usize, Path, description = "1-based entry number")),
    responses(
        (status = 200, description = "History entry"),
        (status = 404, description = "No such entry", body = String)
    )
)]
pub async fn history_get(
    State(state): State<Arc<AppState>>,
    Path(number): Path<usize>,
) -> Result<Json<HistoryEntry>, ApiError> {
    let history = state.history.read().await;
    let entry = history.entry(number).map_err(recap_error)?;
    Ok(Json(entry.clone()))
}

/// Record an edited summary as a new history entry
///
/// Existing entries are never changed; an edit is appended like any other
/// summary. A blank instruction is recorded as the default-summary label.
#[utoipa::path(
    post,
    path = "/summaries",
    tag = "History",
    request_body = RecordSummaryRequest,
    responses(
        (status = 201, description = "Entry appended"),
        (status = 400, description = "Empty summary", body = String)
    )
)]
pub async fn record_summary(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RecordSummaryRequest>,
) -> Result<(StatusCode, Json<HistoryEntry>), ApiError> {
    if req.summary.trim().is_empty() {
        return Err(recap_error(RecapError::InvalidInput(
            "summary must not be empty".to_string(),
        )));
    }
    let entry = state
        .history
        .write()
        .await
        .append(history_label(req.instruction.trim()), req.summary)
        .clone();
    info!("Recorded edited summary as history entry {}", entry.number);
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Download a past summary as `summary_{number}.<ext>`
#[utoipa::path(
    get,
    path = "/history/{number}/export/{format}",
    tag = "Export",
    params(
        ("number" = usize, Path, description = "1-based entry number"),
        ("format" = String, Path, description = "txt, md, docx, or pdf")
    ),
    responses(
        (status = 200, description = "Encoded document as an attachment"),
        (status = 400, description = "Unknown format", body = String),
        (status = 404, description = "No such entry", body = String)
    )
)]
pub async fn history_export(
    State(state): State<Arc<AppState>>,
    Path((number, format)): Path<(usize, String)>,
) -> Result<Response, ApiError> {
    let format = parse_format(&format)?;
    let summary = {
        let history = state.history.read().await;
        history.entry(number).map_err(recap_error)?.summary.clone()
    };
    let doc = encode(format, summary)
        .await?
        .with_file_name(format!("summary_{}.{}", number, format.extension()));
    download_response(doc)
}
