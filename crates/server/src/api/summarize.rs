use std::sync::Arc;

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use recap_core::{
    assemble_text, effective_instruction, guess_mime_type, history_label, merge_instructions,
    require_text, HistoryEntry, UploadedFile, ACCEPTED_EXTENSIONS,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::{extraction_error, join_error, llm_error, recap_error, ApiError};
use crate::state::AppState;

// ── Request/Response types ────────────────────────

/// Fields of a `POST /summarize` form, files in upload order.
#[derive(Debug, Default)]
struct SummarizeForm {
    files: Vec<UploadedFile>,
    manual_text: String,
    instructions: Vec<String>,
    custom_instruction: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SummarizeResponse {
    /// The history entry that was appended.
    #[schema(value_type = Object)]
    pub entry: HistoryEntry,
    /// Instruction actually sent to the model.
    pub instruction: String,
    pub summary: String,
}

fn multipart_error(e: MultipartError) -> ApiError {
    (StatusCode::BAD_REQUEST, format!("Multipart error: {e}"))
}

async fn read_form(mut multipart: Multipart) -> Result<SummarizeForm, ApiError> {
    let mut form = SummarizeForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "files" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let mime_type = field
                    .content_type()
                    .map(str::to_string)
                    .unwrap_or_else(|| guess_mime_type(&file_name).to_string());
                let bytes = field.bytes().await.map_err(multipart_error)?;
                // empty file input
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                form.files.push(UploadedFile::new(file_name, mime_type, bytes.to_vec()));
            }
            "manual_text" => form.manual_text = field.text().await.map_err(multipart_error)?,
            "instructions" => {
                let instruction = field.text().await.map_err(multipart_error)?;
                if !instruction.is_empty() {
                    form.instructions.push(instruction);
                }
            }
            "custom_instruction" => {
                form.custom_instruction = Some(field.text().await.map_err(multipart_error)?);
            }
            other => debug!("Ignoring multipart field '{}'", other),
        }
    }

    Ok(form)
}

fn check_accepted(file: &UploadedFile) -> Result<(), ApiError> {
    match file.extension() {
        Some(ext) if ACCEPTED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err((
            StatusCode::BAD_REQUEST,
            format!(
                "Unsupported file type: '{}' (accepted: {})",
                file.name,
                ACCEPTED_EXTENSIONS.join(", ")
            ),
        )),
    }
}

// ── POST /summarize ───────────────────────────────

/// Summarize uploaded files and pasted text
///
/// Accepts multipart/form-data with repeated `files` parts, `manual_text`,
/// repeated `instructions`, and `custom_instruction`. Files are extracted in
/// upload order; the summary is appended to the session history only when
/// the model call succeeds.
#[utoipa::path(
    post,
    path = "/summarize",
    tag = "Summaries",
    request_body(content_type = "multipart/form-data", description = "Files, pasted text, and instructions"),
    responses(
        (status = 200, description = "Summary created", body = SummarizeResponse),
        (status = 400, description = "Unsupported file, undecodable content, or no text", body = String),
        (status = 502, description = "LLM request failed", body = String),
        (status = 503, description = "No LLM provider configured", body = String)
    )
)]
pub async fn summarize(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<SummarizeResponse>, ApiError> {
    let form = read_form(multipart).await?;
    for file in &form.files {
        check_accepted(file)?;
    }

    let file_count = form.files.len();
    let extractor = state.extractor.clone();
    let files = form.files;
    let extracted = tokio::task::spawn_blocking(move || extractor.extract_all(&files))
        .await
        .map_err(join_error)?
        .map_err(extraction_error)?;

    let text = assemble_text(&extracted, &form.manual_text);
    require_text(&text).map_err(recap_error)?;

    let summarizer = state.summarizer.as_ref().ok_or((
        StatusCode::SERVICE_UNAVAILABLE,
        "LLM provider not configured".to_string(),
    ))?;

    let merged = merge_instructions(&form.instructions, form.custom_instruction.as_deref());
    let instruction = effective_instruction(&merged).to_string();

    info!(
        "Summarizing {} files + {} chars of manual text ({} chars total)",
        file_count,
        form.manual_text.trim().chars().count(),
        text.chars().count()
    );

    let summary = summarizer
        .summarize(&text, &instruction)
        .await
        .map_err(|e| {
            warn!("Summarization failed: {}", e);
            llm_error(e)
        })?;

    let entry = state
        .history
        .write()
        .await
        .append(history_label(&merged), summary.clone())
        .clone();

    Ok(Json(SummarizeResponse {
        entry,
        instruction,
        summary,
    }))
}
