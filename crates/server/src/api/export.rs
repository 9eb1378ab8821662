use axum::body::Body;
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::Json;
use recap_export::{encode_document, ExportFormat, ExportedDocument};
use serde::Deserialize;

use super::{export_error, join_error, ApiError};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct ExportRequest {
    pub summary: String,
}

pub(crate) fn parse_format(format: &str) -> Result<ExportFormat, ApiError> {
    format.parse::<ExportFormat>().map_err(export_error)
}

/// Encode off the async runtime; DOCX and PDF serialization is CPU-bound.
pub(crate) async fn encode(format: ExportFormat, summary: String) -> Result<ExportedDocument, ApiError> {
    tokio::task::spawn_blocking(move || encode_document(format, &summary))
        .await
        .map_err(join_error)?
        .map_err(export_error)
}

/// Wrap an encoded document as an attachment download.
pub(crate) fn download_response(doc: ExportedDocument) -> Result<Response, ApiError> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, doc.content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", doc.file_name),
        )
        .header(header::CONTENT_LENGTH, doc.bytes.len().to_string())
        .body(Body::from(doc.bytes))
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

// ── POST /export/{format} ─────────────────────────

/// Download a summary as txt, md, docx, or pdf
#[utoipa::path(
    post,
    path = "/export/{format}",
    tag = "Export",
    params(("format" = String, Path, description = "txt, md, docx, or pdf")),
    request_body = ExportRequest,
    responses(
        (status = 200, description = "Encoded document as an attachment"),
        (status = 400, description = "Unknown format", body = String)
    )
)]
pub async fn export(
    Path(format): Path<String>,
    Json(req): Json<ExportRequest>,
) -> Result<Response, ApiError> {
    let format = parse_format(&format)?;
    let doc = encode(format, req.summary).await?;
    download_response(doc)
}
