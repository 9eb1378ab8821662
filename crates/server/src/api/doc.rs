//! OpenAPI documentation aggregator.
//!
//! Collects all `#[utoipa::path]`-annotated handlers and `ToSchema`-derived
//! types into a single OpenAPI document, served via Scalar UI at `/docs`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "recap API",
        version = "0.1.0",
        description = "Meeting-notes summarizer: extract text from uploads, summarize with an LLM, export as txt/md/docx/pdf.",
    ),
    tags(
        (name = "Health", description = "Server liveness and redacted configuration"),
        (name = "Summaries", description = "Instruction presets and summarization of uploads"),
        (name = "History", description = "Append-only session history of summaries"),
        (name = "Export", description = "Document downloads for summaries and history entries"),
    ),
    paths(
        // Health
        crate::api::health::health,
        crate::api::health::config,
        // Summaries
        crate::api::health::instructions,
        crate::api::summarize::summarize,
        // History
        crate::api::history::history_list,
        crate::api::history::history_get,
        crate::api::history::record_summary,
        // Export
        crate::api::export::export,
        crate::api::history::history_export,
    ),
    components(schemas(
        crate::api::health::HealthResponse,
        crate::api::health::InstructionsResponse,
        crate::api::summarize::SummarizeResponse,
        crate::api::history::HistoryResponse,
        crate::api::history::RecordSummaryRequest,
        crate::api::export::ExportRequest,
    ))
)]
pub struct ApiDoc;
