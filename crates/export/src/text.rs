use crate::{ExportFormat, ExportedDocument};

/// Heading line placed above the summary in Markdown exports.
pub const MARKDOWN_HEADING: &str = "# Summary";

pub fn encode_text(summary: &str) -> ExportedDocument {
    ExportedDocument::new(ExportFormat::Text, summary.as_bytes().to_vec())
}

pub fn encode_markdown(summary: &str) -> ExportedDocument {
    let body = format!("{MARKDOWN_HEADING}\n\n{summary}");
    ExportedDocument::new(ExportFormat::Markdown, body.into_bytes())
}
