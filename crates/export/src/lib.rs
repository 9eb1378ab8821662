//! Summary export: turns a plain-text summary into a downloadable document.
//!
//! Every encoder is a pure function of its input. Text, Markdown and PDF
//! output is byte-identical across calls; none of them write timestamps.

mod docx;
mod pdf;
mod text;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

pub use docx::{encode_docx, DOCX_HEADING};
pub use pdf::{encode_pdf, FONT_SIZE, LEADING, LEFT_MARGIN, PAGE_HEIGHT, PAGE_WIDTH, TOP_MARGIN};
pub use text::{encode_markdown, encode_text, MARKDOWN_HEADING};

/// Failures of the underlying document serializers.
///
/// None of these are expected for valid UTF-8 input; they indicate a
/// library or environment defect.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),
    #[error("DOCX serialization failed: {0}")]
    Docx(String),
    #[error("PDF serialization failed: {0}")]
    Pdf(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Text,
    Markdown,
    Docx,
    Pdf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Text,
        ExportFormat::Markdown,
        ExportFormat::Docx,
        ExportFormat::Pdf,
    ];

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Text => "text/plain",
            ExportFormat::Markdown => "text/markdown",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Pdf => "application/pdf",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Markdown => "md",
            ExportFormat::Docx => "docx",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// Suggested download name, e.g. `summary.md`.
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Text => "summary.txt",
            ExportFormat::Markdown => "summary.md",
            ExportFormat::Docx => "summary.docx",
            ExportFormat::Pdf => "summary.pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(ExportFormat::Text),
            "md" | "markdown" => Ok(ExportFormat::Markdown),
            "docx" => Ok(ExportFormat::Docx),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Encoded bytes plus the labels a download needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub file_name: String,
}

impl ExportedDocument {
    pub(crate) fn new(format: ExportFormat, bytes: Vec<u8>) -> Self {
        Self {
            format,
            bytes,
            content_type: format.content_type(),
            file_name: format.file_name().to_string(),
        }
    }

    /// Replace the suggested file name, e.g. `summary_3.pdf` for history downloads.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }
}

/// Encode `summary` in the requested format.
pub fn encode_document(format: ExportFormat, summary: &str) -> Result<ExportedDocument, ExportError> {
    let doc = match format {
        ExportFormat::Text => encode_text(summary),
        ExportFormat::Markdown => encode_markdown(summary),
        ExportFormat::Docx => encode_docx(summary)?,
        ExportFormat::Pdf => encode_pdf(summary)?,
    };
    info!(
        "Exported summary as {} ({} chars -> {} bytes)",
        format,
        summary.chars().count(),
        doc.bytes.len()
    );
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_labels_per_format() {
        let expected = [
            (ExportFormat::Text, "summary.txt", "text/plain"),
            (ExportFormat::Markdown, "summary.md", "text/markdown"),
            (
                ExportFormat::Docx,
                "summary.docx",
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            ),
            (ExportFormat::Pdf, "summary.pdf", "application/pdf"),
        ];
        for (format, name, content_type) in expected {
            let doc = encode_document(format, "x").unwrap();
            assert_eq!(doc.file_name, name);
            assert_eq!(doc.content_type, content_type);
            assert_eq!(doc.format, format);
        }
    }

    #[test]
    fn parses_format_names() {
        assert_eq!("txt".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert_eq!("TEXT".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert_eq!("md".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert_eq!("markdown".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert_eq!("docx".parse::<ExportFormat>().unwrap(), ExportFormat::Docx);
        assert_eq!("pdf".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert!(matches!(
            "odt".parse::<ExportFormat>(),
            Err(ExportError::UnsupportedFormat(f)) if f == "odt"
        ));
    }

    #[test]
    fn empty_summary_exports_non_empty_except_plain_text() {
        for format in ExportFormat::ALL {
            let doc = encode_document(format, "").unwrap();
            if format == ExportFormat::Text {
                // plain text stays verbatim, so "" exports as zero bytes
                assert!(doc.bytes.is_empty(), "plain text of \"\" should be verbatim");
            } else {
                assert!(!doc.bytes.is_empty(), "{format} was empty");
            }
        }
    }

    #[test]
    fn history_file_name_override() {
        let doc = encode_document(ExportFormat::Pdf, "x")
            .unwrap()
            .with_file_name("summary_2.pdf");
        assert_eq!(doc.file_name, "summary_2.pdf");
        assert_eq!(doc.content_type, "application/pdf");
    }
}
