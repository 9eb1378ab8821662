mod ocr;
mod pdf;
mod txt;

use std::fmt;

use recap_core::{OcrConfig, UploadedFile};
use thiserror::Error;
use tracing::info;

pub use ocr::{OcrEngine, TesseractCli};

/// Raw bytes could not be parsed as the format the dispatch picked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to decode {kind} content: {detail}")]
pub struct DecodeError {
    pub kind: FileKind,
    pub detail: String,
}

impl DecodeError {
    pub fn new(kind: FileKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("OCR failed: {0}")]
    Ocr(String),
}

/// How an uploaded file is turned into text.
///
/// Derived once per file: name suffix decides text and PDF, the declared
/// MIME type decides images, and everything else is unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Text,
    Pdf,
    Image,
    Unsupported,
}

impl FileKind {
    pub fn detect(file_name: &str, declared_mime_type: &str) -> Self {
        if file_name.ends_with(".txt") {
            FileKind::Text
        } else if file_name.ends_with(".pdf") {
            FileKind::Pdf
        } else if declared_mime_type.starts_with("image/") {
            FileKind::Image
        } else {
            FileKind::Unsupported
        }
    }

    pub fn of(file: &UploadedFile) -> Self {
        Self::detect(&file.name, &file.mime_type)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Text => "text",
            FileKind::Pdf => "pdf",
            FileKind::Image => "image",
            FileKind::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Converts uploaded files into plain text.
pub struct TextExtractor {
    ocr: Box<dyn OcrEngine>,
}

impl TextExtractor {
    pub fn new(ocr: Box<dyn OcrEngine>) -> Self {
        Self { ocr }
    }

    pub fn from_config(config: &OcrConfig) -> Self {
        Self::new(Box::new(TesseractCli::from_config(config)))
    }

    pub fn extract(&self, file: &UploadedFile) -> Result<String, ExtractionError> {
        self.extract_text(&file.name, &file.mime_type, &file.bytes)
    }

    pub fn extract_text(
        &self,
        file_name: &str,
        declared_mime_type: &str,
        raw_bytes: &[u8],
    ) -> Result<String, ExtractionError> {
        let kind = FileKind::detect(file_name, declared_mime_type);
        let text = match kind {
            FileKind::Text => txt::extract_txt(raw_bytes)?,
            FileKind::Pdf => pdf::extract_pdf(raw_bytes)?,
            FileKind::Image => {
                let image = ocr::decode_image(raw_bytes)?;
                self.ocr.recognize(&image)?
            }
            FileKind::Unsupported => String::new(),
        };

        info!(
            "Extracted '{}' (kind={}, mime={}): {} bytes -> {} chars",
            file_name,
            kind,
            declared_mime_type,
            raw_bytes.len(),
            text.chars().count(),
        );
        Ok(text)
    }

    /// Extract every file in the order given, stopping at the first failure.
    pub fn extract_all(&self, files: &[UploadedFile]) -> Result<Vec<String>, ExtractionError> {
        files.iter().map(|file| self.extract(file)).collect()
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::from_config(&OcrConfig::default())
    }
}

/// Extract text from one file using the default tesseract engine.
pub fn extract_text(
    file_name: &str,
    declared_mime_type: &str,
    raw_bytes: &[u8],
) -> Result<String, ExtractionError> {
    TextExtractor::default().extract_text(file_name, declared_mime_type, raw_bytes)
}
