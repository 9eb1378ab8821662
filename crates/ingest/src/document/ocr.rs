use std::path::Path;
use std::process::Command;

use image::{DynamicImage, ImageFormat};
use recap_core::OcrConfig;
use tracing::{debug, warn};

use super::{DecodeError, ExtractionError, FileKind};

/// Recognizes text in a decoded raster image.
pub trait OcrEngine: Send + Sync {
    /// Return the recognized text; an image without readable glyphs yields `""`.
    fn recognize(&self, image: &DynamicImage) -> Result<String, ExtractionError>;
}

/// Decode raw upload bytes into an image, guessing the format from content.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    image::load_from_memory(bytes).map_err(|e| DecodeError::new(FileKind::Image, e.to_string()))
}

/// OCR through the `tesseract` command-line tool.
#[derive(Debug, Clone)]
pub struct TesseractCli {
    command: String,
    language: String,
}

impl TesseractCli {
    pub fn new(command: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            language: language.into(),
        }
    }

    pub fn from_config(config: &OcrConfig) -> Self {
        Self::new(config.command.clone(), config.language.clone())
    }

    fn run(&self, image_path: &Path) -> Result<String, ExtractionError> {
        let output = Command::new(&self.command)
            .arg(image_path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .output()
            .map_err(|e| ExtractionError::Ocr(format!("failed to run {}: {e}", self.command)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractionError::Ocr(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }
        if !output.stderr.is_empty() {
            debug!("{} stderr: {}", self.command, String::from_utf8_lossy(&output.stderr).trim());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl OcrEngine for TesseractCli {
    fn recognize(&self, image: &DynamicImage) -> Result<String, ExtractionError> {
        let temp_path = std::env::temp_dir().join(format!("recap_ocr_{}.png", uuid::Uuid::new_v4()));
        image
            .save_with_format(&temp_path, ImageFormat::Png)
            .map_err(|e| ExtractionError::Ocr(format!("failed to write temp image: {e}")))?;

        let result = self.run(&temp_path);

        if let Err(e) = std::fs::remove_file(&temp_path) {
            warn!("failed to remove OCR temp file {}: {}", temp_path.display(), e);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn decodes_png_and_jpeg() {
        let image = DynamicImage::new_rgb8(8, 4);
        for format in [ImageFormat::Png, ImageFormat::Jpeg] {
            let mut out = Cursor::new(Vec::new());
            image.write_to(&mut out, format).unwrap();
            let decoded = decode_image(out.get_ref()).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (8, 4));
        }
    }

    #[test]
    fn rejects_non_image_bytes() {
        let err = decode_image(b"%PDF-1.4 not an image").unwrap_err();
        assert_eq!(err.kind, FileKind::Image);
    }

    #[test]
    fn missing_binary_is_an_ocr_error() {
        let engine = TesseractCli::new("recap-no-such-ocr-binary", "eng");
        let err = engine.recognize(&DynamicImage::new_luma8(2, 2)).unwrap_err();
        match err {
            ExtractionError::Ocr(msg) => assert!(msg.contains("recap-no-such-ocr-binary")),
            other => panic!("expected OCR error, got {other:?}"),
        }
    }

    #[test]
    fn from_config_uses_configured_command() {
        let engine = TesseractCli::from_config(&OcrConfig {
            command: "/opt/tesseract/bin/tesseract".into(),
            language: "deu".into(),
        });
        assert_eq!(engine.command, "/opt/tesseract/bin/tesseract");
        assert_eq!(engine.language, "deu");
    }
}
