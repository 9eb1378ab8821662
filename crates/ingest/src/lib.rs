pub mod document;

pub use image::DynamicImage;

pub use document::{
    extract_text, DecodeError, ExtractionError, FileKind, OcrEngine, TesseractCli, TextExtractor,
};
