use lopdf::Document;
use tracing::{debug, warn};

use super::{DecodeError, FileKind};

/// Extract the text layer of every page, in page order, joined by `\n`.
///
/// A page whose text cannot be extracted contributes an empty string; only a
/// byte stream that does not load as a PDF at all is an error.
pub fn extract_pdf(bytes: &[u8]) -> Result<String, DecodeError> {
    let doc = Document::load_mem(bytes).map_err(|e| DecodeError::new(FileKind::Pdf, e.to_string()))?;

    let pages = doc.get_pages();
    debug!("PDF loaded: {} pages", pages.len());

    let texts: Vec<String> = pages
        .keys()
        .map(|&page_number| match doc.extract_text(&[page_number]) {
            // lopdf terminates each page's text with '\n'
            Ok(mut text) => {
                if text.ends_with('\n') {
                    text.pop();
                }
                text
            }
            Err(e) => {
                warn!("PDF page {} has no extractable text: {}", page_number, e);
                String::new()
            }
        })
        .collect();

    Ok(texts.join("\n"))
}
