use serde::{Deserialize, Serialize};

/// A file as received from an upload: name, declared MIME type, raw bytes.
///
/// The declared MIME type comes from the upload mechanism and is not checked
/// against the file name suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub mime_type: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Lower-cased extension without the dot, if any.
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_lowercase())
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Extensions the upload form accepts.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["txt", "pdf", "png", "jpg", "jpeg"];

/// Best-effort MIME type for a file name, used when the caller has none.
pub fn guess_mime_type(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "txt" => "text/plain",
        "md" => "text/markdown",
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased() {
        let file = UploadedFile::new("Notes.PDF", "application/pdf", Vec::new());
        assert_eq!(file.extension().as_deref(), Some("pdf"));
    }

    #[test]
    fn no_extension() {
        assert_eq!(UploadedFile::new("README", "text/plain", b"x".to_vec()).extension(), None);
        assert_eq!(UploadedFile::new(".env", "text/plain", b"x".to_vec()).extension(), None);
    }

    #[test]
    fn guesses_common_types() {
        assert_eq!(guess_mime_type("scan.JPG"), "image/jpeg");
        assert_eq!(guess_mime_type("minutes.txt"), "text/plain");
        assert_eq!(guess_mime_type("deck.pdf"), "application/pdf");
        assert_eq!(guess_mime_type("archive.tar.gz"), "application/octet-stream");
        assert_eq!(guess_mime_type("noext"), "application/octet-stream");
    }
}
