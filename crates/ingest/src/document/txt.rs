use super::{DecodeError, FileKind};

/// Decode the bytes as UTF-8 and return them untouched.
pub fn extract_txt(bytes: &[u8]) -> Result<String, DecodeError> {
    String::from_utf8(bytes.to_vec()).map_err(|e| DecodeError::new(FileKind::Text, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_simple_text() {
        let text = extract_txt(b"hello\nworld").unwrap();
        assert_eq!(text, "hello\nworld");
    }

    #[test]
    fn extract_utf8_text() {
        let content = "Ünïcödé text with émojis 🎉".as_bytes();
        assert_eq!(extract_txt(content).unwrap(), "Ünïcödé text with émojis 🎉");
    }

    #[test]
    fn extract_empty_text() {
        assert_eq!(extract_txt(b"").unwrap(), "");
    }

    #[test]
    fn keeps_whitespace() {
        assert_eq!(extract_txt(b"  \n  Hello  \n  ").unwrap(), "  \n  Hello  \n  ");
    }

    #[test]
    fn keeps_byte_order_mark() {
        assert_eq!(extract_txt(b"\xef\xbb\xbfagenda").unwrap(), "\u{feff}agenda");
    }

    #[test]
    fn invalid_utf8_fails() {
        let err = extract_txt(&[b'o', b'k', 0xff, 0xfe]).unwrap_err();
        assert_eq!(err.kind, FileKind::Text);
        assert!(err.detail.contains("utf-8"));
    }
}
