use std::io::Cursor;

use docx_rs::{BreakType, Docx, Paragraph, Run, Style, StyleType};

use crate::{ExportError, ExportFormat, ExportedDocument};

/// Title paragraph text of every DOCX export.
pub const DOCX_HEADING: &str = "Meeting Summary";

const TITLE_STYLE: &str = "Title";

/// A title paragraph followed by a single body paragraph holding the summary.
///
/// Newlines become line breaks inside the body paragraph, so blank lines
/// survive as consecutive breaks.
pub fn encode_docx(summary: &str) -> Result<ExportedDocument, ExportError> {
    let title_style = Style::new(TITLE_STYLE, StyleType::Paragraph)
        .name(TITLE_STYLE)
        .size(56);

    let heading = Paragraph::new()
        .style(TITLE_STYLE)
        .add_run(Run::new().add_text(DOCX_HEADING));

    let mut body = Run::new();
    for (i, line) in summary.split('\n').enumerate() {
        if i > 0 {
            body = body.add_break(BreakType::TextWrapping);
        }
        if !line.is_empty() {
            body = body.add_text(line);
        }
    }

    let mut buf = Cursor::new(Vec::new());
    Docx::new()
        .add_style(title_style)
        .add_paragraph(heading)
        .add_paragraph(Paragraph::new().add_run(body))
        .build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;

    Ok(ExportedDocument::new(ExportFormat::Docx, buf.into_inner()))
}

#[cfg(test)]
mod tests {
    use docx_rs::{read_docx, DocumentChild};

    use super::*;

    fn paragraph_count(bytes: &[u8]) -> usize {
        let docx = read_docx(bytes).unwrap();
        docx.document
            .children
            .iter()
            .filter(|c| matches!(c, DocumentChild::Paragraph(_)))
            .count()
    }

    #[test]
    fn is_a_zip_container() {
        let doc = encode_docx("hello").unwrap();
        assert_eq!(&doc.bytes[..2], b"PK");
    }

    #[test]
    fn heading_then_one_body_paragraph() {
        let doc = encode_docx("Attendees: Ana, Bo\n\nDecisions: ship it").unwrap();
        assert_eq!(paragraph_count(&doc.bytes), 2);

        let json = read_docx(&doc.bytes).unwrap().json();
        let heading = json.find(DOCX_HEADING).unwrap();
        let first = json.find("Attendees: Ana, Bo").unwrap();
        let second = json.find("Decisions: ship it").unwrap();
        assert!(heading < first && first < second);
    }

    #[test]
    fn empty_summary_is_a_valid_document() {
        let doc = encode_docx("").unwrap();
        assert_eq!(paragraph_count(&doc.bytes), 2);
        assert!(read_docx(&doc.bytes).unwrap().json().contains(DOCX_HEADING));
    }

    #[test]
    fn markup_characters_are_escaped() {
        let doc = encode_docx("R&D <budget> \"approved\"").unwrap();
        let json = read_docx(&doc.bytes).unwrap().json();
        assert!(json.contains("R&D <budget>"));
    }
}
