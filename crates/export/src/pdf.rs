use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::{ExportError, ExportFormat, ExportedDocument};

/// US Letter, in points.
pub const PAGE_WIDTH: i64 = 612;
pub const PAGE_HEIGHT: i64 = 792;
pub const LEFT_MARGIN: i64 = 50;
pub const TOP_MARGIN: i64 = 50;
pub const FONT_SIZE: i64 = 12;
/// Baseline-to-baseline distance, 1.2 × font size.
pub const LEADING: f32 = 14.4;

const FONT_NAME: &str = "F1";

/// Lay the summary out on a single Letter page, one text line per input line.
///
/// The text cursor starts near the top-left and only ever moves down; lines
/// past the bottom edge are still written to the same page.
pub fn encode_pdf(summary: &str) -> Result<ExportedDocument, ExportError> {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { FONT_NAME => font_id },
    });

    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![FONT_NAME.into(), FONT_SIZE.into()]),
        Operation::new("TL", vec![Object::Real(LEADING.into())]),
        Operation::new("Td", vec![LEFT_MARGIN.into(), (PAGE_HEIGHT - TOP_MARGIN).into()]),
    ];
    for line in summary.split('\n') {
        operations.push(Operation::new("Tj", vec![Object::string_literal(win_ansi(line))]));
        operations.push(Operation::new("T*", vec![]));
    }
    operations.push(Operation::new("ET", vec![]));

    let content = Content { operations }
        .encode()
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, content));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    Ok(ExportedDocument::new(ExportFormat::Pdf, bytes))
}

/// Map a line to single-byte WinAnsi codes; characters the encoding lacks become `?`.
fn win_ansi(line: &str) -> Vec<u8> {
    line.chars()
        .map(|c| match u32::from(c) {
            // tabs and other controls have no glyph in Helvetica
            0x00..=0x1f | 0x7f..=0x9f => b' ',
            code @ 0x20..=0x7e => code as u8,
            code @ 0xa0..=0xff => code as u8,
            _ => win_ansi_extra(c).unwrap_or(b'?'),
        })
        .collect()
}

/// The 0x80..=0x9F block, where WinAnsi departs from Latin-1.
fn win_ansi_extra(c: char) -> Option<u8> {
    let code = match c {
        '\u{20ac}' => 0x80, // €
        '\u{201a}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201e}' => 0x84,
        '\u{2026}' => 0x85, // …
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02c6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8a,
        '\u{2039}' => 0x8b,
        '\u{0152}' => 0x8c,
        '\u{017d}' => 0x8e,
        '\u{2018}' => 0x91, // ‘
        '\u{2019}' => 0x92, // ’
        '\u{201c}' => 0x93, // “
        '\u{201d}' => 0x94, // ”
        '\u{2022}' => 0x95, // •
        '\u{2013}' => 0x96, // –
        '\u{2014}' => 0x97, // —
        '\u{02dc}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9a,
        '\u{203a}' => 0x9b,
        '\u{0153}' => 0x9c,
        '\u{017e}' => 0x9e,
        '\u{0178}' => 0x9f,
        _ => return None,
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(bytes: &[u8]) -> Document {
        Document::load_mem(bytes).unwrap()
    }

    #[test]
    fn starts_with_pdf_header() {
        let doc = encode_pdf("hello").unwrap();
        assert!(doc.bytes.starts_with(b"%PDF-1.4"));
    }

    #[test]
    fn single_letter_page() {
        let doc = load(&encode_pdf("Agenda\nBudget\nNext steps").unwrap().bytes);
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 1);
        let text = doc.extract_text(&[1]).unwrap();
        for line in ["Agenda", "Budget", "Next steps"] {
            assert!(text.contains(line), "missing {line:?} in {text:?}");
        }
    }

    #[test]
    fn one_show_text_per_line_in_order() {
        let pdf = load(&encode_pdf("first\n\nthird").unwrap().bytes);
        let page_id = pdf.get_pages()[&1];
        let content = Content::decode(&pdf.get_page_content(page_id).unwrap()).unwrap();
        let shown: Vec<Vec<u8>> = content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .map(|op| op.operands[0].as_str().unwrap().to_vec())
            .collect();
        assert_eq!(shown, vec![b"first".to_vec(), Vec::new(), b"third".to_vec()]);

        let cursor_moves = content.operations.iter().filter(|op| op.operator == "Td").count();
        assert_eq!(cursor_moves, 1);
    }

    #[test]
    fn overflow_stays_on_one_page() {
        let summary = (0..500).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        let doc = load(&encode_pdf(&summary).unwrap().bytes);
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn empty_summary_is_a_valid_document() {
        let doc = encode_pdf("").unwrap();
        assert!(!doc.bytes.is_empty());
        assert_eq!(load(&doc.bytes).get_pages().len(), 1);
    }

    #[test]
    fn output_is_deterministic() {
        let summary = "Same input\nsame bytes";
        assert_eq!(encode_pdf(summary).unwrap().bytes, encode_pdf(summary).unwrap().bytes);
    }

    #[test]
    fn non_latin_characters_are_replaced() {
        assert_eq!(win_ansi("café 🎉"), b"caf\xe9 ?".to_vec());
        assert_eq!(win_ansi("a\tb"), b"a b".to_vec());
    }

    #[test]
    fn typographic_punctuation_uses_win_ansi_codes() {
        assert_eq!(
            win_ansi("\u{2022} Ship it\u{2019}s \u{201c}done\u{201d} \u{2013} \u{20ac}5"),
            b"\x95 Ship it\x92s \x93done\x94 \x96 \x805".to_vec()
        );
        assert_eq!(win_ansi("a\u{2014}b\u{2026}"), b"a\x97b\x85".to_vec());
        assert_eq!(win_ansi("\u{2018}x\u{2122}"), b"\x91x\x99".to_vec());
    }

    #[test]
    fn parentheses_survive_encoding() {
        let doc = load(&encode_pdf("budget (draft) \\ final").unwrap().bytes);
        assert!(doc.extract_text(&[1]).unwrap().contains("budget (draft)"));
    }
}
