//! PDF emission.
//!
//! Turns layout pages into a PDF document: one content stream per page,
//! Helvetica Type1 font resources, text placed with BT/Tf/Td/Tj operators
//! on a Letter-sized media box.

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, StringFormat, dictionary};

use super::ReportError;
use super::layout::{LEFT_MARGIN, LineKind, Page};

const PAGE_WIDTH_PT: f32 = 612.0;
const PAGE_HEIGHT_PT: f32 = 792.0;

const FONT_NORMAL: &str = "F1";
const FONT_BOLD: &str = "F2";

fn font_for(kind: LineKind) -> (&'static str, f32) {
    match kind {
        LineKind::OptionHeader => (FONT_BOLD, 14.0),
        LineKind::FrameHeader => (FONT_BOLD, 12.0),
        LineKind::GroupHeader => (FONT_BOLD, 10.0),
        LineKind::Field | LineKind::Gap => (FONT_NORMAL, 10.0),
    }
}

/// Standard-font strings must be single-byte encoded. Latin-1 code points
/// map straight through under WinAnsiEncoding; a few typographic characters
/// have dedicated positions; everything else degrades to '?'.
fn win_ansi_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            code @ 0x00..=0x7F => code as u8,
            code @ 0xA0..=0xFF => code as u8,
            0x20AC => 0x80, // €
            0x201E => 0x84, // „
            0x201C => 0x93, // "
            0x201D => 0x94, // "
            0x2013 => 0x96, // –
            0x2014 => 0x97, // —
            _ => b'?',
        })
        .collect()
}

fn font_resources() -> lopdf::Dictionary {
    dictionary! {
        "Font" => dictionary! {
            FONT_NORMAL => dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => "Helvetica",
                "Encoding" => "WinAnsiEncoding",
            },
            FONT_BOLD => dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => "Helvetica-Bold",
                "Encoding" => "WinAnsiEncoding",
            },
        },
    }
}

/// Builds the PDF document from layout pages.
///
/// # Errors
///
/// Returns an error when a page's content stream cannot be encoded.
pub fn render(pages: &[Page]) -> Result<Document, ReportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids: Vec<Object> = Vec::new();
    for page in pages {
        let mut operations: Vec<Operation> = Vec::new();
        for placed in &page.lines {
            let (font, size) = font_for(placed.line.kind);
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec![font.into(), size.into()]));
            operations.push(Operation::new(
                "Td",
                vec![(LEFT_MARGIN + placed.line.indent).into(), placed.y.into()],
            ));
            operations.push(Operation::new(
                "Tj",
                vec![Object::String(
                    win_ansi_bytes(&placed.line.text),
                    StringFormat::Literal,
                )],
            ));
            operations.push(Operation::new("ET", vec![]));
        }

        let content = Content { operations };
        let stream_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Resources" => font_resources(),
            "MediaBox" => vec![
                0.into(),
                0.into(),
                PAGE_WIDTH_PT.into(),
                PAGE_HEIGHT_PT.into(),
            ],
            "Contents" => stream_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog_id);
    Ok(doc)
}

/// Compresses and writes the document to disk.
///
/// # Errors
///
/// Returns an error when the file cannot be written.
pub fn save(doc: &mut Document, path: &Path) -> Result<(), ReportError> {
    doc.compress();
    doc.save(path).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source: lopdf::Error::IO(source),
    })?;
    Ok(())
}
