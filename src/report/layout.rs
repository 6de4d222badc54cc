//! Flattens the collected record into lines and splits them into pages.
//!
//! One section per option, one subsection per frame, one line per field;
//! nested fragments render as an indented "Details für ..." block. A
//! vertical cursor runs from the top offset downward and the page breaks
//! whenever it crosses the bottom margin — checked after every line, so a
//! section may span a page break mid-list.

use crate::data::record::{CollectedRecord, FieldValue, RecordFragment};
use crate::data::tree::SUB_FRAME_KEY_PREFIX;

/// Vertical cursor start, measured from the bottom-left page origin.
pub const TOP_Y: f32 = 750.0;
/// Cursor positions below this start a new page.
pub const BOTTOM_MARGIN: f32 = 50.0;
/// Left edge of unindented text.
pub const LEFT_MARGIN: f32 = 50.0;
/// Indent added per nesting level.
pub const NEST_INDENT: f32 = 20.0;

/// Rendered token for a checked checkbox.
pub const BOOL_TRUE: &str = "Ja";
/// Rendered token for an unchecked checkbox.
pub const BOOL_FALSE: &str = "Nein";

/// Style of a line; maps to font and size in the PDF layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Option section header.
    OptionHeader,
    /// Frame subsection header.
    FrameHeader,
    /// Nested fragment header.
    GroupHeader,
    /// Field line.
    Field,
    /// Vertical spacing between frames; nothing is drawn.
    Gap,
}

impl LineKind {
    /// Vertical space the line consumes.
    pub fn height(self) -> f32 {
        match self {
            LineKind::OptionHeader => 30.0,
            LineKind::FrameHeader | LineKind::GroupHeader | LineKind::Field => 20.0,
            LineKind::Gap => 10.0,
        }
    }
}

/// One line of output with its indentation.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub kind: LineKind,
    pub indent: f32,
    pub text: String,
}

impl Line {
    fn new(kind: LineKind, indent: f32, text: String) -> Self {
        Line { kind, indent, text }
    }

    fn gap() -> Self {
        Line::new(LineKind::Gap, 0.0, String::new())
    }
}

/// A line placed at a fixed vertical position on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub y: f32,
    pub line: Line,
}

/// One output page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

/// Flattens the record into output lines in completion order.
pub fn flatten(record: &CollectedRecord) -> Vec<Line> {
    let mut lines = Vec::new();
    for (option, frames) in record.iter() {
        lines.push(Line::new(
            LineKind::OptionHeader,
            0.0,
            format!("Option: {option}"),
        ));
        for (frame, fragment) in frames {
            lines.push(Line::new(
                LineKind::FrameHeader,
                0.0,
                format!("Frame: {frame}"),
            ));
            flatten_fragment(fragment, 0.0, &mut lines);
            lines.push(Line::gap());
        }
    }
    lines
}

fn flatten_fragment(fragment: &RecordFragment, indent: f32, lines: &mut Vec<Line>) {
    for (key, value) in fragment.iter() {
        match value {
            FieldValue::Group(sub) => {
                let label = key.strip_prefix(SUB_FRAME_KEY_PREFIX).unwrap_or(key);
                lines.push(Line::new(
                    LineKind::GroupHeader,
                    indent,
                    format!("Details für {label}"),
                ));
                flatten_fragment(sub, indent + NEST_INDENT, lines);
            }
            FieldValue::Bool(b) => {
                let token = if *b { BOOL_TRUE } else { BOOL_FALSE };
                lines.push(Line::new(LineKind::Field, indent, format!("{key}: {token}")));
            }
            FieldValue::Text(s) => {
                lines.push(Line::new(LineKind::Field, indent, format!("{key}: {s}")));
            }
        }
    }
}

/// Splits lines into pages with a vertical cursor.
///
/// Each drawn line is placed at the current cursor position before the
/// cursor drops by the line height; gaps only move the cursor. The margin
/// check runs after every line.
pub fn paginate(lines: &[Line]) -> Vec<Page> {
    let mut pages = vec![Page::default()];
    let mut y = TOP_Y;
    for line in lines {
        if line.kind != LineKind::Gap {
            pages
                .last_mut()
                .expect("at least one page")
                .lines
                .push(PlacedLine {
                    y,
                    line: line.clone(),
                });
        }
        y -= line.kind.height();
        if y < BOTTOM_MARGIN {
            pages.push(Page::default());
            y = TOP_Y;
        }
    }
    // A break after the very last line would leave a blank trailing page.
    if pages.len() > 1 && pages.last().is_some_and(|p| p.lines.is_empty()) {
        pages.pop();
    }
    pages
}
