//! Minimal paginated text layout on top of lopdf.
//!
//! Lines are word-wrapped by an average glyph width estimate for the
//! standard Helvetica faces, so no font metrics need to be embedded.

use crate::domain::error::{AppError, Result};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

const PAGE_WIDTH: i64 = 612;
const PAGE_HEIGHT: i64 = 792;
const MARGIN: i64 = 72;
const LINE_SPACING: f32 = 1.2;
const AVG_GLYPH_WIDTH: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Title,
    Heading,
    Normal,
}

impl TextStyle {
    fn font_resource(&self) -> &'static str {
        match self {
            TextStyle::Title | TextStyle::Heading => "F2",
            TextStyle::Normal => "F1",
        }
    }

    fn size(&self) -> f32 {
        match self {
            TextStyle::Title => 16.0,
            TextStyle::Heading => 14.0,
            TextStyle::Normal => 10.0,
        }
    }

    fn space_after(&self) -> f32 {
        match self {
            TextStyle::Title => 20.0,
            TextStyle::Heading => 10.0,
            TextStyle::Normal => 5.0,
        }
    }
}

#[derive(Debug, Clone)]
enum Block {
    Paragraph { style: TextStyle, text: String },
    Spacer(f32),
}

/// Accumulates paragraphs, then lays them out onto US Letter pages.
#[derive(Debug, Default)]
pub struct PdfReportBuilder {
    blocks: Vec<Block>,
}

impl PdfReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paragraph(&mut self, style: TextStyle, text: impl Into<String>) -> &mut Self {
        self.blocks.push(Block::Paragraph {
            style,
            text: text.into(),
        });
        self
    }

    pub fn spacer(&mut self, points: f32) -> &mut Self {
        self.blocks.push(Block::Spacer(points));
        self
    }

    fn layout(&self) -> Vec<Vec<Operation>> {
        let top = (PAGE_HEIGHT - MARGIN) as f32;
        let bottom = MARGIN as f32;
        let usable_width = (PAGE_WIDTH - 2 * MARGIN) as f32;

        let mut pages: Vec<Vec<Operation>> = vec![Vec::new()];
        let mut y = top;

        for block in &self.blocks {
            match block {
                Block::Spacer(points) => y -= points,
                Block::Paragraph { style, text } => {
                    let size = style.size();
                    let leading = size * LINE_SPACING;
                    let max_chars = (usable_width / (size * AVG_GLYPH_WIDTH)).floor() as usize;

                    for line in wrap_text(text, max_chars.max(1)) {
                        if y - leading < bottom {
                            pages.push(Vec::new());
                            y = top;
                        }
                        y -= leading;
                        if let Some(ops) = pages.last_mut() {
                            ops.extend(text_operations(*style, MARGIN as f32, y, &line));
                        }
                    }
                    y -= style.space_after();
                }
            }
        }

        pages
    }

    /// Serialize the report to PDF bytes.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let bold_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => regular_id,
                "F2" => bold_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for operations in self.layout() {
            let content = Content { operations };
            let encoded = content
                .encode()
                .map_err(|e| AppError::ExportError(format!("Failed to encode PDF page: {}", e)))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
            let page_id: ObjectId = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let page_count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count,
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(PAGE_WIDTH),
                    Object::Integer(PAGE_HEIGHT),
                ],
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| AppError::ExportError(format!("Failed to write PDF: {}", e)))?;
        Ok(bytes)
    }
}

fn text_operations(style: TextStyle, x: f32, y: f32, line: &str) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![style.font_resource().into(), Object::Real(style.size())],
        ),
        Operation::new("Td", vec![Object::Real(x), Object::Real(y)]),
        Operation::new("Tj", vec![Object::string_literal(encode_win_ansi(line))]),
        Operation::new("ET", vec![]),
    ]
}

/// Characters outside Windows-1252 become numeric character references.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    let (bytes, _, _) = encoding_rs::WINDOWS_1252.encode(text);
    bytes.into_owned()
}

/// Greedy word wrap by character count. Explicit newlines are kept and
/// words longer than a line are split.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for raw_line in text.lines() {
        let mut current = String::new();
        let mut current_len = 0usize;

        for word in raw_line.split_whitespace() {
            let mut chars: Vec<char> = word.chars().collect();

            while chars.len() > max_chars {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = chars.split_off(max_chars);
                lines.push(chars.into_iter().collect());
                chars = rest;
            }

            let word_len = chars.len();
            let needed = if current_len == 0 { word_len } else { current_len + 1 + word_len };
            if needed > max_chars && current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.extend(chars);
            current_len += word_len;
        }

        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_respects_width() {
        let lines = wrap_text("one two three four five", 9);
        assert_eq!(lines, vec!["one two", "three", "four five"]);
    }

    #[test]
    fn test_wrap_keeps_explicit_newlines() {
        assert_eq!(wrap_text("a\nb", 10), vec!["a", "b"]);
        assert_eq!(wrap_text("", 10), vec![""]);
    }

    #[test]
    fn test_wrap_splits_long_words() {
        assert_eq!(wrap_text("abcdefgh xy", 3), vec!["abc", "def", "gh", "xy"]);
    }

    #[test]
    fn test_build_produces_loadable_pdf() {
        let mut builder = PdfReportBuilder::new();
        builder
            .paragraph(TextStyle::Title, "Report")
            .spacer(18.0)
            .paragraph(TextStyle::Normal, "Body text");

        let bytes = builder.build().unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
        let text = doc.extract_text(&[1]).unwrap();
        assert!(text.contains("Report"));
        assert!(text.contains("Body text"));
    }

    #[test]
    fn test_long_content_spans_pages() {
        let mut builder = PdfReportBuilder::new();
        for i in 0..200 {
            builder.paragraph(TextStyle::Normal, format!("Line {}", i));
        }

        let bytes = builder.build().unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert!(doc.get_pages().len() > 1);
    }
}
