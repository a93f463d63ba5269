//! PDF encoding of laid-out pages.
//!
//! Pages are written with the base-14 Type1 fonts (regular as `/F1`, bold as
//! `/F2`) under WinAnsi encoding. Layout coordinates have a top-left origin;
//! PDF user space has a bottom-left origin, so every `y` is flipped against
//! the page height here.

use crate::error::{Error, Result};
use crate::layout::{layout_document, DrawOp, LaidOutPage};
use crate::model::{Document, FontFamily, Metadata, Rgb};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Object, ObjectId, Stream, StringFormat};
use std::collections::HashMap;
use std::io::Write;

const PDF_VERSION: &str = "1.7";

/// Control-point distance for approximating a quarter circle with a cubic
/// Bézier curve.
const KAPPA: f32 = 0.552_284_8;

const REGULAR: &[u8] = b"F1";
const BOLD: &[u8] = b"F2";

/// Writes laid-out pages into a PDF blob.
#[derive(Debug, Clone, Copy)]
pub struct PdfWriter {
    compress: bool,
}

impl PdfWriter {
    /// Create a writer with compressed content streams.
    pub fn new() -> Self {
        Self { compress: true }
    }

    /// Enable or disable Flate compression of content streams.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Lay out and encode a composed document.
    pub fn write(&self, document: &Document) -> Result<Vec<u8>> {
        if document.is_empty() {
            return Err(Error::EmptyDocument);
        }
        self.write_pages(&layout_document(document), &document.metadata)
    }

    /// Encode already laid-out pages.
    ///
    /// The blob is assembled in memory and only returned once serialization
    /// has succeeded.
    pub fn write_pages(&self, pages: &[LaidOutPage], metadata: &Metadata) -> Result<Vec<u8>> {
        if pages.is_empty() {
            return Err(Error::EmptyDocument);
        }

        let mut doc = lopdf::Document::with_version(PDF_VERSION);
        let pages_id = doc.new_object_id();
        let mut resources: HashMap<FontFamily, ObjectId> = HashMap::new();
        let mut kids: Vec<Object> = Vec::with_capacity(pages.len());

        for page in pages {
            let resources_id = match resources.get(&page.font) {
                Some(id) => *id,
                None => {
                    let id = add_font_resources(&mut doc, page.font);
                    resources.insert(page.font, id);
                    id
                }
            };

            let content = Content {
                operations: page_operations(page),
            };
            let stream = self.content_stream(content.encode()?)?;
            let content_id = doc.add_object(stream);

            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    real(page.size.width()),
                    real(page.size.height()),
                ],
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
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

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(info_dictionary(metadata));
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        log::debug!(
            "encoded {} physical pages into {} bytes",
            pages.len(),
            bytes.len()
        );
        Ok(bytes)
    }

    fn content_stream(&self, content: Vec<u8>) -> Result<Stream> {
        if !self.compress {
            return Ok(Stream::new(Dictionary::new(), content));
        }

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(&content)
            .and_then(|_| encoder.finish())
            .map(|compressed| {
                Stream::new(dictionary! { "Filter" => "FlateDecode" }, compressed)
            })
            .map_err(|e| Error::Compression(e.to_string()))
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Lay out and encode a document with default settings.
pub fn to_pdf(document: &Document) -> Result<Vec<u8>> {
    PdfWriter::new().write(document)
}

fn add_font_resources(doc: &mut lopdf::Document, family: FontFamily) -> ObjectId {
    let regular = doc.add_object(font_dictionary(family.regular()));
    let bold = doc.add_object(font_dictionary(family.bold()));
    doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular,
            "F2" => bold,
        },
    })
}

fn font_dictionary(base_font: &str) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => Object::Name(base_font.as_bytes().to_vec()),
        "Encoding" => "WinAnsiEncoding",
    }
}

fn info_dictionary(metadata: &Metadata) -> Dictionary {
    let mut info = Dictionary::new();
    if let Some(ref title) = metadata.title {
        info.set("Title", text_string(title));
    }
    if let Some(ref author) = metadata.author {
        info.set("Author", text_string(author));
    }
    if let Some(ref subject) = metadata.subject {
        info.set("Subject", text_string(subject));
    }
    info.set("Producer", text_string(&metadata.producer));
    info.set("Creator", text_string(&metadata.producer));
    if let Some(created) = metadata.created {
        info.set(
            "CreationDate",
            Object::string_literal(created.format("D:%Y%m%d%H%M%SZ").to_string()),
        );
    }
    info
}

/// A PDF text string: literal for ASCII, UTF-16BE with byte order mark
/// otherwise.
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

fn real(value: f32) -> Object {
    value.into()
}

fn color_operands(color: Rgb) -> Vec<Object> {
    let (r, g, b) = color.components();
    vec![real(r), real(g), real(b)]
}

fn page_operations(page: &LaidOutPage) -> Vec<Operation> {
    let height = page.size.height();
    let mut ops = Vec::new();

    for op in &page.ops {
        match op {
            DrawOp::Rect {
                x,
                y,
                width,
                height: h,
                fill,
                stroke,
                line_width,
            } => {
                let paint = match (fill, stroke) {
                    (Some(_), Some(_)) => "B",
                    (Some(_), None) => "f",
                    (None, Some(_)) => "S",
                    (None, None) => continue,
                };
                ops.push(Operation::new("q", vec![]));
                if let Some(fill) = fill {
                    ops.push(Operation::new("rg", color_operands(*fill)));
                }
                if let Some(stroke) = stroke {
                    ops.push(Operation::new("RG", color_operands(*stroke)));
                    ops.push(Operation::new("w", vec![real(*line_width)]));
                }
                ops.push(Operation::new(
                    "re",
                    vec![real(*x), real(height - y - h), real(*width), real(*h)],
                ));
                ops.push(Operation::new(paint, vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                color,
                width,
            } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new("RG", color_operands(*color)));
                ops.push(Operation::new("w", vec![real(*width)]));
                ops.push(Operation::new("m", vec![real(*x1), real(height - y1)]));
                ops.push(Operation::new("l", vec![real(*x2), real(height - y2)]));
                ops.push(Operation::new("S", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
            DrawOp::Text {
                x,
                y,
                size,
                bold,
                color,
                text,
            } => {
                if text.is_empty() {
                    continue;
                }
                let font = if *bold { BOLD } else { REGULAR };
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new("rg", color_operands(*color)));
                ops.push(Operation::new(
                    "Tf",
                    vec![Object::Name(font.to_vec()), real(*size)],
                ));
                ops.push(Operation::new("Td", vec![real(*x), real(height - y)]));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::String(
                        encode_win_ansi(text),
                        StringFormat::Literal,
                    )],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
            DrawOp::Circle { cx, cy, r, fill } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new("rg", color_operands(*fill)));
                ops.extend(circle_path(*cx, height - cy, *r));
                ops.push(Operation::new("f", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
        }
    }

    ops
}

/// Closed circle path of four cubic Bézier segments, in PDF coordinates.
fn circle_path(cx: f32, cy: f32, r: f32) -> Vec<Operation> {
    let k = r * KAPPA;
    let curve = |points: [f32; 6]| Operation::new("c", points.iter().map(|v| real(*v)).collect());
    vec![
        Operation::new("m", vec![real(cx + r), real(cy)]),
        curve([cx + r, cy + k, cx + k, cy + r, cx, cy + r]),
        curve([cx - k, cy + r, cx - r, cy + k, cx - r, cy]),
        curve([cx - r, cy - k, cx - k, cy - r, cx, cy - r]),
        curve([cx + k, cy - r, cx + r, cy - k, cx + r, cy]),
        Operation::new("h", vec![]),
    ]
}

/// Encode text as WinAnsi (Windows-1252) bytes. Characters outside the
/// encoding become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    let code = c as u32;
    if (0x20..=0x7E).contains(&code) || (0xA0..=0xFF).contains(&code) {
        return code as u8;
    }
    match c {
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        '\t' => b' ',
        _ => b'?',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        DocumentKind, Frame, Node, PageKind, PageSize, Region, RegionRole, RenderedPage,
        TemplateVariant, TextStyle,
    };

    fn document(lines: usize) -> Document {
        let mut body = Region::new(RegionRole::Body, Frame::new(0.0, 0.0, 595.0, 842.0))
            .with_padding(40.0)
            .continuing();
        for i in 0..lines {
            body.push(Node::text(format!("Line {}", i), TextStyle::default()));
        }

        let mut metadata = Metadata::new(DocumentKind::Cv, TemplateVariant::Classic);
        metadata.title = Some("Zoë's CV".to_string());
        let mut doc = Document::new(metadata);
        doc.add_page(
            RenderedPage::new(PageKind::Primary, PageSize::A4, FontFamily::TimesRoman, Rgb::WHITE)
                .with_region(body),
        );
        doc
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(encode_win_ansi("Café"), vec![b'C', b'a', b'f', 0xE9]);
        assert_eq!(encode_win_ansi("• – ’"), vec![0x95, b' ', 0x96, b' ', 0x92]);
        assert_eq!(encode_win_ansi("日本"), b"??".to_vec());
    }

    #[test]
    fn test_write_single_page() {
        let bytes = to_pdf(&document(3)).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));

        let reopened = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(reopened.get_pages().len(), 1);
    }

    #[test]
    fn test_overflow_adds_physical_pages() {
        let bytes = PdfWriter::new()
            .with_compression(false)
            .write(&document(120))
            .unwrap();
        let reopened = lopdf::Document::load_mem(&bytes).unwrap();
        assert!(reopened.get_pages().len() > 1);
    }

    #[test]
    fn test_uncompressed_stream_is_readable() {
        let bytes = PdfWriter::new()
            .with_compression(false)
            .write(&document(1))
            .unwrap();
        let haystack = String::from_utf8_lossy(&bytes);
        assert!(haystack.contains("(Line 0)"));
        assert!(haystack.contains("/Times-Bold"));
    }

    #[test]
    fn test_empty_document_is_an_error() {
        let doc = Document::new(Metadata::new(DocumentKind::Cv, TemplateVariant::Classic));
        assert!(matches!(to_pdf(&doc), Err(Error::EmptyDocument)));
    }

    #[test]
    fn test_circle_path_closes() {
        let path = circle_path(10.0, 10.0, 5.0);
        assert_eq!(path.len(), 6);
        assert_eq!(path[0].operator, "m");
        assert_eq!(path[5].operator, "h");
    }

    #[test]
    fn test_non_ascii_title_is_utf16() {
        match text_string("Zoë") {
            Object::String(bytes, StringFormat::Hexadecimal) => {
                assert_eq!(&bytes[..2], &[0xFE, 0xFF]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
