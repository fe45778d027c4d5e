//! Document backends
//!
//! [`PdfBackend`] writes a plain PDF 1.4 file using the standard Helvetica
//! fonts, so no font files are embedded. Text is encoded as WinAnsi, which
//! matches Latin-1 for every character we emit; anything outside that range
//! is printed as `?`.

use std::borrow::Cow;

use tracing::debug;

use crate::document::{InvoiceDocument, LayoutLine, LineStyle};
use crate::error::InvoiceError;

/// Turns a laid-out invoice into bytes
pub trait DocumentBackend: Send + Sync {
    fn encode(&self, document: &InvoiceDocument) -> Result<Vec<u8>, InvoiceError>;

    fn content_type(&self) -> &'static str;

    fn extension(&self) -> &'static str;
}

/// A4 portrait, in points
const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN_LEFT: f32 = 56.0;
const MARGIN_TOP: f32 = 64.0;
const MARGIN_BOTTOM: f32 = 64.0;
const AMOUNT_COLUMN_X: f32 = 420.0;
const COLUMN_GAP: f32 = 12.0;
const ELLIPSIS: &str = "...";

const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

/// Minimal PDF writer
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfBackend;

impl PdfBackend {
    pub fn new() -> Self {
        Self
    }

    fn paginate(lines: &[LayoutLine]) -> Vec<Vec<(f32, &LayoutLine)>> {
        let mut pages = Vec::new();
        let mut current = Vec::new();
        let mut y = PAGE_HEIGHT - MARGIN_TOP;

        for line in lines {
            let (_, size, leading) = font_for(line.style);
            if y - leading < MARGIN_BOTTOM && !current.is_empty() {
                pages.push(std::mem::take(&mut current));
                y = PAGE_HEIGHT - MARGIN_TOP;
            }
            y -= leading;
            if line.style != LineStyle::Blank {
                current.push((y + leading - size, line));
            }
        }

        if !current.is_empty() || pages.is_empty() {
            pages.push(current);
        }
        pages
    }

    fn content_stream(page: &[(f32, &LayoutLine)]) -> Vec<u8> {
        let mut stream = Vec::new();
        for (y, line) in page {
            let (font, size, _) = font_for(line.style);
            let max_width = match line.amount {
                Some(_) => AMOUNT_COLUMN_X - MARGIN_LEFT - COLUMN_GAP,
                None => PAGE_WIDTH - 2.0 * MARGIN_LEFT,
            };
            let text = fit_to_width(&line.text, font, size, max_width);
            push_text(&mut stream, font, size, MARGIN_LEFT, *y, &text);
            if let Some(amount) = &line.amount {
                push_text(&mut stream, font, size, AMOUNT_COLUMN_X, *y, amount);
            }
            if line.style == LineStyle::Strong {
                let rule_y = y + size + 4.0;
                stream.extend_from_slice(
                    format!(
                        "{:.1} {:.1} m {:.1} {:.1} l S\n",
                        MARGIN_LEFT,
                        rule_y,
                        PAGE_WIDTH - MARGIN_LEFT,
                        rule_y
                    )
                    .as_bytes(),
                );
            }
        }
        stream
    }
}

impl DocumentBackend for PdfBackend {
    fn encode(&self, document: &InvoiceDocument) -> Result<Vec<u8>, InvoiceError> {
        let lines = document.layout();
        let pages = Self::paginate(&lines);

        // Object layout: 1 catalog, 2 page tree, 3-4 fonts, then a
        // (page, contents) pair per page.
        let page_ids: Vec<usize> = (0..pages.len()).map(|i| 5 + i * 2).collect();
        let mut writer = ObjectWriter::new();

        writer.object(1, b"<< /Type /Catalog /Pages 2 0 R >>");

        let kids = page_ids
            .iter()
            .map(|id| format!("{id} 0 R"))
            .collect::<Vec<_>>()
            .join(" ");
        writer.object(
            2,
            format!("<< /Type /Pages /Kids [{kids}] /Count {} >>", pages.len()).as_bytes(),
        );
        writer.object(
            3,
            b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>",
        );
        writer.object(
            4,
            b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>",
        );

        for (page, id) in pages.iter().zip(&page_ids) {
            let contents_id = id + 1;
            writer.object(
                *id,
                format!(
                    "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH:.0} {PAGE_HEIGHT:.0}] \
                     /Resources << /Font << /{REGULAR_FONT} 3 0 R /{BOLD_FONT} 4 0 R >> >> \
                     /Contents {contents_id} 0 R >>"
                )
                .as_bytes(),
            );
            writer.stream(contents_id, &Self::content_stream(page));
        }

        let bytes = writer.finish(1)?;
        debug!(pages = pages.len(), size = bytes.len(), "Encoded invoice PDF");
        Ok(bytes)
    }

    fn content_type(&self) -> &'static str {
        "application/pdf"
    }

    fn extension(&self) -> &'static str {
        "pdf"
    }
}

/// Font resource, size, and line advance for a style
fn font_for(style: LineStyle) -> (&'static str, f32, f32) {
    match style {
        LineStyle::Title => (BOLD_FONT, 18.0, 26.0),
        LineStyle::Heading => (BOLD_FONT, 12.0, 20.0),
        LineStyle::Strong => (BOLD_FONT, 11.0, 18.0),
        LineStyle::Body => (REGULAR_FONT, 10.0, 15.0),
        LineStyle::Small => (REGULAR_FONT, 8.0, 12.0),
        LineStyle::Blank => (REGULAR_FONT, 10.0, 10.0),
    }
}

/// Helvetica advance widths for ' '..='~', in thousandths of an em
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

/// Approximate rendered width of `text` in points
///
/// Bold glyphs are scaled up from the regular metrics; characters outside
/// printable ASCII use the digit width.
fn text_width(text: &str, font: &str, size: f32) -> f32 {
    let units: u32 = text
        .chars()
        .map(|ch| match ch {
            ' '..='~' => u32::from(HELVETICA_WIDTHS[ch as usize - 0x20]),
            _ => 556,
        })
        .sum();
    let scale = if font == BOLD_FONT { 1.15 } else { 1.0 };
    units as f32 * size * scale / 1000.0
}

/// Shortens `text` with a trailing ellipsis so it fits in `max_width` points
fn fit_to_width<'a>(text: &'a str, font: &str, size: f32, max_width: f32) -> Cow<'a, str> {
    if text_width(text, font, size) <= max_width {
        return Cow::Borrowed(text);
    }

    let budget = max_width - text_width(ELLIPSIS, font, size);
    let mut used = 0.0;
    let mut end = 0;
    for (index, ch) in text.char_indices() {
        let advance = text_width(ch.encode_utf8(&mut [0; 4]), font, size);
        if used + advance > budget {
            break;
        }
        used += advance;
        end = index + ch.len_utf8();
    }
    Cow::Owned(format!("{}{}", text[..end].trim_end(), ELLIPSIS))
}

fn push_text(stream: &mut Vec<u8>, font: &str, size: f32, x: f32, y: f32, text: &str) {
    stream.extend_from_slice(format!("BT /{font} {size:.0} Tf {x:.1} {y:.1} Td (").as_bytes());
    stream.extend_from_slice(&encode_text(text));
    stream.extend_from_slice(b") Tj ET\n");
}

/// Escapes a string for a PDF literal and maps it to WinAnsi bytes
pub(crate) fn encode_text(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' | '(' | ')' => {
                out.push(b'\\');
                out.push(ch as u8);
            }
            ' '..='~' => out.push(ch as u8),
            '\u{a0}'..='\u{ff}' => out.push(ch as u32 as u8),
            _ => out.push(b'?'),
        }
    }
    out
}

/// Accumulates numbered objects and emits the cross-reference table
struct ObjectWriter {
    buffer: Vec<u8>,
    offsets: Vec<(usize, usize)>,
}

impl ObjectWriter {
    fn new() -> Self {
        // Header plus binary marker comment
        let mut buffer = b"%PDF-1.4\n".to_vec();
        buffer.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");
        Self {
            buffer,
            offsets: Vec::new(),
        }
    }

    fn object(&mut self, id: usize, body: &[u8]) {
        self.offsets.push((id, self.buffer.len()));
        self.buffer.extend_from_slice(format!("{id} 0 obj\n").as_bytes());
        self.buffer.extend_from_slice(body);
        self.buffer.extend_from_slice(b"\nendobj\n");
    }

    fn stream(&mut self, id: usize, content: &[u8]) {
        let mut body = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(b"\nendstream");
        self.object(id, &body);
    }

    fn finish(mut self, root: usize) -> Result<Vec<u8>, InvoiceError> {
        self.offsets.sort_by_key(|(id, _)| *id);
        let count = self.offsets.len() + 1;

        for (expected, (id, _)) in (1..).zip(&self.offsets) {
            if *id != expected {
                return Err(InvoiceError::Encoding(format!(
                    "object numbering gap: expected {expected}, found {id}"
                )));
            }
        }

        let xref_offset = self.buffer.len();
        self.buffer.extend_from_slice(format!("xref\n0 {count}\n").as_bytes());
        self.buffer.extend_from_slice(b"0000000000 65535 f \n");
        for (_, offset) in &self.offsets {
            self.buffer.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        self.buffer.extend_from_slice(
            format!("trailer\n<< /Size {count} /Root {root} 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n")
                .as_bytes(),
        );
        Ok(self.buffer)
    }
}
