//! Positioned text extraction from page content streams.
//!
//! Walks the text operators of a page (BT/ET, Tf, TL, Td/TD, Tm, T*, Tj/TJ,
//! ' and ") and emits one [`CharRecord`] per show-text operation, carrying
//! the font name, effective font size and an estimated advance width.

use std::collections::{BTreeMap, HashMap};

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};
use crate::model::CharRecord;
use crate::structure::features::is_spaceless_script_char;

/// Average glyph width as a fraction of the font size.
const GLYPH_WIDTH_RATIO: f32 = 0.5;

/// TJ adjustment (thousandths of an em) treated as a word space.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Extracts positioned fragments from the pages of a document.
pub struct SpanExtractor<'a> {
    doc: &'a LopdfDocument,
}

impl<'a> SpanExtractor<'a> {
    /// Create an extractor over a loaded document.
    pub fn new(doc: &'a LopdfDocument) -> Self {
        Self { doc }
    }

    /// Extract the fragments of one page (1-indexed).
    pub fn extract_page(&self, page_num: u32) -> Result<Vec<CharRecord>> {
        let pages = self.doc.get_pages();
        let page_id = pages
            .get(&page_num)
            .ok_or(Error::PageOutOfRange(page_num, pages.len() as u32))?;

        let fonts = self
            .doc
            .get_page_fonts(*page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let content = self.page_content(*page_id)?;
        self.parse_content(&content, &fonts)
    }

    fn page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self.doc.get_dictionary(page_id)?;
        let contents = page_dict.get(b"Contents")?;

        let stream_data = |id: &ObjectId| -> Option<Vec<u8>> {
            match self.doc.get_object(*id) {
                Ok(Object::Stream(s)) => s.decompressed_content().ok().or(Some(s.content.clone())),
                _ => None,
            }
        };

        match contents {
            Object::Reference(r) => stream_data(r)
                .ok_or_else(|| Error::PdfParse("Invalid content stream".to_string())),
            Object::Array(arr) => {
                let mut content = Vec::new();
                for obj in arr {
                    if let Ok(id) = obj.as_reference() {
                        if let Some(data) = stream_data(&id) {
                            content.extend_from_slice(&data);
                            content.push(b' ');
                        }
                    }
                }
                Ok(content)
            }
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        }
    }

    fn parse_content(
        &self,
        content: &[u8],
        fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
    ) -> Result<Vec<CharRecord>> {
        let content =
            lopdf::content::Content::decode(content).map_err(|e| Error::PdfParse(e.to_string()))?;

        let base_fonts: HashMap<&[u8], String> = fonts
            .iter()
            .map(|(name, dict)| {
                let base = dict
                    .get(b"BaseFont")
                    .ok()
                    .and_then(|o| o.as_name().ok())
                    .map(|n| String::from_utf8_lossy(n).to_string())
                    .unwrap_or_else(|| String::from_utf8_lossy(name).to_string());
                (name.as_slice(), base)
            })
            .collect();

        let mut records = Vec::new();
        let mut state = TextState::default();
        let mut encoding = None;
        let mut matrix = TextMatrix::default();
        let mut in_text = false;

        for op in content.operations {
            let operands = &op.operands;
            match op.operator.as_str() {
                "BT" => {
                    in_text = true;
                    matrix = TextMatrix::default();
                }
                "ET" => in_text = false,
                "Tf" if operands.len() >= 2 => {
                    if let Object::Name(resource) = &operands[0] {
                        state.font_name = base_fonts
                            .get(resource.as_slice())
                            .cloned()
                            .unwrap_or_else(|| String::from_utf8_lossy(resource).to_string());
                        encoding = fonts
                            .get(resource)
                            .and_then(|f| f.get_font_encoding(self.doc).ok());
                    }
                    state.font_size = get_number(&operands[1]).unwrap_or(state.font_size);
                }
                "TL" => {
                    if let Some(leading) = operands.first().and_then(get_number) {
                        state.leading = leading;
                    }
                }
                "Td" | "TD" if operands.len() >= 2 => {
                    let tx = get_number(&operands[0]).unwrap_or(0.0);
                    let ty = get_number(&operands[1]).unwrap_or(0.0);
                    if op.operator == "TD" {
                        state.leading = -ty;
                    }
                    matrix.translate(tx, ty);
                }
                "Tm" if operands.len() >= 6 => {
                    let n: Vec<f32> = operands
                        .iter()
                        .take(6)
                        .map(|o| get_number(o).unwrap_or(0.0))
                        .collect();
                    matrix.set(n[0], n[1], n[2], n[3], n[4], n[5]);
                }
                "T*" => matrix.next_line(state.leading),
                "Tj" | "TJ" | "'" | "\"" => {
                    if matches!(op.operator.as_str(), "'" | "\"") {
                        matrix.next_line(state.leading);
                    }
                    if !in_text {
                        continue;
                    }

                    let decode = |bytes: &[u8]| match &encoding {
                        Some(enc) => LopdfDocument::decode_text(enc, bytes).unwrap_or_default(),
                        None => decode_text_simple(bytes),
                    };
                    let text = match op.operator.as_str() {
                        "TJ" => match operands.first() {
                            Some(Object::Array(items)) => decode_tj_array(items, &decode),
                            _ => String::new(),
                        },
                        "\"" => decode_operand(operands.get(2), &decode),
                        _ => decode_operand(operands.first(), &decode),
                    };

                    if text.trim().is_empty() {
                        continue;
                    }

                    let (x, y) = matrix.position();
                    let size = state.font_size * matrix.scale();
                    let width = text.chars().count() as f32 * size * GLYPH_WIDTH_RATIO;
                    records.push(
                        CharRecord::new(text, x, y)
                            .with_font(state.font_name.clone(), size)
                            .with_width(width),
                    );
                    matrix.advance(width / matrix.scale().max(f32::EPSILON));
                }
                _ => {}
            }
        }

        Ok(records)
    }
}

/// Font state carried across text objects.
#[derive(Debug, Clone)]
struct TextState {
    font_name: String,
    font_size: f32,
    leading: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            font_name: String::new(),
            font_size: 12.0,
            leading: 12.0,
        }
    }
}

/// Text matrix for tracking position in content stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
    // start of the current line, restored by Td and T*
    line_e: f32,
    line_f: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
            line_e: 0.0,
            line_f: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
        self.line_e = e;
        self.line_f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.line_e += tx * self.a + ty * self.c;
        self.line_f += tx * self.b + ty * self.d;
        self.e = self.line_e;
        self.f = self.line_f;
    }

    fn next_line(&mut self, leading: f32) {
        self.translate(0.0, -leading);
    }

    /// Move the pen along the baseline after showing text.
    fn advance(&mut self, tx: f32) {
        self.e += tx * self.a;
        self.f += tx * self.b;
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

fn decode_operand(obj: Option<&Object>, decode: &dyn Fn(&[u8]) -> String) -> String {
    match obj {
        Some(Object::String(bytes, _)) => decode(bytes),
        _ => String::new(),
    }
}

/// Decode a TJ array, turning large negative kerning into word spaces.
fn decode_tj_array(items: &[Object], decode: &dyn Fn(&[u8]) -> String) -> String {
    let mut combined = String::new();

    for item in items {
        match item {
            Object::String(bytes, _) => combined.push_str(&decode(bytes)),
            Object::Integer(_) | Object::Real(_) => {
                let adjustment = -get_number(item).unwrap_or(0.0);
                let needs_space = adjustment > TJ_SPACE_THRESHOLD
                    && !combined.ends_with([' ', '\u{00A0}'])
                    && combined
                        .chars()
                        .last()
                        .is_some_and(|c| !is_spaceless_script_char(c));
                if needs_space {
                    combined.push(' ');
                }
            }
            _ => {}
        }
    }

    combined
}

/// Helper to extract number from PDF object.
fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Decoding fallback when the font has no usable encoding.
fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.starts_with(&[0xFE, 0xFF]) {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        // Latin-1
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_matrix_moves() {
        let mut m = TextMatrix::default();
        m.translate(72.0, 700.0);
        assert_eq!(m.position(), (72.0, 700.0));
        m.advance(30.0);
        assert_eq!(m.position(), (102.0, 700.0));
        m.next_line(14.0);
        assert_eq!(m.position(), (72.0, 686.0));
    }

    #[test]
    fn test_text_matrix_scale() {
        let mut m = TextMatrix::default();
        m.set(2.0, 0.0, 0.0, 2.0, 10.0, 20.0);
        assert_eq!(m.scale(), 2.0);
        assert_eq!(m.position(), (10.0, 20.0));
    }

    #[test]
    fn test_tj_array_spacing() {
        let items = vec![
            Object::string_literal("Jane"),
            Object::Integer(-250),
            Object::string_literal("Doe"),
            Object::Integer(-20),
            Object::string_literal("!"),
        ];
        assert_eq!(decode_tj_array(&items, &decode_text_simple), "Jane Doe!");
    }

    #[test]
    fn test_decode_text_simple() {
        assert_eq!(decode_text_simple(b"plain"), "plain");
        assert_eq!(decode_text_simple(&[0xFE, 0xFF, 0x00, 0x41, 0x00, 0x42]), "AB");
        assert_eq!(decode_text_simple(&[0x63, 0x61, 0x66, 0xE9]), "café");
    }
}
