//! PDF document source using lopdf.

use std::io::Read;
use std::path::Path;

use lopdf::Document as LopdfDocument;

use crate::detect::{detect_format_from_bytes, detect_format_from_path};
use crate::error::{Error, Result};
use crate::model::Metadata;
use crate::structure::PageInput;

use super::layout::SpanExtractor;
use super::options::{ErrorMode, ExtractMode, ParseOptions};

/// A loaded PDF that pages can be extracted from.
pub struct PdfSource {
    doc: LopdfDocument,
}

impl PdfSource {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        detect_format_from_path(path)?;
        let doc = LopdfDocument::load(path)?;
        Self::from_document(doc)
    }

    /// Load a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        detect_format_from_bytes(data)?;
        let doc = LopdfDocument::load_mem(data)?;
        Self::from_document(doc)
    }

    /// Load a PDF from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Wrap an already loaded document.
    pub fn from_document(doc: LopdfDocument) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        Ok(Self { doc })
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Get PDF version.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    /// Extract the selected pages in document order.
    pub fn extract_pages(&self, options: &ParseOptions) -> Result<Vec<PageInput>> {
        let mut pages = Vec::new();

        for page_num in self.doc.get_pages().into_keys() {
            if !options.pages.includes(page_num) {
                continue;
            }

            match self.extract_page(page_num, options.extract_mode) {
                Ok(page) => pages.push(page),
                Err(e) if options.error_mode == ErrorMode::Lenient => {
                    log::warn!("Failed to extract text from page {}: {}", page_num, e);
                    pages.push(PageInput::empty(page_num));
                }
                Err(e) => return Err(e),
            }
        }

        log::debug!("Extracted {} of {} pages", pages.len(), self.page_count());
        Ok(pages)
    }

    /// Extract a single page (1-indexed).
    ///
    /// In [`ExtractMode::Full`] the content stream is walked for positioned
    /// spans; when that fails or finds nothing the page falls back to plain
    /// text without metrics.
    pub fn extract_page(&self, page_num: u32, mode: ExtractMode) -> Result<PageInput> {
        if mode == ExtractMode::Full {
            match SpanExtractor::new(&self.doc).extract_page(page_num) {
                Ok(records) if !records.is_empty() => {
                    return Ok(PageInput::positioned(page_num, records));
                }
                Ok(_) => log::debug!("Page {}: no positioned text, using plain text", page_num),
                Err(e) => log::warn!(
                    "Page {}: span extraction failed ({}), using plain text",
                    page_num,
                    e
                ),
            }
        }

        let text = self.extract_page_text(page_num)?;
        Ok(PageInput::plain_text(page_num, text.lines()))
    }

    /// Extract document metadata.
    pub fn metadata(&self) -> Metadata {
        let mut metadata = Metadata::with_version(self.version());
        metadata.page_count = self.page_count();
        metadata.encrypted = self.doc.is_encrypted();

        let info = self
            .doc
            .trailer
            .get(b"Info")
            .and_then(|info| info.as_reference())
            .and_then(|id| self.doc.get_dictionary(id));

        if let Ok(info) = info {
            metadata.title = get_string_from_dict(info, b"Title");
            metadata.author = get_string_from_dict(info, b"Author");
            metadata.subject = get_string_from_dict(info, b"Subject");
            metadata.creator = get_string_from_dict(info, b"Creator");
            metadata.producer = get_string_from_dict(info, b"Producer");
            metadata.created =
                get_string_from_dict(info, b"CreationDate").and_then(|d| parse_pdf_date(&d));
            metadata.modified =
                get_string_from_dict(info, b"ModDate").and_then(|d| parse_pdf_date(&d));
        }

        metadata
    }

    fn extract_page_text(&self, page_num: u32) -> Result<String> {
        let total = self.page_count();
        if page_num == 0 || page_num > total {
            return Err(Error::PageOutOfRange(page_num, total));
        }
        self.doc
            .extract_text(&[page_num])
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", page_num, e)))
    }
}

/// Helper to get a string from a PDF dictionary.
fn get_string_from_dict(dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    let value = match dict.get(key).ok()? {
        lopdf::Object::String(bytes, _) => decode_pdf_string(bytes),
        lopdf::Object::Name(bytes) => String::from_utf8_lossy(bytes).to_string(),
        _ => return None,
    };
    let value = value.trim().to_string();
    (!value.is_empty()).then_some(value)
}

/// Decode a PDF text string (UTF-16BE with BOM, else UTF-8, else Latin-1).
fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let utf16: Vec<u16> = rest
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Parse a PDF date string (D:YYYYMMDDHHmmSSOHH'mm').
fn parse_pdf_date(s: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    let s = s.strip_prefix("D:").unwrap_or(s);

    let year: i32 = s.get(0..4)?.parse().ok()?;
    let field = |range: std::ops::Range<usize>, default: u32| {
        s.get(range).and_then(|v| v.parse().ok()).unwrap_or(default)
    };
    let month = field(4..6, 1);
    let day = field(6..8, 1);
    let hour = field(8..10, 0);
    let minute = field(10..12, 0);
    let second = field(12..14, 0);

    chrono::NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .map(|dt| chrono::DateTime::from_naive_utc_and_offset(dt, chrono::Utc))
}
