//! # pdfconv
//!
//! Rebuild the semantic structure of resume-like PDFs and write it out as
//! Word, HTML, Markdown, plain text or JSON.
//!
//! Extracted lines are classified into roles (name, contact, section header,
//! job title, company/date, bullet, numbered item, paragraph), adjacent lines
//! are merged into paragraphs, and the typed node sequence drives the writers.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfconv::{parse_file, render};
//!
//! fn main() -> pdfconv::Result<()> {
//!     let doc = parse_file("resume.pdf")?;
//!
//!     let options = render::RenderOptions::default();
//!     let html = render::to_html(&doc, &options)?;
//!     println!("{}", html);
//!
//!     Ok(())
//! }
//! ```
//!
//! The classifier also works without a PDF, on plain text lines:
//!
//! ```
//! use pdfconv::{classify_lines, NodeKind};
//!
//! let nodes = classify_lines(&["Jane Doe", "jane@example.com", "EXPERIENCE"]);
//! assert_eq!(nodes[0].kind, NodeKind::Name);
//! assert_eq!(nodes[2].kind, NodeKind::SectionHeader);
//! ```

pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod pages;
pub mod parser;
pub mod render;
pub mod structure;

pub use convert::{
    convert_file, ConvertOptions, ConvertReport, DocumentWriter, Outcome, WriterRegistry,
};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_pdf, PdfFormat};
pub use error::{Error, Result};
pub use model::{
    CharRecord, ContentNode, Line, Metadata, NodeFormat, NodeKind, PageContent,
    StructuredDocument, Table,
};
pub use pages::{
    add_pages_file, remove_pages_file, rotate_file, InsertionPoint, PageEdit, PageEditReport,
    PageSelection, VALID_ROTATIONS,
};
pub use parser::{ErrorMode, ExtractMode, ParseOptions, PdfSource};
pub use render::{JsonFormat, RenderOptions};
pub use structure::{StructureBuilder, StructureConfig};

use std::io::Read;
use std::path::Path;

/// Parse a PDF file into a structured document.
///
/// # Example
///
/// ```no_run
/// use pdfconv::parse_file;
///
/// let doc = parse_file("resume.pdf").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<StructuredDocument> {
    parse_file_with_options(path, ParseOptions::default())
}

/// Parse a PDF file with custom options.
///
/// # Example
///
/// ```no_run
/// use pdfconv::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().lenient().plain_text();
/// let doc = parse_file_with_options("resume.pdf", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ParseOptions,
) -> Result<StructuredDocument> {
    let source = PdfSource::open(path)?;
    structure_source(&source, &options)
}

/// Parse a PDF from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<StructuredDocument> {
    parse_bytes_with_options(data, ParseOptions::default())
}

/// Parse a PDF from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<StructuredDocument> {
    let source = PdfSource::from_bytes(data)?;
    structure_source(&source, &options)
}

/// Parse a PDF from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<StructuredDocument> {
    let source = PdfSource::from_reader(reader)?;
    structure_source(&source, &ParseOptions::default())
}

fn structure_source(source: &PdfSource, options: &ParseOptions) -> Result<StructuredDocument> {
    let pages = source.extract_pages(options)?;
    StructureBuilder::new().build_with_metadata(pages, source.metadata())
}

/// Classify plain text lines (no font metrics) with the default thresholds.
///
/// Blank lines separate paragraphs; the first usable line may become the name.
pub fn classify_lines<S: AsRef<str>>(lines: &[S]) -> Vec<ContentNode> {
    let builder = StructureBuilder::new();
    let mut lines = structure::lines_from_text(lines);
    builder.mark_first_line(&mut lines);
    builder.nodes_from_lines(&lines)
}

/// Convert a PDF to Word and return the `.docx` bytes.
pub fn to_docx<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let doc = parse_file(path)?;
    render::to_docx(&doc, &RenderOptions::default())
}

/// Convert a PDF to a standalone HTML page.
pub fn to_html<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_html(&doc, &RenderOptions::default())
}

/// Convert a PDF to Markdown.
///
/// # Example
///
/// ```no_run
/// let markdown = pdfconv::to_markdown("resume.pdf").unwrap();
/// std::fs::write("resume.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_markdown(&doc, &RenderOptions::default())
}

/// Convert a PDF to plain text.
pub fn to_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_text(&doc, &RenderOptions::default())
}

/// Convert a PDF to JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_json(&doc, format)
}

/// Builder for parsing and converting PDF documents.
///
/// # Example
///
/// ```no_run
/// use pdfconv::Pdfconv;
///
/// let html = Pdfconv::new()
///     .lenient()
///     .with_title("Jane Doe - CV")
///     .parse("resume.pdf")?
///     .to_html()?;
/// # Ok::<(), pdfconv::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Pdfconv {
    parse_options: ParseOptions,
    structure_config: StructureConfig,
    render_options: RenderOptions,
}

impl Pdfconv {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable lenient parsing mode.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Skip positioned extraction and classify plain text lines only.
    pub fn plain_text(mut self) -> Self {
        self.parse_options = self.parse_options.plain_text();
        self
    }

    /// Set classifier thresholds.
    pub fn with_structure_config(mut self, config: StructureConfig) -> Self {
        self.structure_config = config;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.parse_options = self.parse_options.with_pages(pages);
        self
    }

    /// Set the document title used by the writers.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_title(title);
        self
    }

    /// Enable or disable page breaks between pages.
    pub fn with_page_breaks(mut self, enabled: bool) -> Self {
        self.render_options = self.render_options.with_page_breaks(enabled);
        self
    }

    /// Parse a PDF file.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<PdfconvResult> {
        let source = PdfSource::open(path)?;
        self.finish(&source)
    }

    /// Parse a PDF from bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<PdfconvResult> {
        let source = PdfSource::from_bytes(data)?;
        self.finish(&source)
    }

    fn finish(self, source: &PdfSource) -> Result<PdfconvResult> {
        let pages = source.extract_pages(&self.parse_options)?;
        let document = StructureBuilder::new()
            .with_config(self.structure_config)
            .build_with_metadata(pages, source.metadata())?;
        Ok(PdfconvResult {
            document,
            render_options: self.render_options,
        })
    }
}

/// A structured document plus the render options to write it with.
#[derive(Debug, Clone)]
pub struct PdfconvResult {
    /// The structured document
    pub document: StructuredDocument,
    render_options: RenderOptions,
}

impl PdfconvResult {
    /// Convert to `.docx` bytes.
    pub fn to_docx(&self) -> Result<Vec<u8>> {
        render::to_docx(&self.document, &self.render_options)
    }

    /// Convert to a standalone HTML page.
    pub fn to_html(&self) -> Result<String> {
        render::to_html(&self.document, &self.render_options)
    }

    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.document, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get the document.
    pub fn document(&self) -> &StructuredDocument {
        &self.document
    }
}
