//! Conversion pipeline and output writer registry.
//!
//! Writers are registered by name and by the file extensions they produce;
//! [`WriterRegistry::convert_file`] picks the writer from an explicit format
//! or from the output path, then runs extract → structure → write.
//!
//! # Example
//!
//! ```no_run
//! use pdfconv::convert::{ConvertOptions, WriterRegistry};
//!
//! fn main() -> pdfconv::Result<()> {
//!     let registry = WriterRegistry::with_defaults();
//!     let options = ConvertOptions::default();
//!     let report = registry.convert_file("resume.pdf", "resume.docx", &options)?;
//!     println!("{}", report.message());
//!     Ok(())
//! }
//! ```

mod writers;

pub use writers::{DocxWriter, HtmlWriter, JsonWriter, MarkdownWriter, TextWriter};

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{NodeKind, StructuredDocument};
use crate::pages::PageSelection;
use crate::parser::{ParseOptions, PdfSource};
use crate::render::{ExtractionStats, RenderOptions};
use crate::structure::{StructureBuilder, StructureConfig};

/// Options for a whole conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Extraction options
    pub parse: ParseOptions,

    /// Classifier thresholds
    pub structure: StructureConfig,

    /// Rendering options
    pub render: RenderOptions,

    /// Output format name or extension; `None` uses the output path
    pub format: Option<String>,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set extraction options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Set classifier thresholds.
    pub fn with_structure_config(mut self, config: StructureConfig) -> Self {
        self.structure = config;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Force an output format.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Only convert the selected pages.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.parse.pages = pages;
        self
    }

    /// Set the document title used by the writers.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.render.title = Some(title.into());
        self
    }
}

/// A writer for one output format.
pub trait DocumentWriter: Send + Sync {
    /// Short format name (e.g. `docx`).
    fn name(&self) -> &str;

    /// Extensions this writer produces, lowercase without the dot.
    fn extensions(&self) -> &[&str];

    /// MIME type of the output.
    fn mime_type(&self) -> &str;

    /// Serialize a document.
    fn write(&self, doc: &StructuredDocument, options: &RenderOptions) -> Result<Vec<u8>>;

    /// Human-facing format label used in messages.
    fn label(&self) -> &str {
        match self.name() {
            "docx" => "Word",
            "html" => "HTML",
            "markdown" => "Markdown",
            "json" => "JSON",
            other => other,
        }
    }

    /// Check if this writer produces the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext = normalize_extension(ext);
        self.extensions().iter().any(|e| *e == ext)
    }
}

fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}

/// Registry of output writers.
pub struct WriterRegistry {
    by_extension: HashMap<String, Arc<dyn DocumentWriter>>,
    by_name: HashMap<String, Arc<dyn DocumentWriter>>,
}

impl WriterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            by_extension: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with every built-in writer.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(DocxWriter));
        registry.register(Arc::new(HtmlWriter));
        registry.register(Arc::new(MarkdownWriter));
        registry.register(Arc::new(TextWriter));
        registry.register(Arc::new(JsonWriter));
        registry
    }

    /// Register a writer under its name and all its extensions.
    pub fn register(&mut self, writer: Arc<dyn DocumentWriter>) {
        for ext in writer.extensions() {
            self.by_extension
                .insert(normalize_extension(ext), writer.clone());
        }
        self.by_name.insert(writer.name().to_lowercase(), writer);
    }

    /// Get a writer by file extension (case-insensitive, leading dot allowed).
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentWriter>> {
        self.by_extension.get(&normalize_extension(ext)).cloned()
    }

    /// Get a writer by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentWriter>> {
        self.by_name.get(&name.trim().to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.by_extension.contains_key(&normalize_extension(ext))
    }

    /// All supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.by_extension.keys().map(String::as_str).collect();
        exts.sort_unstable();
        exts
    }

    /// Pick a writer from an explicit format, else from the output path.
    pub fn resolve(&self, format: Option<&str>, output: &Path) -> Result<Arc<dyn DocumentWriter>> {
        match format {
            Some(format) => self
                .get_by_name(format)
                .or_else(|| self.get_by_extension(format))
                .ok_or_else(|| Error::UnsupportedFormat(format.to_string())),
            None => {
                let ext = output
                    .extension()
                    .and_then(|e| e.to_str())
                    .ok_or_else(|| {
                        Error::UnsupportedFormat(format!(
                            "cannot infer format from '{}'",
                            output.display()
                        ))
                    })?;
                self.get_by_extension(ext)
                    .ok_or_else(|| Error::UnsupportedFormat(ext.to_string()))
            }
        }
    }

    /// Convert a PDF file and write the result to `output`.
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
        options: &ConvertOptions,
    ) -> Result<ConvertReport> {
        let input = input.as_ref();
        let output = output.as_ref();
        let writer = self.resolve(options.format.as_deref(), output)?;

        let doc = extract_document(input, options)?;
        let bytes = writer.write(&doc, &options.render)?;
        std::fs::write(output, &bytes)?;

        log::debug!(
            "Wrote {} bytes of {} to {}",
            bytes.len(),
            writer.name(),
            output.display()
        );

        Ok(ConvertReport::new(
            &doc,
            &options.render,
            writer.as_ref(),
            input,
            output,
            bytes.len(),
        ))
    }

    /// Convert PDF bytes to the named format.
    pub fn convert_bytes(
        &self,
        bytes: &[u8],
        format: &str,
        options: &ConvertOptions,
    ) -> Result<Vec<u8>> {
        let writer = self
            .get_by_name(format)
            .or_else(|| self.get_by_extension(format))
            .ok_or_else(|| Error::UnsupportedFormat(format.to_string()))?;
        let source = PdfSource::from_bytes(bytes)?;
        let doc = build_document(&source, options)?;
        writer.write(&doc, &options.render)
    }
}

impl Default for WriterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Extract and structure a PDF file.
pub fn extract_document<P: AsRef<Path>>(
    path: P,
    options: &ConvertOptions,
) -> Result<StructuredDocument> {
    let source = PdfSource::open(path)?;
    build_document(&source, options)
}

fn build_document(source: &PdfSource, options: &ConvertOptions) -> Result<StructuredDocument> {
    let pages = source.extract_pages(&options.parse)?;
    StructureBuilder::new()
        .with_config(options.structure.clone())
        .build_with_metadata(pages, source.metadata())
}

/// Convert a PDF file using the default writers.
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: &ConvertOptions,
) -> Result<ConvertReport> {
    WriterRegistry::with_defaults().convert_file(input, output, options)
}

/// Summary of a finished conversion.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertReport {
    /// Source PDF
    pub input: PathBuf,

    /// Written file
    pub output: PathBuf,

    /// Writer name
    pub format: String,

    /// Human-facing format label
    #[serde(skip)]
    pub label: String,

    /// Node counts per kind
    pub node_counts: BTreeMap<NodeKind, usize>,

    /// Counts over the rendered pages
    pub stats: ExtractionStats,

    /// Size of the written output
    pub output_bytes: usize,
}

impl ConvertReport {
    fn new(
        doc: &StructuredDocument,
        render: &RenderOptions,
        writer: &dyn DocumentWriter,
        input: &Path,
        output: &Path,
        output_bytes: usize,
    ) -> Self {
        Self {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            format: writer.name().to_string(),
            label: writer.label().to_string(),
            node_counts: doc.kind_counts(),
            stats: ExtractionStats::from_document(doc, &render.page_selection),
            output_bytes,
        }
    }

    /// Name and section header count.
    pub fn headings(&self) -> u32 {
        self.stats.heading_count
    }

    /// Count of every other text node.
    pub fn paragraphs(&self) -> u32 {
        self.stats.paragraph_count
    }

    /// Human-readable summary.
    pub fn message(&self) -> String {
        format!(
            "Successfully converted PDF to {}. Created {} headings and {} paragraphs.",
            self.label,
            self.headings(),
            self.paragraphs()
        )
    }
}

/// JSON result printed by every command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Outcome {
    /// Successful outcome with a message.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    /// Failed outcome with an error description.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }

    /// Build an outcome from a result, using `describe` for the success message.
    pub fn from_result<T>(result: &Result<T>, describe: impl FnOnce(&T) -> String) -> Self {
        match result {
            Ok(value) => Self::ok(describe(value)),
            Err(e) => Self::failure(e.to_string()),
        }
    }

    /// Compact JSON form.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            String::from(r#"{"success":false,"error":"failed to serialize outcome"}"#)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentNode, PageContent};

    #[test]
    fn test_convert_options_builder() {
        let options = ConvertOptions::new()
            .with_format("html")
            .with_pages(PageSelection::pages([1, 2]))
            .with_title("CV");

        assert_eq!(options.format.as_deref(), Some("html"));
        assert_eq!(options.parse.pages, PageSelection::pages([1, 2]));
        assert_eq!(options.render.title.as_deref(), Some("CV"));
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = WriterRegistry::with_defaults();
        for ext in ["docx", "html", "htm", "md", "markdown", "txt", "json"] {
            assert!(registry.supports(ext), "missing {}", ext);
        }
        assert!(registry.supports("DOCX"));
        assert!(registry.supports(".Html"));
        assert!(!registry.supports("pdf"));
    }

    #[test]
    fn test_registry_lookup() {
        let registry = WriterRegistry::with_defaults();
        assert_eq!(registry.get_by_extension("HTM").unwrap().name(), "html");
        assert_eq!(registry.get_by_name("Markdown").unwrap().name(), "markdown");
        assert!(registry.get_by_name("pptx").is_none());
    }

    #[test]
    fn test_resolve() {
        let registry = WriterRegistry::with_defaults();
        let writer = registry.resolve(None, Path::new("out/Resume.DOCX")).unwrap();
        assert_eq!(writer.name(), "docx");

        let writer = registry.resolve(Some("md"), Path::new("out.bin")).unwrap();
        assert_eq!(writer.name(), "markdown");

        assert!(matches!(
            registry.resolve(None, Path::new("out.pptx")),
            Err(Error::UnsupportedFormat(_))
        ));
        assert!(matches!(
            registry.resolve(None, Path::new("no_extension")),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_report_message() {
        let mut page = PageContent::new(1);
        page.nodes.push(ContentNode::new(NodeKind::Name, "Jane Doe"));
        page.nodes.push(
            ContentNode::new(NodeKind::SectionHeader, "Skills").with_heading_level(1),
        );
        page.nodes
            .push(ContentNode::new(NodeKind::Paragraph, "Rust and Go."));
        let doc = StructuredDocument {
            pages: vec![page],
            ..Default::default()
        };

        let report = ConvertReport::new(
            &doc,
            &RenderOptions::default(),
            &DocxWriter,
            Path::new("in.pdf"),
            Path::new("out.docx"),
            10,
        );
        assert_eq!(
            report.message(),
            "Successfully converted PDF to Word. Created 2 headings and 1 paragraphs."
        );
        assert_eq!(report.node_counts[&NodeKind::Paragraph], 1);
    }

    #[test]
    fn test_outcome_json() {
        let ok = Outcome::ok("done");
        assert_eq!(ok.to_json(), r#"{"success":true,"message":"done"}"#);

        let failed = Outcome::failure("Input file not found: x.pdf");
        assert_eq!(
            failed.to_json(),
            r#"{"success":false,"error":"Input file not found: x.pdf"}"#
        );

        let result: Result<u32> = Err(Error::InvalidRotation(45));
        let outcome = Outcome::from_result(&result, |n| n.to_string());
        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("45"));
    }
}
