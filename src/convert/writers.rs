//! Built-in output writers.

use crate::error::Result;
use crate::model::StructuredDocument;
use crate::render::{self, RenderOptions};

use super::DocumentWriter;

/// Word (`.docx`) writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxWriter;

impl DocumentWriter for DocxWriter {
    fn name(&self) -> &str {
        "docx"
    }

    fn extensions(&self) -> &[&str] {
        &["docx"]
    }

    fn mime_type(&self) -> &str {
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    }

    fn write(&self, doc: &StructuredDocument, options: &RenderOptions) -> Result<Vec<u8>> {
        render::to_docx(doc, options)
    }
}

/// Standalone HTML writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlWriter;

impl DocumentWriter for HtmlWriter {
    fn name(&self) -> &str {
        "html"
    }

    fn extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn mime_type(&self) -> &str {
        "text/html"
    }

    fn write(&self, doc: &StructuredDocument, options: &RenderOptions) -> Result<Vec<u8>> {
        render::to_html(doc, options).map(String::into_bytes)
    }
}

/// Markdown writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownWriter;

impl DocumentWriter for MarkdownWriter {
    fn name(&self) -> &str {
        "markdown"
    }

    fn extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn mime_type(&self) -> &str {
        "text/markdown"
    }

    fn write(&self, doc: &StructuredDocument, options: &RenderOptions) -> Result<Vec<u8>> {
        render::to_markdown(doc, options).map(String::into_bytes)
    }
}

/// Plain text writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextWriter;

impl DocumentWriter for TextWriter {
    fn name(&self) -> &str {
        "text"
    }

    fn extensions(&self) -> &[&str] {
        &["txt", "text"]
    }

    fn mime_type(&self) -> &str {
        "text/plain"
    }

    fn write(&self, doc: &StructuredDocument, options: &RenderOptions) -> Result<Vec<u8>> {
        render::to_text(doc, options).map(String::into_bytes)
    }
}

/// JSON writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonWriter;

impl DocumentWriter for JsonWriter {
    fn name(&self) -> &str {
        "json"
    }

    fn extensions(&self) -> &[&str] {
        &["json"]
    }

    fn mime_type(&self) -> &str {
        "application/json"
    }

    fn write(&self, doc: &StructuredDocument, options: &RenderOptions) -> Result<Vec<u8>> {
        render::to_json_with_options(doc, options).map(String::into_bytes)
    }
}
