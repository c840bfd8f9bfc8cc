//! Document structure reconstruction.
//!
//! Extracted lines are classified into semantic roles (name, contact,
//! section header, job title, company/date, list item, numbered item,
//! paragraph) and merged into [`ContentNode`]s.
//!
//! Every function in this module is pure: the same input always yields the
//! same nodes.

pub mod breaks;
pub mod classify;
pub mod config;
pub mod features;
pub mod merge;
pub mod normalize;

pub use breaks::{break_reason, BreakReason};
pub use classify::{classify_line, classify_text, heading_level};
pub use config::StructureConfig;
pub use features::{lines_from_plain_text, lines_from_records, lines_from_text, VerticalAxis};
pub use merge::{assemble, PageAssembler};

use crate::error::{Error, Result};
use crate::model::{CharRecord, ContentNode, Line, Metadata, PageContent, StructuredDocument, Table};

/// What the extraction backend produced for one page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageExtraction {
    /// Positioned fragments with font metadata
    Positioned(Vec<CharRecord>),
    /// Pre-segmented lines without metadata
    PlainText(Vec<String>),
}

impl PageExtraction {
    /// Check if the extraction produced nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            PageExtraction::Positioned(records) => records.is_empty(),
            PageExtraction::PlainText(lines) => lines.iter().all(|l| l.trim().is_empty()),
        }
    }
}

/// Raw input for one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageInput {
    /// Page number (1-indexed)
    pub number: u32,

    /// Extracted text
    pub extraction: PageExtraction,

    /// Tables supplied by the extractor, appended after the text
    pub tables: Vec<Table>,
}

impl PageInput {
    /// Page from positioned fragments.
    pub fn positioned(number: u32, records: Vec<CharRecord>) -> Self {
        Self {
            number,
            extraction: PageExtraction::Positioned(records),
            tables: Vec::new(),
        }
    }

    /// Page from plain text lines.
    pub fn plain_text<S: Into<String>>(number: u32, lines: impl IntoIterator<Item = S>) -> Self {
        Self {
            number,
            extraction: PageExtraction::PlainText(lines.into_iter().map(Into::into).collect()),
            tables: Vec::new(),
        }
    }

    /// Empty page.
    pub fn empty(number: u32) -> Self {
        Self::plain_text(number, Vec::<String>::new())
    }

    /// Attach a table.
    pub fn with_table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }
}

/// Turns extracted pages into a [`StructuredDocument`].
#[derive(Debug, Clone, Default)]
pub struct StructureBuilder {
    config: StructureConfig,
    axis: VerticalAxis,
}

impl StructureBuilder {
    /// Create a builder with default thresholds and PDF (y-up) coordinates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom thresholds.
    pub fn with_config(mut self, config: StructureConfig) -> Self {
        self.config = config;
        self
    }

    /// Declare the vertical axis direction of positioned input.
    pub fn with_axis(mut self, axis: VerticalAxis) -> Self {
        self.axis = axis;
        self
    }

    /// Get the thresholds in use.
    pub fn config(&self) -> &StructureConfig {
        &self.config
    }

    /// Build a document from pages in source order.
    ///
    /// Returns [`Error::NoContent`] when no page yields a single node.
    pub fn build(&self, pages: Vec<PageInput>) -> Result<StructuredDocument> {
        self.build_with_metadata(pages, Metadata::default())
    }

    /// Build a document and attach metadata.
    pub fn build_with_metadata(
        &self,
        pages: Vec<PageInput>,
        metadata: Metadata,
    ) -> Result<StructuredDocument> {
        let mut doc = StructuredDocument {
            metadata,
            pages: Vec::with_capacity(pages.len()),
        };
        let mut first_line_seen = false;

        for page in pages {
            let mut lines = self.page_lines(&page.extraction);

            if !first_line_seen {
                first_line_seen = self.mark_first_line(&mut lines);
            }

            let mut assembler = PageAssembler::new(&self.config);
            for line in &lines {
                assembler.push(line);
            }
            for table in page.tables {
                assembler.push_table(table);
            }

            let nodes = assembler.finish();
            log::debug!(
                "Page {}: {} lines -> {} nodes",
                page.number,
                lines.len(),
                nodes.len()
            );
            doc.pages.push(PageContent {
                number: page.number,
                nodes,
            });
        }

        if doc.is_empty() {
            return Err(Error::NoContent);
        }
        Ok(doc)
    }

    /// Flag the first line that will survive normalization as the document's
    /// first line. Returns whether one was found.
    pub fn mark_first_line(&self, lines: &mut [Line]) -> bool {
        match lines.iter_mut().find(|l| self.is_usable(l)) {
            Some(line) => {
                line.is_first_line = true;
                true
            }
            None => false,
        }
    }

    /// Classify and merge lines that are already segmented.
    pub fn nodes_from_lines(&self, lines: &[Line]) -> Vec<ContentNode> {
        assemble(lines, &self.config)
    }

    fn page_lines(&self, extraction: &PageExtraction) -> Vec<Line> {
        match extraction {
            PageExtraction::Positioned(records) => lines_from_records(records, self.axis),
            PageExtraction::PlainText(texts) => lines_from_text(texts),
        }
    }

    /// A line that will survive normalization as a node.
    fn is_usable(&self, line: &Line) -> bool {
        normalize::normalize_text(&line.text).chars().count() >= self.config.min_node_chars
    }
}
