//! Classified content nodes.

use super::Table;
use serde::{Deserialize, Serialize};

/// Semantic role of a content node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Person's name at the top of the document
    Name,
    /// Email, phone, links and address lines
    Contact,
    /// Section header such as "Experience"
    SectionHeader,
    /// Role line such as "Senior Engineer"
    JobTitle,
    /// Employer and date range line
    CompanyDate,
    /// Bulleted list entry
    ListItem,
    /// Numbered or lettered list entry
    NumberedItem,
    /// Body paragraph
    Paragraph,
    /// Table passed through from extraction
    Table,
}

impl NodeKind {
    /// Every kind, in declaration order.
    pub const ALL: [NodeKind; 9] = [
        NodeKind::Name,
        NodeKind::Contact,
        NodeKind::SectionHeader,
        NodeKind::JobTitle,
        NodeKind::CompanyDate,
        NodeKind::ListItem,
        NodeKind::NumberedItem,
        NodeKind::Paragraph,
        NodeKind::Table,
    ];

    /// Snake-case identifier, as used in JSON output and CSS classes.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Name => "name",
            NodeKind::Contact => "contact",
            NodeKind::SectionHeader => "section_header",
            NodeKind::JobTitle => "job_title",
            NodeKind::CompanyDate => "company_date",
            NodeKind::ListItem => "list_item",
            NodeKind::NumberedItem => "numbered_item",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Table => "table",
        }
    }

    /// Whether writers render this kind as a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, NodeKind::Name | NodeKind::SectionHeader)
    }

    /// Whether adjacent lines of this kind may merge into one node.
    pub fn is_mergeable(&self) -> bool {
        matches!(self, NodeKind::Contact | NodeKind::Paragraph)
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Formatting hints aggregated from the source lines.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeFormat {
    /// Whether any source line was bold
    pub bold: bool,

    /// Whether any source line was italic
    pub italic: bool,

    /// Average font size of the source lines, when known
    pub font_size: Option<f32>,

    /// Number of source lines merged into this node
    pub merged_lines: usize,
}

/// One semantically classified unit of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentNode {
    /// Semantic role
    pub kind: NodeKind,

    /// Normalized text (empty for tables)
    pub text: String,

    /// Heading level, only for section headers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_level: Option<u8>,

    /// Formatting hints
    pub format: NodeFormat,

    /// Table rows, only for table nodes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<Table>,
}

impl ContentNode {
    /// Create a text node.
    pub fn new(kind: NodeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            heading_level: None,
            format: NodeFormat::default(),
            table: None,
        }
    }

    /// Create a table node.
    pub fn table(table: Table) -> Self {
        Self {
            kind: NodeKind::Table,
            text: String::new(),
            heading_level: None,
            format: NodeFormat::default(),
            table: Some(table),
        }
    }

    /// Set the heading level.
    pub fn with_heading_level(mut self, level: u8) -> Self {
        self.heading_level = Some(level);
        self
    }

    /// Set the formatting hints.
    pub fn with_format(mut self, format: NodeFormat) -> Self {
        self.format = format;
        self
    }

    /// Plain text of the node (tables flatten to tab-separated rows).
    pub fn plain_text(&self) -> String {
        match &self.table {
            Some(table) => table.plain_text(),
            None => self.text.clone(),
        }
    }
}
