//! Document-level types.

use super::{ContentNode, NodeKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The classified content of one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageContent {
    /// Page number (1-indexed)
    pub number: u32,

    /// Nodes in reading order
    pub nodes: Vec<ContentNode>,
}

impl PageContent {
    /// Create an empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            nodes: Vec::new(),
        }
    }

    /// Check if the page produced no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A document rebuilt into classified nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredDocument {
    /// Document metadata (title, author, etc.)
    pub metadata: Metadata,

    /// Pages in source order
    pub pages: Vec<PageContent>,
}

impl StructuredDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, number: u32) -> Option<&PageContent> {
        self.pages.iter().find(|p| p.number == number)
    }

    /// Iterate over every node of every page.
    pub fn nodes(&self) -> impl Iterator<Item = &ContentNode> {
        self.pages.iter().flat_map(|p| p.nodes.iter())
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.pages.iter().map(|p| p.nodes.len()).sum()
    }

    /// Check if the document has no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    /// Number of nodes per kind.
    pub fn kind_counts(&self) -> BTreeMap<NodeKind, usize> {
        let mut counts = BTreeMap::new();
        for node in self.nodes() {
            *counts.entry(node.kind).or_insert(0) += 1;
        }
        counts
    }

    /// Document title: metadata title, else the first name node.
    pub fn title(&self) -> Option<&str> {
        self.metadata
            .title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| {
                self.nodes()
                    .find(|n| n.kind == NodeKind::Name)
                    .map(|n| n.text.as_str())
            })
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| {
                page.nodes
                    .iter()
                    .map(ContentNode::plain_text)
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Creator application
    pub creator: Option<String>,

    /// PDF producer
    pub producer: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,

    /// PDF version (e.g., "1.7")
    pub pdf_version: String,

    /// Total number of pages in the source
    pub page_count: u32,

    /// Whether the source is encrypted
    pub encrypted: bool,
}

impl Metadata {
    /// Create new metadata with PDF version.
    pub fn with_version(version: impl Into<String>) -> Self {
        Self {
            pdf_version: version.into(),
            ..Default::default()
        }
    }
}
