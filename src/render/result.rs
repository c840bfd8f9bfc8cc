//! Statistics over the rendered node sequence.

use crate::model::{NodeKind, StructuredDocument};
use crate::pages::PageSelection;
use serde::{Deserialize, Serialize};

/// Counts collected from the pages that were rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Number of pages rendered
    pub page_count: u32,

    /// Name and section header nodes
    pub heading_count: u32,

    /// Every other text node
    pub paragraph_count: u32,

    /// Bulleted and numbered items
    pub list_item_count: u32,

    /// Table nodes
    pub table_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics for the selected pages of a document.
    pub fn from_document(doc: &StructuredDocument, selection: &PageSelection) -> Self {
        let mut stats = Self::new();
        for page in doc.pages.iter().filter(|p| selection.includes(p.number)) {
            stats.page_count += 1;
            for node in &page.nodes {
                stats.add_node(node.kind);
                stats.count_text(&node.plain_text());
            }
        }
        stats
    }

    /// Count one node.
    pub fn add_node(&mut self, kind: NodeKind) {
        match kind {
            NodeKind::Name | NodeKind::SectionHeader => self.heading_count += 1,
            NodeKind::Table => self.table_count += 1,
            NodeKind::ListItem | NodeKind::NumberedItem => {
                self.list_item_count += 1;
                self.paragraph_count += 1;
            }
            _ => self.paragraph_count += 1,
        }
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentNode, PageContent};

    #[test]
    fn test_extraction_stats_count_text() {
        let mut stats = ExtractionStats::new();
        stats.count_text("Hello, world! This is a test.");

        assert_eq!(stats.word_count, 6);
        assert_eq!(stats.char_count, 24);
    }

    #[test]
    fn test_from_document_respects_selection() {
        let mut page1 = PageContent::new(1);
        page1.nodes.push(ContentNode::new(NodeKind::Name, "Jane Doe"));
        page1
            .nodes
            .push(ContentNode::new(NodeKind::ListItem, "• Built things"));
        let mut page2 = PageContent::new(2);
        page2
            .nodes
            .push(ContentNode::new(NodeKind::Paragraph, "More text"));
        let doc = StructuredDocument {
            pages: vec![page1, page2],
            ..Default::default()
        };

        let all = ExtractionStats::from_document(&doc, &PageSelection::All);
        assert_eq!(all.page_count, 2);
        assert_eq!(all.heading_count, 1);
        assert_eq!(all.paragraph_count, 2);
        assert_eq!(all.list_item_count, 1);

        let first = ExtractionStats::from_document(&doc, &PageSelection::pages([1]));
        assert_eq!(first.page_count, 1);
        assert_eq!(first.paragraph_count, 1);
    }
}
