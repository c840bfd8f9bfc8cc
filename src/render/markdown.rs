//! Markdown rendering for structured documents.

use crate::error::Result;
use crate::model::{ContentNode, NodeKind, PageContent, StructuredDocument, Table};

use super::style::{outline_level, strip_bullet};
use super::RenderOptions;

/// Convert a document to Markdown.
pub fn to_markdown(doc: &StructuredDocument, options: &RenderOptions) -> Result<String> {
    MarkdownRenderer::new(options.clone()).render(doc)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
    in_list: bool,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            in_list: false,
        }
    }

    /// Render a document to Markdown.
    pub fn render(mut self, doc: &StructuredDocument) -> Result<String> {
        let mut output = String::new();

        if let Some(ref title) = self.options.title {
            output.push_str(&format!("# {}\n\n", escape_markdown(title)));
        }

        for page in &doc.pages {
            if self.options.page_selection.includes(page.number) {
                self.render_page(&mut output, page);
            }
        }

        Ok(output.trim().to_string())
    }

    fn render_page(&mut self, output: &mut String, page: &PageContent) {
        for node in &page.nodes {
            self.render_node(output, node);
        }
        self.end_list(output);
    }

    fn render_node(&mut self, output: &mut String, node: &ContentNode) {
        if node.kind == NodeKind::ListItem {
            self.in_list = true;
            output.push_str("- ");
            output.push_str(&escape_markdown(strip_bullet(&node.text)));
            output.push('\n');
            return;
        }
        self.end_list(output);

        let text = escape_markdown(&node.text);
        match node.kind {
            NodeKind::Name | NodeKind::SectionHeader => {
                let level = outline_level(node).unwrap_or(2) as usize;
                output.push_str(&"#".repeat(level));
                output.push(' ');
                output.push_str(&text);
            }
            NodeKind::JobTitle => output.push_str(&format!("**{}**", text)),
            NodeKind::CompanyDate => output.push_str(&format!("*{}*", text)),
            NodeKind::Table => {
                if let Some(ref table) = node.table {
                    render_table(output, table);
                }
                return;
            }
            _ => output.push_str(&text),
        }
        output.push_str("\n\n");
    }

    fn end_list(&mut self, output: &mut String) {
        if self.in_list {
            output.push('\n');
            self.in_list = false;
        }
    }
}

fn render_table(output: &mut String, table: &Table) {
    let col_count = table.column_count();
    if col_count == 0 {
        return;
    }

    for row in 0..table.row_count() {
        output.push('|');
        for col in 0..col_count {
            let content = escape_markdown(table.cell(row, col)).replace('\n', " ");
            output.push_str(&format!(" {} |", content));
        }
        output.push('\n');

        if row == 0 {
            output.push('|');
            for _ in 0..col_count {
                output.push_str(" --- |");
            }
            output.push('\n');
        }
    }

    output.push('\n');
}

/// Escape special Markdown characters.
/// Only characters that could be misread as inline syntax are escaped.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resume() -> StructuredDocument {
        let mut page = PageContent::new(1);
        page.nodes.push(ContentNode::new(NodeKind::Name, "Jane Doe"));
        page.nodes.push(ContentNode::new(
            NodeKind::Contact,
            "jane@example.com | 555-123-4567",
        ));
        page.nodes.push(
            ContentNode::new(NodeKind::SectionHeader, "Experience").with_heading_level(1),
        );
        page.nodes
            .push(ContentNode::new(NodeKind::JobTitle, "Senior Engineer"));
        page.nodes
            .push(ContentNode::new(NodeKind::CompanyDate, "Acme Corp 2019 - 2023"));
        page.nodes
            .push(ContentNode::new(NodeKind::ListItem, "• Led a team"));
        page.nodes
            .push(ContentNode::new(NodeKind::ListItem, "• Shipped v2"));
        page.nodes.push(ContentNode::new(
            NodeKind::Paragraph,
            "Worked on distributed systems.",
        ));
        StructuredDocument {
            pages: vec![page],
            ..Default::default()
        }
    }

    #[test]
    fn test_resume_markdown() {
        let md = to_markdown(&resume(), &RenderOptions::default()).unwrap();

        assert!(md.starts_with("# Jane Doe\n\n"));
        assert!(md.contains("jane@example.com \\| 555-123-4567"));
        assert!(md.contains("## Experience\n\n"));
        assert!(md.contains("**Senior Engineer**"));
        assert!(md.contains("*Acme Corp 2019 - 2023*"));
        assert!(md.contains("- Led a team\n- Shipped v2\n\nWorked on"));
    }

    #[test]
    fn test_table_markdown() {
        let table =
            Table::from_rows(vec![vec!["Skill", "Level"], vec!["Rust", "Expert"]]).unwrap();
        let mut page = PageContent::new(1);
        page.nodes.push(ContentNode::table(table));
        let doc = StructuredDocument {
            pages: vec![page],
            ..Default::default()
        };

        let md = to_markdown(&doc, &RenderOptions::default()).unwrap();
        assert!(md.contains("| Skill | Level |"));
        assert!(md.contains("| --- | --- |"));
        assert!(md.contains("| Rust | Expert |"));
    }

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("*bold*"), "\\*bold\\*");
        assert_eq!(escape_markdown("a_b"), "a\\_b");
        assert_eq!(escape_markdown("Hello, world."), "Hello, world.");
    }
}
