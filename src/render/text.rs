//! Plain text rendering for structured documents.

use crate::error::Result;
use crate::model::{NodeKind, StructuredDocument};

use super::style::strip_bullet;
use super::RenderOptions;

/// Convert a document to plain text, one node per paragraph.
pub fn to_text(doc: &StructuredDocument, options: &RenderOptions) -> Result<String> {
    let mut output = String::new();

    for page in doc
        .pages
        .iter()
        .filter(|p| options.page_selection.includes(p.number))
    {
        for node in &page.nodes {
            match node.kind {
                NodeKind::ListItem => {
                    output.push_str("• ");
                    output.push_str(strip_bullet(&node.text));
                }
                _ => output.push_str(&node.plain_text()),
            }
            output.push_str("\n\n");
        }
    }

    Ok(output.trim().to_string())
}
