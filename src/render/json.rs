//! JSON rendering for structured documents.

use crate::error::{Error, Result};
use crate::model::StructuredDocument;

use super::{JsonFormat, RenderOptions};

/// Convert a document to JSON.
pub fn to_json(doc: &StructuredDocument, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Convert the selected pages of a document to JSON.
pub fn to_json_with_options(doc: &StructuredDocument, options: &RenderOptions) -> Result<String> {
    match options.page_selection {
        crate::pages::PageSelection::All => to_json(doc, options.json_format),
        ref selection => {
            let filtered = StructuredDocument {
                metadata: doc.metadata.clone(),
                pages: doc
                    .pages
                    .iter()
                    .filter(|p| selection.includes(p.number))
                    .cloned()
                    .collect(),
            };
            to_json(&filtered, options.json_format)
        }
    }
}
