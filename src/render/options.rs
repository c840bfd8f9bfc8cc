//! Rendering options and configuration.

use crate::pages::PageSelection;

/// Options for rendering a structured document.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Page selection
    pub page_selection: PageSelection,

    /// Insert page breaks between pages (DOCX, HTML print layout)
    pub page_breaks: bool,

    /// Emit a "Page N" heading per page (HTML)
    pub page_headings: bool,

    /// Document title; falls back to metadata title, then the name node
    pub title: Option<String>,

    /// JSON layout
    pub json_format: JsonFormat,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set page selection.
    pub fn with_pages(mut self, selection: PageSelection) -> Self {
        self.page_selection = selection;
        self
    }

    /// Enable or disable page breaks.
    pub fn with_page_breaks(mut self, enabled: bool) -> Self {
        self.page_breaks = enabled;
        self
    }

    /// Enable or disable per-page headings.
    pub fn with_page_headings(mut self, enabled: bool) -> Self {
        self.page_headings = enabled;
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the JSON layout.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_selection: PageSelection::All,
            page_breaks: true,
            page_headings: false,
            title: None,
            json_format: JsonFormat::Pretty,
        }
    }
}

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}
