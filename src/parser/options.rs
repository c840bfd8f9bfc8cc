//! Extraction options.

use crate::pages::PageSelection;

/// Options for extracting text from PDF documents.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// How text is extracted
    pub extract_mode: ExtractMode,

    /// Page selection (which pages to extract)
    pub pages: PageSelection,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (log and skip pages that fail).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set extract mode.
    pub fn with_extract_mode(mut self, mode: ExtractMode) -> Self {
        self.extract_mode = mode;
        self
    }

    /// Extract plain text lines only, without font metrics.
    pub fn plain_text(mut self) -> Self {
        self.extract_mode = ExtractMode::PlainText;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }
}

/// Error handling mode during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any page error
    #[default]
    Strict,
    /// Log page errors and continue with an empty page
    Lenient,
}

/// How text is pulled out of page content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractMode {
    /// Positioned spans with font metrics, plain text as fallback
    #[default]
    Full,
    /// Plain text lines only (classification without formatting)
    PlainText,
}
