//! Line-level input types.

use serde::{Deserialize, Serialize};

/// Nominal body font size used when a line carries no size information.
pub const DEFAULT_FONT_SIZE: f32 = 12.0;

/// A positioned text fragment supplied by an extraction backend.
///
/// Fragments may be single glyphs (character-level extractors) or whole
/// show-text runs (content-stream extractors).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharRecord {
    /// Text fragment
    pub text: String,

    /// Horizontal position (left edge)
    pub x: f32,

    /// Vertical position (baseline or top, see `VerticalAxis`)
    pub y: f32,

    /// Advance width of the fragment, when known
    pub width: Option<f32>,

    /// Font size in points
    pub font_size: Option<f32>,

    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: Option<String>,
}

impl CharRecord {
    /// Create a record without font information.
    pub fn new(text: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            width: None,
            font_size: None,
            font_name: None,
        }
    }

    /// Attach font information.
    pub fn with_font(mut self, name: impl Into<String>, size: f32) -> Self {
        self.font_name = Some(name.into());
        self.font_size = Some(size);
        self
    }

    /// Attach an advance width.
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    /// Font size if it is usable (finite and positive).
    pub fn valid_font_size(&self) -> Option<f32> {
        self.font_size.filter(|s| s.is_finite() && *s > 0.0)
    }

    /// Whether the font name marks a bold face.
    pub fn is_bold(&self) -> bool {
        self.font_name
            .as_deref()
            .map(|n| n.to_lowercase().contains("bold"))
            .unwrap_or(false)
    }

    /// Whether the font name marks an italic face.
    pub fn is_italic(&self) -> bool {
        self.font_name
            .as_deref()
            .map(|n| {
                let n = n.to_lowercase();
                n.contains("italic") || n.contains("oblique")
            })
            .unwrap_or(false)
    }
}

/// One visually distinct row of text on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Raw text of the row
    pub text: String,

    /// Average font size; `None` when the extractor supplied no metrics
    pub font_size: Option<f32>,

    /// Whether any contributing fragment used a bold face
    pub bold: bool,

    /// Whether any contributing fragment used an italic face
    pub italic: bool,

    /// Vertical position (page-relative)
    pub y: f32,

    /// Horizontal position of the leftmost fragment
    pub x: Option<f32>,

    /// Whether this is the first usable line of the whole document
    pub is_first_line: bool,
}

impl Line {
    /// Create a plain line without formatting metadata.
    pub fn plain(text: impl Into<String>, y: f32) -> Self {
        Self {
            text: text.into(),
            font_size: None,
            bold: false,
            italic: false,
            y: clamp_position(y),
            x: None,
            is_first_line: false,
        }
    }

    /// Create a line with formatting metadata.
    ///
    /// Unusable font sizes (NaN, infinite, zero or negative) are replaced with
    /// the nominal body size.
    pub fn styled(text: impl Into<String>, font_size: f32, bold: bool, y: f32) -> Self {
        let font_size = if font_size.is_finite() && font_size > 0.0 {
            font_size
        } else {
            DEFAULT_FONT_SIZE
        };
        Self {
            text: text.into(),
            font_size: Some(font_size),
            bold,
            italic: false,
            y: clamp_position(y),
            x: None,
            is_first_line: false,
        }
    }

    /// Mark this line as the first line of the document.
    pub fn first(mut self) -> Self {
        self.is_first_line = true;
        self
    }

    /// Set the italic flag.
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Set the horizontal position.
    pub fn with_x(mut self, x: f32) -> Self {
        self.x = Some(clamp_position(x));
        self
    }

    /// Whether font metrics are available for this line.
    pub fn has_metrics(&self) -> bool {
        self.font_size.is_some()
    }

    /// Font size with the nominal default applied.
    pub fn effective_font_size(&self) -> f32 {
        self.font_size.unwrap_or(DEFAULT_FONT_SIZE)
    }

    /// Trimmed text.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Whether the line has no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Replace non-finite coordinates with the page origin.
pub(crate) fn clamp_position(v: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}
