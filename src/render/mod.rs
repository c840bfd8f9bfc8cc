//! Rendering module for writing structured documents to output formats.

mod docx;
mod html;
mod json;
mod markdown;
mod options;
mod result;
pub mod style;
mod text;

pub use docx::to_docx;
pub use html::{escape_html, to_html};
pub use json::{to_json, to_json_with_options};
pub use markdown::{to_markdown, MarkdownRenderer};
pub use options::{JsonFormat, RenderOptions};
pub use result::ExtractionStats;
pub use style::{style_for, Alignment, NodeStyle};
pub use text::to_text;
