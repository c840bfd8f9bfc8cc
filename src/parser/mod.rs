//! PDF text extraction.

mod layout;
mod options;
mod pdf_parser;

pub use layout::SpanExtractor;
pub use options::{ErrorMode, ExtractMode, ParseOptions};
pub use pdf_parser::PdfSource;
