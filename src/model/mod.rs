//! Document model types.
//!
//! Lines and character records come in from extraction, classified
//! [`ContentNode`]s go out to the writers. The model is format-agnostic.

mod document;
mod line;
mod node;
mod table;

pub use document::{Metadata, PageContent, StructuredDocument};
pub(crate) use line::clamp_position;
pub use line::{CharRecord, Line, DEFAULT_FONT_SIZE};
pub use node::{ContentNode, NodeFormat, NodeKind};
pub use table::Table;
