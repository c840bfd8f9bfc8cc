//! Error types for pdfconv.

use std::io;
use thiserror::Error;

/// Result type alias for pdfconv operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting or editing documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted and cannot be read.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error extracting text content.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// Extraction produced nothing that could be structured.
    #[error("No text content could be extracted from the document")]
    NoContent,

    /// Error while writing an output format.
    #[error("Rendering error: {0}")]
    Render(String),

    /// No writer is registered for the requested output format.
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// Rotation angle other than 90, 180 or 270 degrees.
    #[error("Invalid rotation angle: {0}. Must be 90, 180, or 270 degrees")]
    InvalidRotation(i64),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Render(format!("DOCX packaging error: {}", err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}
