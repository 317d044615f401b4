//! Error types for the study-guide pipeline.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building the study guide.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The external text extractor could not be run or exited nonzero.
    #[error("text extraction failed: {0}")]
    Extract(String),

    /// The extractor produced bytes that are not valid UTF-8.
    #[error("extractor output was not valid UTF-8")]
    NonUtf8Output,

    /// The extractor ran but produced no text at all.
    ///
    /// This usually means the PDF has no text layer or poppler is not
    /// installed correctly. Continuing would produce empty sections.
    #[error("extraction produced no text for {0}")]
    EmptyExtraction(PathBuf),

    /// A configured section marker was never found in the document.
    #[error("section {section}: marker {marker:?} not found in document")]
    MarkerNotFound { section: u32, marker: String },

    /// Error in the lopdf layer (loading or saving page ranges).
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// A computed page range is not usable.
    #[error("invalid page range: {0}")]
    InvalidPageRange(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {0}")]
    Config(String),

    /// Error assembling markdown or HTML output.
    #[error("rendering error: {0}")]
    Render(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}
