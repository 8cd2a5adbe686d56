//! Error types for docfix operations.

use thiserror::Error;

/// Errors that can occur during a correction cycle.
#[derive(Error, Debug)]
pub enum Error {
    /// The markup could not be parsed, or its root is not `w:document > w:body`.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// A marker recorded at scan time is no longer where the rewriter expects it.
    #[error("Corrupted document: {0}")]
    CorruptedDocument(String),

    /// A correction lookup failed; no correction of the cycle was applied.
    #[error("Resolution failed: {0}")]
    Resolution(String),

    /// Unpacking or repacking the zip bundle failed.
    #[error("Packaging failed: {0}")]
    Packaging(String),

    #[error("No document was provided")]
    MissingDocument,

    #[error("Document is {size} bytes, limit is {limit}")]
    DocumentTooLarge { size: u64, limit: u64 },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Coarse message safe to show to whoever submitted the document.
    ///
    /// Internal detail is never echoed; it belongs in the logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            Error::MalformedDocument(_) => "The uploaded file may be corrupted.",
            Error::CorruptedDocument(_) | Error::Resolution(_) => {
                "Failed to retrieve or apply spelling suggestions."
            }
            Error::Packaging(_) | Error::Io(_) => "Failed to read or update the docx file.",
            Error::MissingDocument => "No file was provided.",
            Error::DocumentTooLarge { .. } => "The file is too large.",
            Error::Config(_) => "Invalid configuration.",
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(e: quick_xml::Error) -> Self {
        Error::MalformedDocument(e.to_string())
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(e: zip::result::ZipError) -> Self {
        Error::Packaging(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Resolution(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
