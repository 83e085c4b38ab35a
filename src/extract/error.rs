use thiserror::Error;

/// Errors that can occur during word extraction.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Missing file, missing extension or unsupported extension.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External tool not found: {0}")]
    ToolNotFound(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Archive entry not found: {0}")]
    MissingEntry(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractionError {
    /// Whether the failure is the caller's input rather than the document or tooling.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ExtractionError::InvalidInput(_))
    }
}
