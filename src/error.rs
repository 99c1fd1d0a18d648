//! Error handling for the resume scanner

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeScannerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("DOCX extraction error: {0}")]
    DocxExtraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    InputMissing(String),

    #[error("Could not extract text from '{source_id}': {reason}")]
    ExtractionFailure { source_id: String, reason: String },

    #[error("Degenerate scoring: {0}")]
    ScoringDegenerate(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ResumeScannerError>;

/// Convert anyhow errors from extraction helpers to our custom error type
impl From<anyhow::Error> for ResumeScannerError {
    fn from(err: anyhow::Error) -> Self {
        ResumeScannerError::Processing(format!("{:#}", err))
    }
}

impl From<regex::Error> for ResumeScannerError {
    fn from(err: regex::Error) -> Self {
        ResumeScannerError::Processing(format!("Invalid pattern: {}", err))
    }
}
