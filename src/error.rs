//! Error handling for the job assistant

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobAssistantError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error reading PDF: {0}")]
    PdfExtraction(String),

    #[error("Error reading DOCX: {0}")]
    DocxExtraction(String),

    #[error("Error reading text file: {0}")]
    TextExtraction(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Vocabulary error: {0}")]
    Vocabulary(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Template rendering error: {0}")]
    Template(#[from] askama::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Export failed for '{path}': {reason}")]
    Export { path: String, reason: String },

    /// Only ever logged: PDF export downgrades to text instead of surfacing this.
    #[error("PDF rendering error: {0}")]
    PdfRender(String),
}

pub type Result<T> = std::result::Result<T, JobAssistantError>;
