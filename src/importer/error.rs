// ==========================================
// Fuel Ledger - Importer error types
// ==========================================
// Tooling: thiserror derive
// ==========================================

use thiserror::Error;

/// Importer error type
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== File errors =====
    #[error("transcript not found: {0}")]
    TranscriptNotFound(String),

    #[error("transcript read failed: {0}")]
    TranscriptReadError(String),

    // ===== Export errors =====
    #[error("unmatched-block export failed: {0}")]
    ExportError(String),

    #[error("CSV write failed: {0}")]
    CsvWriteError(String),

    // ===== Setup errors =====
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    // ===== General =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::TranscriptReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvWriteError(err.to_string())
    }
}

/// Result alias
pub type ImportResult<T> = Result<T, ImportError>;
