// ==========================================
// Fuel Ledger - API error types
// ==========================================
// Responsibility: run-aborting failures, mapped from the lower layers
// Red line: only boundary failures land here; skips and rejections are counters
// ==========================================

use crate::config::ConfigError;
use crate::importer::ImportError;
use crate::workbook::WorkbookError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // Boundary inputs
    // ==========================================
    #[error("transcript not found: {0}")]
    TranscriptNotFound(String),

    #[error("ledger workbook not found: {0}")]
    WorkbookNotFound(String),

    #[error("no usable sheet among: {}", .0.join(", "))]
    NoUsableSheet(Vec<String>),

    #[error("sheet not found: {0}")]
    SheetNotFound(String),

    // ==========================================
    // Layer failures
    // ==========================================
    #[error("ledger storage failed: {0}")]
    StorageError(String),

    #[error("transcript import failed: {0}")]
    ImportError(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),

    // ==========================================
    // General
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<WorkbookError> for ApiError {
    fn from(err: WorkbookError) -> Self {
        match err {
            WorkbookError::NotFound(path) => ApiError::WorkbookNotFound(path),
            WorkbookError::SheetNotFound(name) => ApiError::SheetNotFound(name),
            WorkbookError::Other(err) => ApiError::Other(err),
            other => ApiError::StorageError(other.to_string()),
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::TranscriptNotFound(path) => ApiError::TranscriptNotFound(path),
            ImportError::Other(err) => ApiError::Other(err),
            other => ApiError::ImportError(other.to_string()),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::SerializationError(err.to_string())
    }
}

/// Result alias
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_errors_keep_their_kind() {
        let err: ApiError = WorkbookError::NotFound("ledger.db".into()).into();
        assert!(matches!(err, ApiError::WorkbookNotFound(p) if p == "ledger.db"));

        let err: ApiError = ImportError::TranscriptNotFound("chat.txt".into()).into();
        assert!(matches!(err, ApiError::TranscriptNotFound(p) if p == "chat.txt"));

        let err: ApiError = WorkbookError::StorageError("disk full".into()).into();
        assert_eq!(err.to_string(), "ledger storage failed: ledger database error: disk full");
    }

    #[test]
    fn test_no_usable_sheet_message() {
        let err = ApiError::NoUsableSheet(vec!["fuel capture".into(), "MS CAPTURE".into()]);
        assert_eq!(err.to_string(), "no usable sheet among: fuel capture, MS CAPTURE");
    }

    #[test]
    fn test_json_failure_maps_to_serialization_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ApiError = json_err.into();
        assert!(matches!(err, ApiError::SerializationError(_)));
    }
}
