// ==========================================
// Fuel Ledger - Workbook error types
// ==========================================
// Tooling: thiserror derive
// ==========================================

use thiserror::Error;

/// Workbook storage error type
#[derive(Error, Debug)]
pub enum WorkbookError {
    // ===== File errors =====
    #[error("workbook not found: {0}")]
    NotFound(String),

    #[error("file operation failed: {0}")]
    Io(String),

    #[error("unsupported workbook format: {0} (expected .xlsx/.xls)")]
    UnsupportedFormat(String),

    // ===== Format errors =====
    #[error("Excel read failed: {0}")]
    ExcelError(String),

    #[error("CSV write failed: {0}")]
    CsvError(String),

    #[error("corrupt cell (sheet {sheet}, row {row}, column {column}): {message}")]
    CorruptCell {
        sheet: String,
        row: usize,
        column: usize,
        message: String,
    },

    // ===== Storage errors =====
    #[error("ledger database error: {0}")]
    StorageError(String),

    #[error("sheet not found: {0}")]
    SheetNotFound(String),

    // ===== General =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for WorkbookError {
    fn from(err: std::io::Error) -> Self {
        WorkbookError::Io(err.to_string())
    }
}

impl From<rusqlite::Error> for WorkbookError {
    fn from(err: rusqlite::Error) -> Self {
        WorkbookError::StorageError(err.to_string())
    }
}

impl From<csv::Error> for WorkbookError {
    fn from(err: csv::Error) -> Self {
        WorkbookError::CsvError(err.to_string())
    }
}

impl From<calamine::Error> for WorkbookError {
    fn from(err: calamine::Error) -> Self {
        WorkbookError::ExcelError(err.to_string())
    }
}

/// Result alias
pub type WorkbookResult<T> = Result<T, WorkbookError>;
