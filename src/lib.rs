// ==========================================
// Fuel Ledger - Core library
// ==========================================
// Chat transcripts -> per-site refueling ledger
// Storage: SQLite ledger file (rusqlite), Excel import (calamine), CSV export
// ==========================================

// ==========================================
// Modules
// ==========================================

// Domain - entries, cells, run summaries
pub mod domain;

// Configuration - sheets, label table, roster, paths
pub mod config;

// Importer - transcript extraction
pub mod importer;

// Workbook - in-memory grid and its persistence
pub mod workbook;

// Engine - schema mapping, writing, propagation
pub mod engine;

// API - end-to-end runs
pub mod api;

// SQLite connection setup
pub mod db;

// Logging
pub mod logging;

// ==========================================
// Re-exports
// ==========================================

pub use api::{ApiError, ApiResult, LedgerApi};
pub use config::LedgerConfig;
pub use domain::{
    CellValue, Entry, FieldValue, IngestionSummary, NumericReading, PropagationRunSummary,
    PropagationSummary, UnmatchedBlock, WriteSummary,
};
pub use engine::{CallbackReporter, RunReporter, SilentReporter};
pub use importer::{BlockExtractor, Normalizer, TechnicianDirectory};
pub use workbook::{MemoryWorkbookStore, Sheet, SqliteWorkbookStore, Workbook, WorkbookStore};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
