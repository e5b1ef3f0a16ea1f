// ==========================================
// Fuel Ledger - Domain layer
// ==========================================
// Responsibility: entries, cell values, run reports
// ==========================================

pub mod cell;
pub mod entry;
pub mod report;

pub use cell::{CellValue, LEDGER_DATE_FORMAT};
pub use entry::{fields, Entry, FieldValue, NumericReading, FAULTY, NOT_ASSIGNED};
pub use report::{
    IngestionSummary, PropagationRunSummary, PropagationSummary, UnmatchedBlock, WriteSummary,
};
