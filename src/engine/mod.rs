// ==========================================
// Fuel Ledger - Engine layer
// ==========================================
// Responsibility: ledger rules over an in-memory workbook
// Red line: engine never loads, saves or backs up the ledger;
//           local failures become diagnostics, not errors
// ==========================================

pub mod progress;
pub mod propagator;
pub mod record_writer;
pub mod schema_mapper;

pub use progress::{
    phases, scaled, CallbackReporter, MonotonicProgress, RunReporter, SilentReporter,
};
pub use propagator::{group_by_site, PropagationOutcome, Propagator, REQUIRED_COLUMNS};
pub use record_writer::{RecordWriter, SheetCache, SkipReason, WriteOutcome};
pub use schema_mapper::{
    find_header_row, find_last_data_row, map_sheet, SheetInfo, HEADER_SCAN_LIMIT, HEADER_TOKENS,
};
