// ==========================================
// Fuel Ledger - Workbook layer
// ==========================================
// Responsibility: the ledger as named sheets of cells, and its persistence
// Storage: SQLite ledger file; Excel import and CSV export at the edges
// ==========================================

pub mod backup;
pub mod csv_export;
pub mod error;
pub mod grid;
pub mod sqlite_store;
pub mod store;
pub mod xlsx_reader;

pub use backup::BackupService;
pub use csv_export::export_sheet;
pub use error::{WorkbookError, WorkbookResult};
pub use grid::{Sheet, Workbook};
pub use sqlite_store::SqliteWorkbookStore;
pub use store::{MemoryWorkbookStore, WorkbookStore};
pub use xlsx_reader::read_workbook;
