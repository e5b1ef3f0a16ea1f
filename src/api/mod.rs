// ==========================================
// Fuel Ledger - API layer
// ==========================================
// Responsibility: run entry points for the CLI and embedding callers
// ==========================================

pub mod error;
pub mod ledger_api;

pub use error::{ApiError, ApiResult};
pub use ledger_api::{summary_json, LedgerApi};
