// ==========================================
// Fuel Ledger - Configuration layer
// ==========================================
// Responsibility: injected, pure-data configuration
// Storage: optional JSON file (serde_json), defaults built in
// ==========================================

pub mod ledger_config;
pub mod paths;
pub mod technician_roster;

pub use ledger_config::{
    default_field_labels, ConfigError, ConfigResult, FieldLabels, LedgerConfig,
    TechnicianAssignment,
};
pub use paths::{default_config_path, default_ledger_path, unique_file_path};
pub use technician_roster::default_roster;
