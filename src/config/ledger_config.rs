// ==========================================
// Fuel Ledger - Ledger configuration
// ==========================================
// Responsibility: sheet names, label-variant table, numeric fields,
//                 supplier allow-list, technician roster, output dirs
// Storage: optional JSON file, every key defaults to the built-in value
// ==========================================

use crate::config::technician_roster::default_roster;
use crate::domain::entry::fields;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config read failed ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("config parse failed ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Label variants recognized for one canonical field.
///
/// The table is an ordered list: the first field whose variant matches a
/// line claims that line, and variants are tried in the listed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldLabels {
    pub field: String,
    pub variants: Vec<String>,
}

impl FieldLabels {
    pub fn new(field: &str, variants: &[&str]) -> Self {
        Self {
            field: field.to_string(),
            variants: variants.iter().map(|v| v.to_string()).collect(),
        }
    }
}

/// Sites assigned to one technician
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicianAssignment {
    pub technician: String,
    pub sites: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Sheet receiving ordinary entries
    pub primary_sheet: String,
    /// Sheet receiving entries whose Site ID starts with `secondary_site_prefix`
    pub secondary_sheet: String,
    pub secondary_site_prefix: String,
    /// Phrase (case-insensitive) opening each event in a transcript
    pub block_delimiter: String,
    pub field_labels: Vec<FieldLabels>,
    /// Fields coerced to numbers without the FAULTY sentinel
    pub numeric_fields: Vec<String>,
    /// Fields coerced to numbers that keep FAULTY on parse failure
    pub run_hour_fields: Vec<String>,
    /// Field that later lines may overwrite
    pub overwritable_field: String,
    pub suppliers: Vec<String>,
    pub technicians: Vec<TechnicianAssignment>,
    /// Defaults to `<ledger dir>/backups`
    pub backup_dir: Option<PathBuf>,
    /// Defaults to `<ledger dir>/unmatched_blocks`
    pub unmatched_dir: Option<PathBuf>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            primary_sheet: "fuel capture".to_string(),
            secondary_sheet: "MS CAPTURE".to_string(),
            secondary_site_prefix: "T3".to_string(),
            block_delimiter: "REFUELING TEMPLATE".to_string(),
            field_labels: default_field_labels(),
            numeric_fields: vec![
                fields::FUEL_ADDED.to_string(),
                fields::FUEL_FOUND.to_string(),
                fields::CPH.to_string(),
            ],
            run_hour_fields: vec![
                fields::CURRENT_DG_RUN_HOURS.to_string(),
                fields::PREVIOUS_DG_RUN_HOURS.to_string(),
            ],
            overwritable_field: fields::NAME_OF_TECHNICIAN.to_string(),
            suppliers: ["SAHARA", "MERU", "PUMA", "CCS FUEL", "TOTAL"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            technicians: default_roster(),
            backup_dir: None,
            unmatched_dir: None,
        }
    }
}

/// Built-in label table. Order is load-bearing.
pub fn default_field_labels() -> Vec<FieldLabels> {
    vec![
        FieldLabels::new(
            fields::CURRENT_DG_RUN_HOURS,
            &["Rt", "DG Current Run Time", "GD Run Time", "GD Run", "Runtime", "runtime"],
        ),
        FieldLabels::new(
            fields::PREVIOUS_DG_RUN_HOURS,
            &["Pre Rt", "Previous Run Time", "Previous", "Previous Run time", "Previous runtime"],
        ),
        FieldLabels::new(
            fields::FUEL_FOUND,
            &["Fuel found", "Initial fuel level", "Initial", "Fuel Total", "initial"],
        ),
        FieldLabels::new(
            fields::FUEL_ADDED,
            &["Fuel added", "Fuel Added", "Added", "fuel added"],
        ),
        FieldLabels::new(
            fields::SITE_ID,
            &["Site ID", "cbt", "CBT", "Site id", "site id", "SiteID", "Site Id"],
        ),
        FieldLabels::new(
            fields::SITE_NAME,
            &["Site name", "Site Name", "Name", "site name"],
        ),
        FieldLabels::new(fields::SUPPLIER, &["Fuel source", "Source"]),
        FieldLabels::new(fields::DATE, &["Date"]),
        FieldLabels::new(fields::CPH, &["CPH"]),
        FieldLabels::new(fields::NAME_OF_TECHNICIAN, &["Technician", "Tech"]),
    ]
}

impl LedgerConfig {
    /// Load a JSON config file; a missing file yields the defaults
    ///
    /// # Arguments
    /// - path: config file path
    ///
    /// # Returns
    /// - Ok(LedgerConfig): validated configuration
    /// - Err: unreadable file, malformed JSON, or invalid values
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: LedgerConfig =
            serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        config.validate()?;
        info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.primary_sheet.trim().is_empty() || self.secondary_sheet.trim().is_empty() {
            return Err(ConfigError::Invalid("sheet names must not be empty".to_string()));
        }
        if self.block_delimiter.trim().is_empty() {
            return Err(ConfigError::Invalid("block delimiter must not be empty".to_string()));
        }
        if self.field_labels.is_empty() {
            return Err(ConfigError::Invalid("label table must not be empty".to_string()));
        }
        if let Some(labels) = self
            .field_labels
            .iter()
            .find(|l| l.variants.iter().any(|v| v.trim().is_empty()))
        {
            return Err(ConfigError::Invalid(format!(
                "blank label variant for field '{}'",
                labels.field
            )));
        }
        Ok(())
    }

    /// Both target sheets, primary first
    pub fn sheet_names(&self) -> Vec<String> {
        vec![self.primary_sheet.clone(), self.secondary_sheet.clone()]
    }

    /// Backup directory for a ledger at `ledger_path` (cwd when unknown)
    pub fn backup_dir_for(&self, ledger_path: Option<&Path>) -> PathBuf {
        self.backup_dir
            .clone()
            .unwrap_or_else(|| sibling_dir(ledger_path, "backups"))
    }

    /// Unmatched-block export directory for a ledger at `ledger_path`
    pub fn unmatched_dir_for(&self, ledger_path: Option<&Path>) -> PathBuf {
        self.unmatched_dir
            .clone()
            .unwrap_or_else(|| sibling_dir(ledger_path, "unmatched_blocks"))
    }
}

fn sibling_dir(ledger_path: Option<&Path>, name: &str) -> PathBuf {
    let base = ledger_path
        .and_then(Path::parent)
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));
    base.join(name)
}
