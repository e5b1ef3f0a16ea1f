// ==========================================
// Fuel Ledger - Record writer
// ==========================================
// Responsibility: append accepted entries to their target sheet
// Gates (in order): target sheet -> visit date -> duplicate key
// Red line: skips are diagnostics + counters, never errors
// ==========================================

use crate::config::LedgerConfig;
use crate::domain::cell::LEDGER_DATE_FORMAT;
use crate::domain::entry::{fields, Entry};
use crate::domain::report::WriteSummary;
use crate::engine::progress::{phases, scaled, RunReporter};
use crate::engine::schema_mapper::{map_sheet, record_key, RecordKey, SheetInfo};
use crate::workbook::grid::Workbook;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::fmt;
use tracing::{info, warn};

/// Why an entry was not written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Target sheet absent or unusable
    MissingSheet(String),
    /// Visit date not after the sheet's latest date
    StaleDate { date: String, latest: NaiveDate },
    /// Visit date not in DD/MM/YYYY
    InvalidDate(String),
    Duplicate { date: String, run_hours: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingSheet(sheet) => {
                write!(f, "Target sheet '{}' not found in workbook", sheet)
            }
            SkipReason::StaleDate { date, latest } => write!(
                f,
                "Date {} is before or equal to last date {}",
                date,
                latest.format(LEDGER_DATE_FORMAT)
            ),
            SkipReason::InvalidDate(date) => write!(f, "Invalid date format '{}'", date),
            SkipReason::Duplicate { date, run_hours } => write!(
                f,
                "Duplicate entry (same Date: {} and Runtime: {})",
                date, run_hours
            ),
        }
    }
}

/// Result of writing one entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Added { sheet: String, row: usize },
    /// Written, but current run hours are FAULTY
    Faulty { sheet: String, row: usize },
    Skipped(SkipReason),
}

/// Working state of the target sheets for one run
pub type SheetCache = HashMap<String, SheetInfo>;

pub struct RecordWriter {
    primary_sheet: String,
    secondary_sheet: String,
    secondary_prefix: String,
}

impl RecordWriter {
    pub fn new(
        primary_sheet: impl Into<String>,
        secondary_sheet: impl Into<String>,
        secondary_prefix: impl Into<String>,
    ) -> Self {
        Self {
            primary_sheet: primary_sheet.into(),
            secondary_sheet: secondary_sheet.into(),
            secondary_prefix: secondary_prefix.into(),
        }
    }

    pub fn from_config(config: &LedgerConfig) -> Self {
        Self::new(
            config.primary_sheet.clone(),
            config.secondary_sheet.clone(),
            config.secondary_site_prefix.clone(),
        )
    }

    /// Sheet an entry belongs to, chosen by Site ID prefix
    pub fn target_sheet(&self, site_id: &str) -> &str {
        if !self.secondary_prefix.is_empty() && site_id.starts_with(&self.secondary_prefix) {
            &self.secondary_sheet
        } else {
            &self.primary_sheet
        }
    }

    /// Map both target sheets and make sure each has a technician column.
    /// Missing or header-less sheets are left out of the cache.
    pub fn prepare_sheets(&self, workbook: &mut Workbook) -> SheetCache {
        let mut cache = SheetCache::new();

        for name in [&self.primary_sheet, &self.secondary_sheet] {
            let Some(sheet) = workbook.sheet_mut(name) else {
                warn!(sheet = %name, "target sheet not in workbook");
                continue;
            };
            let Some(mut info) = map_sheet(sheet) else {
                warn!(sheet = %name, "no header row found");
                continue;
            };
            info.ensure_column(sheet, fields::NAME_OF_TECHNICIAN);
            cache.insert(name.clone(), info);
        }

        cache
    }

    /// Validate and append one entry
    pub fn write_entry(
        &self,
        workbook: &mut Workbook,
        cache: &mut SheetCache,
        entry: &Entry,
        reporter: &dyn RunReporter,
    ) -> WriteOutcome {
        let site_id = display_site(entry);
        let sheet_name = self.target_sheet(entry.site_id()).to_string();

        let (Some(info), Some(sheet)) = (cache.get_mut(&sheet_name), workbook.sheet_mut(&sheet_name))
        else {
            return skip(reporter, site_id, SkipReason::MissingSheet(sheet_name));
        };

        let visit_date = entry.visit_date();
        if visit_date.is_empty() {
            reporter.diagnostic(&format!(
                "⚠️ Entry for {}: No date provided, but allowing entry",
                site_id
            ));
        } else {
            match NaiveDate::parse_from_str(visit_date, LEDGER_DATE_FORMAT) {
                Ok(date) => {
                    if let Some(latest) = info.latest_date.filter(|latest| date <= *latest) {
                        return skip(
                            reporter,
                            site_id,
                            SkipReason::StaleDate {
                                date: visit_date.to_string(),
                                latest,
                            },
                        );
                    }
                }
                Err(_) => {
                    return skip(reporter, site_id, SkipReason::InvalidDate(visit_date.to_string()));
                }
            }
        }

        let key: RecordKey = record_key(
            &entry.cell_for(fields::CURRENT_VISIT_DATE),
            &entry.cell_for(fields::CURRENT_DG_RUN_HOURS),
        );
        if info.contains_key(&key) {
            let date = if visit_date.is_empty() { "N/A" } else { visit_date };
            return skip(
                reporter,
                site_id,
                SkipReason::Duplicate {
                    date: date.to_string(),
                    run_hours: key.1.clone(),
                },
            );
        }

        let row = info.take_next_row();
        for (idx, header) in info.headers.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            sheet.set_cell(row, idx + 1, entry.cell_for(&header.to_uppercase()));
        }
        info.insert_key(key);

        if entry.is_faulty() {
            info!(site_id, sheet = %sheet_name, row, "faulty entry added");
            reporter.diagnostic(&format!(
                "⚠️ Added {} to {} with FAULTY run hours",
                site_id, sheet_name
            ));
            WriteOutcome::Faulty { sheet: sheet_name, row }
        } else {
            info!(site_id, sheet = %sheet_name, row, "entry added");
            reporter.diagnostic(&format!("✅ Added: {} to {}", site_id, sheet_name));
            WriteOutcome::Added { sheet: sheet_name, row }
        }
    }

    /// Prepare the target sheets and write every entry in order
    ///
    /// # Returns
    /// - tallies; `usable_sheets == 0` means nothing could be written
    pub fn write_all(
        &self,
        workbook: &mut Workbook,
        entries: &[Entry],
        reporter: &dyn RunReporter,
    ) -> WriteSummary {
        let mut cache = self.prepare_sheets(workbook);
        let mut summary = WriteSummary {
            usable_sheets: cache.len(),
            ..Default::default()
        };
        if cache.is_empty() {
            return summary;
        }

        let total = entries.len();
        for (idx, entry) in entries.iter().enumerate() {
            reporter.progress(scaled(idx, total, phases::WRITING));
            match self.write_entry(workbook, &mut cache, entry, reporter) {
                WriteOutcome::Added { .. } => summary.added += 1,
                WriteOutcome::Faulty { .. } => summary.faulty += 1,
                WriteOutcome::Skipped(SkipReason::MissingSheet(_)) => summary.missing_sheet += 1,
                WriteOutcome::Skipped(_) => summary.skipped += 1,
            }
        }

        info!(
            added = summary.added,
            faulty = summary.faulty,
            skipped = summary.skipped,
            missing_sheet = summary.missing_sheet,
            "entries written"
        );
        summary
    }
}

fn display_site(entry: &Entry) -> &str {
    match entry.site_id() {
        "" => "Unknown",
        id => id,
    }
}

fn skip(reporter: &dyn RunReporter, site_id: &str, reason: SkipReason) -> WriteOutcome {
    warn!(site_id, reason = %reason, "entry skipped");
    reporter.diagnostic(&format!("❌ Skipped {}: {}", site_id, reason));
    WriteOutcome::Skipped(reason)
}
