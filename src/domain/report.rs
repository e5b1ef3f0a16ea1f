// ==========================================
// Fuel Ledger - Run reports
// ==========================================
// Responsibility: rejected blocks and per-run summary counters
// ==========================================

use serde::Serialize;
use std::path::PathBuf;

/// Transcript block that produced no Entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmatchedBlock {
    pub reason: String,
    pub content: String,
}

impl UnmatchedBlock {
    pub fn new(reason: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            content: content.into(),
        }
    }
}

/// Record Writer tallies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WriteSummary {
    pub added: usize,
    pub faulty: usize,
    /// Entries rejected by the date or duplicate gate
    pub skipped: usize,
    /// Entries whose target sheet is absent or unusable
    pub missing_sheet: usize,
    /// Target sheets that had a recognizable header
    pub usable_sheets: usize,
}

impl WriteSummary {
    pub fn written(&self) -> usize {
        self.added + self.faulty
    }
}

/// Propagator tallies, summed over every processed sheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PropagationSummary {
    pub sites_processed: usize,
    pub rows_updated: usize,
    pub dates_filled: usize,
    pub diesel_levels_filled: usize,
    pub dg_hours_filled: usize,
}

impl PropagationSummary {
    pub fn absorb(&mut self, other: &PropagationSummary) {
        self.sites_processed += other.sites_processed;
        self.rows_updated += other.rows_updated;
        self.dates_filled += other.dates_filled;
        self.diesel_levels_filled += other.diesel_levels_filled;
        self.dg_hours_filled += other.dg_hours_filled;
    }
}

/// Outcome of one complete ingestion run
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestionSummary {
    pub run_id: String,
    pub total_blocks: usize,
    pub entries_parsed: usize,
    pub parse_skipped: usize,
    pub write: WriteSummary,
    pub unmatched_export: Option<PathBuf>,
    pub backup: Option<PathBuf>,
}

impl IngestionSummary {
    /// Parse rejections plus every write-time skip
    pub fn total_skipped(&self) -> usize {
        self.parse_skipped + self.write.skipped + self.write.missing_sheet
    }
}

/// Outcome of one complete propagation run
#[derive(Debug, Clone, Default, Serialize)]
pub struct PropagationRunSummary {
    pub run_id: String,
    pub sheets_processed: Vec<String>,
    pub sheets_skipped: Vec<String>,
    pub totals: PropagationSummary,
    pub backup: Option<PathBuf>,
}
