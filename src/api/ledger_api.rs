// ==========================================
// Fuel Ledger - Ledger API
// ==========================================
// Responsibility: end-to-end ingestion and propagation runs
// Run shape: check inputs -> (extract) -> backup -> load -> mutate -> save once
// Red line: missing inputs abort before any backup is taken
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::LedgerConfig;
use crate::domain::report::{IngestionSummary, PropagationRunSummary};
use crate::engine::progress::{MonotonicProgress, RunReporter};
use crate::engine::propagator::Propagator;
use crate::engine::record_writer::RecordWriter;
use crate::importer::{BlockExtractor, TechnicianDirectory, UnmatchedExporter};
use crate::workbook::{export_sheet, read_workbook, BackupService, WorkbookStore};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn, Span};
use uuid::Uuid;

pub struct LedgerApi<S: WorkbookStore> {
    store: S,
    config: LedgerConfig,
    extractor: BlockExtractor,
    writer: RecordWriter,
    propagator: Propagator,
}

impl<S: WorkbookStore> LedgerApi<S> {
    /// API over `store`, with the technician roster taken from `config`
    pub fn new(store: S, config: LedgerConfig) -> ApiResult<Self> {
        let directory = TechnicianDirectory::from_roster(&config.technicians);
        Self::with_directory(store, config, directory)
    }

    /// API with an explicit technician directory
    pub fn with_directory(
        store: S,
        config: LedgerConfig,
        directory: TechnicianDirectory,
    ) -> ApiResult<Self> {
        config.validate()?;
        let extractor = BlockExtractor::new(&config, directory)?;
        let writer = RecordWriter::from_config(&config);
        Ok(Self {
            store,
            config,
            extractor,
            writer,
            propagator: Propagator::new(),
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Extract a transcript and append its entries to the ledger
    ///
    /// # Arguments
    /// - transcript: UTF-8 chat export
    /// - reporter: progress / diagnostic hooks
    ///
    /// # Returns
    /// - Ok(IngestionSummary): completed run (possibly with skips)
    /// - Err(ApiError): transcript or ledger missing, no usable sheet, storage failure
    #[instrument(skip_all, fields(run_id = tracing::field::Empty, transcript = %transcript.display()))]
    pub fn run_ingestion(
        &self,
        transcript: &Path,
        reporter: &dyn RunReporter,
    ) -> ApiResult<IngestionSummary> {
        let run_id = Uuid::new_v4().to_string();
        Span::current().record("run_id", run_id.as_str());

        if !transcript.is_file() {
            return Err(ApiError::TranscriptNotFound(transcript.display().to_string()));
        }
        self.ensure_ledger()?;

        let progress = MonotonicProgress::new(reporter);
        progress.progress(0);

        let extraction = self.extractor.extract_file(transcript, &progress)?;
        let mut summary = IngestionSummary {
            run_id,
            total_blocks: extraction.total_blocks,
            entries_parsed: extraction.entries.len(),
            parse_skipped: extraction.skipped_count,
            ..Default::default()
        };

        let exporter = UnmatchedExporter::new(self.config.unmatched_dir_for(self.store.path()));
        match exporter.export(&extraction.unmatched_blocks) {
            Ok(path) => summary.unmatched_export = path,
            Err(e) => {
                warn!(error = %e, "unmatched-block export failed");
                progress.diagnostic(&format!("⚠️ Could not export unmatched blocks: {}", e));
            }
        }

        if extraction.entries.is_empty() {
            warn!("no entries to add");
            progress.diagnostic("⚠️ No entries to add.");
            progress.progress(100);
            return Ok(summary);
        }

        summary.backup = self.backup()?;
        let mut workbook = self.store.load()?;

        summary.write = self
            .writer
            .write_all(&mut workbook, &extraction.entries, &progress);
        if summary.write.usable_sheets == 0 {
            progress.diagnostic("❌ No valid sheets found in ledger workbook.");
            return Err(ApiError::NoUsableSheet(self.config.sheet_names()));
        }

        self.store.save(&workbook)?;
        progress.progress(100);

        info!(
            added = summary.write.added,
            faulty = summary.write.faulty,
            skipped = summary.total_skipped(),
            "ingestion complete"
        );
        Ok(summary)
    }

    /// Forward-fill the "previous" columns of the named sheets
    ///
    /// # Arguments
    /// - sheet_names: sheets to process; None = primary then secondary sheet
    #[instrument(skip_all, fields(run_id = tracing::field::Empty))]
    pub fn run_propagation(
        &self,
        sheet_names: Option<Vec<String>>,
        reporter: &dyn RunReporter,
    ) -> ApiResult<PropagationRunSummary> {
        let run_id = Uuid::new_v4().to_string();
        Span::current().record("run_id", run_id.as_str());

        self.ensure_ledger()?;

        let progress = MonotonicProgress::new(reporter);
        progress.progress(0);

        let backup = self.backup()?;
        let mut workbook = self.store.load()?;

        let names = sheet_names.unwrap_or_else(|| self.config.sheet_names());
        let outcome = self.propagator.propagate(&mut workbook, &names, &progress);

        self.store.save(&workbook)?;
        progress.progress(100);

        Ok(PropagationRunSummary {
            run_id,
            sheets_processed: outcome.sheets_processed,
            sheets_skipped: outcome.sheets_skipped,
            totals: outcome.totals,
            backup,
        })
    }

    /// Replace the ledger with the sheets of an Excel workbook
    ///
    /// # Returns
    /// - number of sheets imported
    #[instrument(skip_all, fields(xlsx = %xlsx.display()))]
    pub fn import_xlsx(&self, xlsx: &Path) -> ApiResult<usize> {
        let workbook = read_workbook(xlsx)?;
        if self.store.exists() {
            self.backup()?;
        }
        self.store.save(&workbook)?;
        info!(sheets = workbook.len(), "ledger seeded from Excel");
        Ok(workbook.len())
    }

    /// Write one ledger sheet to CSV
    ///
    /// # Returns
    /// - number of rows written
    pub fn export_csv(&self, sheet_name: &str, output: &Path) -> ApiResult<usize> {
        self.ensure_ledger()?;
        let workbook = self.store.load()?;
        Ok(export_sheet(&workbook, sheet_name, output)?)
    }

    fn ensure_ledger(&self) -> ApiResult<()> {
        if self.store.exists() {
            return Ok(());
        }
        let location = self
            .store
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<unset>".to_string());
        Err(ApiError::WorkbookNotFound(location))
    }

    /// Backup of the store file; stores without a file are not backed up
    fn backup(&self) -> ApiResult<Option<PathBuf>> {
        let Some(path) = self.store.path() else {
            return Ok(None);
        };
        let service = BackupService::new(self.config.backup_dir_for(Some(path)));
        Ok(Some(service.backup(path)?))
    }
}

/// Pretty-printed JSON of a run summary
pub fn summary_json<T: Serialize>(summary: &T) -> ApiResult<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}
