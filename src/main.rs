// ==========================================
// Fuel Ledger - CLI entry point
// ==========================================
// Commands: ingest / propagate / import-xlsx / export-csv
// Runs execute on a blocking worker; progress and diagnostics stream back
// over a channel and are printed by the foreground task
// ==========================================

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fuel_ledger::api::summary_json;
use fuel_ledger::config::{default_config_path, default_ledger_path};
use fuel_ledger::{
    logging, ApiError, IngestionSummary, LedgerApi, LedgerConfig, PropagationRunSummary,
    RunReporter, SqliteWorkbookStore,
};
use serde::Serialize;
use std::path::PathBuf;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "fuel-ledger")]
#[command(about = "Refueling chat transcripts -> per-site fuel ledger")]
#[command(version)]
struct Cli {
    /// Config JSON (defaults to FUEL_LEDGER_CONFIG or the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Ledger database (defaults to FUEL_LEDGER_DB or the user data dir)
    #[arg(long, global = true)]
    ledger: Option<PathBuf>,

    /// Print the run summary as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract a transcript and append its entries to the ledger
    Ingest {
        #[arg(long)]
        transcript: PathBuf,
    },
    /// Forward-fill previous visit date, diesel level and run hours
    Propagate {
        /// Sheet to process (repeatable); defaults to both target sheets
        #[arg(long = "sheet")]
        sheets: Vec<String>,
    },
    /// Replace the ledger with the sheets of an Excel workbook
    ImportXlsx {
        #[arg(long)]
        xlsx: PathBuf,
    },
    /// Dump one ledger sheet to CSV
    ExportCsv {
        #[arg(long)]
        sheet: String,
        #[arg(long)]
        out: PathBuf,
    },
}

enum RunEvent {
    Progress(u8),
    Diagnostic(String),
}

/// Forwards notifications to the foreground task; a closed channel drops them
struct ChannelReporter {
    tx: UnboundedSender<RunEvent>,
}

impl RunReporter for ChannelReporter {
    fn progress(&self, percent: u8) {
        let _ = self.tx.send(RunEvent::Progress(percent));
    }

    fn diagnostic(&self, message: &str) {
        let _ = self.tx.send(RunEvent::Diagnostic(message.to_string()));
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = LedgerConfig::load(&config_path)
        .with_context(|| format!("loading config {}", config_path.display()))?;
    let ledger_path = cli.ledger.clone().unwrap_or_else(default_ledger_path);

    info!(version = fuel_ledger::VERSION, ledger = %ledger_path.display(), "fuel-ledger starting");
    let api = LedgerApi::new(SqliteWorkbookStore::new(ledger_path), config)?;

    match cli.command {
        Command::Ingest { transcript } => {
            let summary = run_on_worker(move |reporter| api.run_ingestion(&transcript, reporter))
                .await?;
            print_summary(&summary, cli.json, describe_ingestion)?;
        }
        Command::Propagate { sheets } => {
            let sheets = (!sheets.is_empty()).then_some(sheets);
            let summary = run_on_worker(move |reporter| api.run_propagation(sheets, reporter))
                .await?;
            print_summary(&summary, cli.json, describe_propagation)?;
        }
        Command::ImportXlsx { xlsx } => {
            let sheets = api.import_xlsx(&xlsx)?;
            println!("Imported {} sheet(s) from {}", sheets, xlsx.display());
        }
        Command::ExportCsv { sheet, out } => {
            let rows = api.export_csv(&sheet, &out)?;
            println!("Exported {} row(s) of '{}' to {}", rows, sheet, out.display());
        }
    }

    Ok(())
}

/// Run `job` on a blocking worker, printing its notifications as they arrive
async fn run_on_worker<T, F>(job: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&dyn RunReporter) -> Result<T, ApiError> + Send + 'static,
{
    let (tx, mut rx) = unbounded_channel();
    let worker = tokio::task::spawn_blocking(move || {
        let reporter = ChannelReporter { tx };
        job(&reporter)
    });

    let mut last_decile = None;
    while let Some(event) = rx.recv().await {
        match event {
            RunEvent::Progress(percent) => {
                let decile = percent / 10;
                if last_decile != Some(decile) {
                    last_decile = Some(decile);
                    eprintln!("[{:>3}%]", percent);
                }
            }
            RunEvent::Diagnostic(message) => eprintln!("{}", message),
        }
    }

    let result = worker.await.context("run worker failed")?;
    Ok(result?)
}

fn print_summary<T: Serialize>(summary: &T, json: bool, describe: fn(&T) -> String) -> Result<()> {
    if json {
        println!("{}", summary_json(summary)?);
    } else {
        println!("{}", describe(summary));
    }
    Ok(())
}

fn describe_ingestion(s: &IngestionSummary) -> String {
    let mut text = format!(
        "📊 {} blocks | {} parsed | {} added | {} faulty | {} skipped ({} unparsed, {} at write, {} no sheet)",
        s.total_blocks,
        s.entries_parsed,
        s.write.added,
        s.write.faulty,
        s.total_skipped(),
        s.parse_skipped,
        s.write.skipped,
        s.write.missing_sheet
    );
    if let Some(path) = &s.unmatched_export {
        text.push_str(&format!("\nUnmatched blocks: {}", path.display()));
    }
    if let Some(path) = &s.backup {
        text.push_str(&format!("\nBackup: {}", path.display()));
    }
    text
}

fn describe_propagation(s: &PropagationRunSummary) -> String {
    let t = &s.totals;
    let mut text = format!(
        "📊 {} sites | {} rows | {} dates | {} diesel levels | {} DG hours",
        t.sites_processed, t.rows_updated, t.dates_filled, t.diesel_levels_filled, t.dg_hours_filled
    );
    if !s.sheets_skipped.is_empty() {
        text.push_str(&format!("\nSkipped sheets: {}", s.sheets_skipped.join(", ")));
    }
    if let Some(path) = &s.backup {
        text.push_str(&format!("\nBackup: {}", path.display()));
    }
    text
}
