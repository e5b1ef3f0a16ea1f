// ==========================================
// Fuel Ledger - Unmatched block exporter
// ==========================================
// Responsibility: write rejected blocks to a timestamped CSV for review
// Output: <unmatched dir>/unmatched_blocks_<YYYYmmdd_HHMMSS>.csv
// ==========================================

use crate::config::paths::unique_file_path;
use crate::domain::report::UnmatchedBlock;
use crate::importer::error::{ImportError, ImportResult};
use chrono::Local;
use csv::WriterBuilder;
use std::path::{Path, PathBuf};
use tracing::info;

const PREVIEW_CHARS: usize = 100;

pub struct UnmatchedExporter {
    output_dir: PathBuf,
}

impl UnmatchedExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Export blocks; no file is written for an empty list
    ///
    /// # Returns
    /// - Ok(Some(path)): CSV written
    /// - Ok(None): nothing to export
    pub fn export(&self, blocks: &[UnmatchedBlock]) -> ImportResult<Option<PathBuf>> {
        if blocks.is_empty() {
            return Ok(None);
        }

        std::fs::create_dir_all(&self.output_dir).map_err(|e| {
            ImportError::ExportError(format!("{}: {}", self.output_dir.display(), e))
        })?;

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let stem = format!("unmatched_blocks_{}", timestamp);
        let path = unique_file_path(&self.output_dir, &stem, "csv");

        let mut writer = WriterBuilder::new().from_path(&path)?;
        writer.write_record(["Block Number", "Reason", "Preview (first 100 chars)", "Full Content"])?;
        for (idx, block) in blocks.iter().enumerate() {
            writer.write_record([
                (idx + 1).to_string(),
                block.reason.clone(),
                preview(&block.content),
                block.content.clone(),
            ])?;
        }
        writer
            .flush()
            .map_err(|e| ImportError::ExportError(e.to_string()))?;

        info!(path = %path.display(), blocks = blocks.len(), "unmatched blocks exported");
        Ok(Some(path))
    }
}

/// First 100 characters, newlines flattened to spaces
fn preview(content: &str) -> String {
    content
        .chars()
        .take(PREVIEW_CHARS)
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect()
}
