// ==========================================
// Fuel Ledger - Ledger backups
// ==========================================
// Responsibility: timestamped byte copy of the ledger file before a mutating run
// Output: <backup dir>/backup_<YYYYmmdd_HHMMSS>.<ext>
// ==========================================

use crate::config::paths::unique_file_path;
use crate::workbook::error::{WorkbookError, WorkbookResult};
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct BackupService {
    backup_dir: PathBuf,
}

impl BackupService {
    pub fn new(backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            backup_dir: backup_dir.into(),
        }
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Copy `source` into the backup directory
    ///
    /// # Returns
    /// - path of the new backup file
    pub fn backup(&self, source: &Path) -> WorkbookResult<PathBuf> {
        if !source.is_file() {
            return Err(WorkbookError::NotFound(source.display().to_string()));
        }
        std::fs::create_dir_all(&self.backup_dir)?;

        let ext = source
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("bak");
        let stem = format!("backup_{}", Local::now().format("%Y%m%d_%H%M%S"));
        let target = unique_file_path(&self.backup_dir, &stem, ext);

        std::fs::copy(source, &target)?;
        info!(source = %source.display(), backup = %target.display(), "backup created");
        Ok(target)
    }
}
