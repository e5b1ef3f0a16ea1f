// ==========================================
// Fuel Ledger - Workbook store trait
// ==========================================
// Responsibility: load/save a whole workbook
// Implementations: SqliteWorkbookStore (ledger file), MemoryWorkbookStore (tests/embedding)
// ==========================================

use crate::workbook::error::{WorkbookError, WorkbookResult};
use crate::workbook::grid::Workbook;
use std::path::Path;
use std::sync::Mutex;

/// Workbook persistence
///
/// `save` replaces the stored workbook as a unit.
pub trait WorkbookStore: Send + Sync {
    /// Backing file, when there is one (backups are taken from it)
    fn path(&self) -> Option<&Path>;

    fn exists(&self) -> bool;

    fn load(&self) -> WorkbookResult<Workbook>;

    fn save(&self, workbook: &Workbook) -> WorkbookResult<()>;
}

/// In-memory store; counts saves so callers can assert "saved once"
#[derive(Debug, Default)]
pub struct MemoryWorkbookStore {
    inner: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    workbook: Option<Workbook>,
    saves: usize,
}

impl MemoryWorkbookStore {
    /// Empty store: `exists()` is false until the first save
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_workbook(workbook: Workbook) -> Self {
        Self {
            inner: Mutex::new(MemoryState {
                workbook: Some(workbook),
                saves: 0,
            }),
        }
    }

    pub fn save_count(&self) -> usize {
        self.lock().map(|s| s.saves).unwrap_or(0)
    }

    /// Current stored workbook (clone)
    pub fn snapshot(&self) -> Option<Workbook> {
        self.lock().ok().and_then(|s| s.workbook.clone())
    }

    fn lock(&self) -> WorkbookResult<std::sync::MutexGuard<'_, MemoryState>> {
        self.inner
            .lock()
            .map_err(|e| WorkbookError::StorageError(format!("lock poisoned: {}", e)))
    }
}

impl WorkbookStore for MemoryWorkbookStore {
    fn path(&self) -> Option<&Path> {
        None
    }

    fn exists(&self) -> bool {
        self.lock().map(|s| s.workbook.is_some()).unwrap_or(false)
    }

    fn load(&self) -> WorkbookResult<Workbook> {
        self.lock()?
            .workbook
            .clone()
            .ok_or_else(|| WorkbookError::NotFound("<memory>".to_string()))
    }

    fn save(&self, workbook: &Workbook) -> WorkbookResult<()> {
        let mut state = self.lock()?;
        state.workbook = Some(workbook.clone());
        state.saves += 1;
        Ok(())
    }
}
