// ==========================================
// Fuel Ledger - SQLite workbook store
// ==========================================
// Responsibility: persist the ledger workbook in a single SQLite file
// Tables: sheet (one row per sheet), cell (one row per non-empty cell)
// Red line: save replaces everything inside one transaction
// ==========================================

use crate::db::{init_ledger_schema, open_sqlite_connection, read_schema_version, CURRENT_SCHEMA_VERSION};
use crate::domain::cell::CellValue;
use crate::workbook::error::{WorkbookError, WorkbookResult};
use crate::workbook::grid::{Sheet, Workbook};
use crate::workbook::store::WorkbookStore;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, Transaction};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const DATETIME_STORAGE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub struct SqliteWorkbookStore {
    path: PathBuf,
}

impl SqliteWorkbookStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn connect(&self) -> WorkbookResult<Connection> {
        let conn = open_sqlite_connection(&self.path)?;
        init_ledger_schema(&conn)?;

        if let Some(version) = read_schema_version(&conn)? {
            if version != CURRENT_SCHEMA_VERSION {
                warn!(
                    path = %self.path.display(),
                    found = version,
                    expected = CURRENT_SCHEMA_VERSION,
                    "ledger schema version mismatch"
                );
            }
        }
        Ok(conn)
    }

    fn insert_sheet_tx(tx: &Transaction, position: usize, sheet: &Sheet) -> WorkbookResult<usize> {
        tx.execute(
            "INSERT INTO sheet (name, position, max_row, max_column) VALUES (?1, ?2, ?3, ?4)",
            params![
                sheet.name(),
                position as i64,
                sheet.max_row() as i64,
                sheet.max_column() as i64
            ],
        )?;
        let sheet_id = tx.last_insert_rowid();

        let mut stmt = tx.prepare(
            "INSERT INTO cell (sheet_id, row_idx, col_idx, kind, value) VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        let mut count = 0;
        for (row, column, value) in sheet.used_cells() {
            let Some((kind, text)) = encode_cell(value) else {
                continue;
            };
            stmt.execute(params![sheet_id, row as i64, column as i64, kind, text])?;
            count += 1;
        }
        Ok(count)
    }
}

impl WorkbookStore for SqliteWorkbookStore {
    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn load(&self) -> WorkbookResult<Workbook> {
        if !self.exists() {
            return Err(WorkbookError::NotFound(self.path.display().to_string()));
        }
        let conn = self.connect()?;

        let mut sheet_stmt = conn.prepare(
            "SELECT sheet_id, name, max_row, max_column FROM sheet ORDER BY position, sheet_id",
        )?;
        let sheets = sheet_stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, i64>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut cell_stmt =
            conn.prepare("SELECT row_idx, col_idx, kind, value FROM cell WHERE sheet_id = ?1")?;

        let mut workbook = Workbook::new();
        for (sheet_id, name, max_row, max_column) in sheets {
            let mut sheet = Sheet::new(name.clone());
            let cells = cell_stmt
                .query_map([sheet_id], |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, i64>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                })?
                .collect::<Result<Vec<_>, _>>()?;

            for (row, column, kind, text) in cells {
                let (row, column) = (row.max(0) as usize, column.max(0) as usize);
                let value = decode_cell(&kind, &text).map_err(|message| WorkbookError::CorruptCell {
                    sheet: name.clone(),
                    row,
                    column,
                    message,
                })?;
                sheet.set_cell(row, column, value);
            }
            sheet.reserve(max_row.max(0) as usize, max_column.max(0) as usize);
            workbook.add_sheet(sheet);
        }

        debug!(path = %self.path.display(), sheets = workbook.len(), "ledger loaded");
        Ok(workbook)
    }

    fn save(&self, workbook: &Workbook) -> WorkbookResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM cell", [])?;
        tx.execute("DELETE FROM sheet", [])?;
        let mut cells = 0;
        for (position, sheet) in workbook.sheets().iter().enumerate() {
            cells += Self::insert_sheet_tx(&tx, position, sheet)?;
        }
        tx.commit()?;

        info!(
            path = %self.path.display(),
            sheets = workbook.len(),
            cells,
            "ledger saved"
        );
        Ok(())
    }
}

fn encode_cell(value: &CellValue) -> Option<(&'static str, String)> {
    match value {
        CellValue::Empty => None,
        CellValue::Text(s) => Some(("text", s.clone())),
        CellValue::Int(i) => Some(("int", i.to_string())),
        CellValue::Float(f) => Some(("float", f.to_string())),
        CellValue::DateTime(dt) => Some(("datetime", dt.format(DATETIME_STORAGE_FORMAT).to_string())),
    }
}

fn decode_cell(kind: &str, text: &str) -> Result<CellValue, String> {
    match kind {
        "text" => Ok(CellValue::Text(text.to_string())),
        "int" => text.parse().map(CellValue::Int).map_err(|e| e.to_string()),
        "float" => text.parse().map(CellValue::Float).map_err(|e| e.to_string()),
        "datetime" => NaiveDateTime::parse_from_str(text, DATETIME_STORAGE_FORMAT)
            .map(CellValue::DateTime)
            .map_err(|e| e.to_string()),
        other => Err(format!("unknown cell kind '{}'", other)),
    }
}
