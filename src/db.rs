// ==========================================
// Fuel Ledger - SQLite connection setup
// ==========================================
// Goals:
// - every Connection::open applies the same PRAGMAs
// - one busy_timeout for all connections
// - one place that owns the ledger schema DDL
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::path::Path;
use std::time::Duration;

/// Default busy_timeout (ms)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// schema_version this build reads and writes
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

const LEDGER_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version    INTEGER NOT NULL,
    applied_at TEXT    NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS sheet (
    sheet_id   INTEGER PRIMARY KEY,
    name       TEXT    NOT NULL UNIQUE,
    position   INTEGER NOT NULL,
    max_row    INTEGER NOT NULL DEFAULT 0,
    max_column INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS cell (
    sheet_id INTEGER NOT NULL REFERENCES sheet(sheet_id) ON DELETE CASCADE,
    row_idx  INTEGER NOT NULL,
    col_idx  INTEGER NOT NULL,
    kind     TEXT    NOT NULL,
    value    TEXT    NOT NULL,
    PRIMARY KEY (sheet_id, row_idx, col_idx)
);
"#;

/// Apply the shared PRAGMAs
///
/// foreign_keys and busy_timeout are per-connection settings.
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Open a SQLite connection with the shared configuration
pub fn open_sqlite_connection(db_path: &Path) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Read schema_version (None when the table does not exist)
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}

/// Create the ledger tables and stamp the schema version (idempotent)
pub fn init_ledger_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(LEDGER_SCHEMA)?;
    if read_schema_version(conn)?.is_none() {
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [CURRENT_SCHEMA_VERSION],
        )?;
    }
    Ok(())
}
