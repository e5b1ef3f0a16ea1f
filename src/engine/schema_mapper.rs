// ==========================================
// Fuel Ledger - Schema mapper
// ==========================================
// Responsibility: locate the header row of a sheet and build its working index
// Output: SheetInfo (header row, headers, column map, latest date, existing keys)
// Red line: column indices are 1-based and never move once assigned
// ==========================================

use crate::domain::cell::CellValue;
use crate::domain::entry::fields;
use crate::workbook::grid::Sheet;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Rows scanned (from row 1) when looking for the header
pub const HEADER_SCAN_LIMIT: usize = 20;

/// Tokens that must all appear in one row for it to be the header
pub const HEADER_TOKENS: [&str; 4] = [
    fields::SITE_ID,
    fields::CURRENT_VISIT_DATE,
    fields::CURRENT_DG_RUN_HOURS,
    fields::NAME_OF_TECHNICIAN,
];

/// De-duplication key: (visit-date text, run-hours text)
pub type RecordKey = (String, String);

/// Per-sheet, per-run working state
#[derive(Debug, Clone, PartialEq)]
pub struct SheetInfo {
    pub sheet_name: String,
    pub header_row: usize,
    /// Header text in column order (trimmed, original case)
    pub headers: Vec<String>,
    /// Uppercased header text -> 1-based column
    pub col_map: HashMap<String, usize>,
    /// Most recent visit date below the header; None sorts before every real date
    pub latest_date: Option<NaiveDate>,
    pub existing_keys: HashSet<RecordKey>,
    /// Row the next appended entry lands on; advanced by every write
    pub next_row: usize,
}

impl SheetInfo {
    /// Column of a header, looked up case-insensitively
    pub fn column(&self, name: &str) -> Option<usize> {
        self.col_map.get(&normalize_header(name)).copied()
    }

    /// Header text for a 1-based column
    pub fn header_at(&self, column: usize) -> Option<&str> {
        column
            .checked_sub(1)
            .and_then(|i| self.headers.get(i))
            .map(String::as_str)
    }

    /// Names from `required` with no column in this sheet
    pub fn missing_columns<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .copied()
            .filter(|name| self.column(name).is_none())
            .collect()
    }

    /// Append `name` after the last header unless it already exists
    ///
    /// # Returns
    /// - 1-based column of `name`
    pub fn ensure_column(&mut self, sheet: &mut Sheet, name: &str) -> usize {
        if let Some(column) = self.column(name) {
            return column;
        }

        let column = self.headers.len() + 1;
        sheet.set_cell(self.header_row, column, name);
        self.headers.push(name.to_string());
        self.col_map.insert(normalize_header(name), column);

        info!(sheet = %self.sheet_name, column_name = name, column, "column added");
        column
    }

    pub fn contains_key(&self, key: &RecordKey) -> bool {
        self.existing_keys.contains(key)
    }

    pub fn insert_key(&mut self, key: RecordKey) {
        self.existing_keys.insert(key);
    }

    /// Claim the append row and move the cursor below it.
    /// Rows written this run stay claimed even when their Site ID is blank.
    pub fn take_next_row(&mut self) -> usize {
        let row = self.next_row;
        self.next_row += 1;
        row
    }
}

/// Header lookup form: trimmed, uppercased
pub fn normalize_header(text: &str) -> String {
    text.trim().to_uppercase()
}

/// Key text of the cells that make up a record key
pub fn record_key(date: &CellValue, run_hours: &CellValue) -> RecordKey {
    (date.key_text(), run_hours.key_text())
}

/// First row in 1..=HEADER_SCAN_LIMIT where every header token is a substring
/// of some cell (uppercased, trimmed)
pub fn find_header_row(sheet: &Sheet) -> Option<usize> {
    let last = sheet.max_row().min(HEADER_SCAN_LIMIT);
    (1..=last).find(|&row| {
        let values: Vec<String> = (1..=sheet.max_column())
            .map(|c| normalize_header(&sheet.cell(row, c).display_text()))
            .collect();
        HEADER_TOKENS
            .iter()
            .all(|token| values.iter().any(|v| v.contains(token)))
    })
}

/// Build the working index of a sheet
///
/// # Returns
/// - Some(SheetInfo): header found and SITE ID / CURRENT VISIT DATE /
///   CURRENT DG RUN HOURS are exact column names
/// - None: sheet is unusable
pub fn map_sheet(sheet: &Sheet) -> Option<SheetInfo> {
    let header_row = find_header_row(sheet)?;

    let headers: Vec<String> = (1..=sheet.max_column())
        .map(|c| sheet.cell(header_row, c).display_text().trim().to_string())
        .collect();

    let mut col_map = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        if name.is_empty() {
            continue;
        }
        col_map.insert(normalize_header(name), idx + 1);
    }

    let date_col = *col_map.get(fields::CURRENT_VISIT_DATE)?;
    let site_col = *col_map.get(fields::SITE_ID)?;
    let hours_col = *col_map.get(fields::CURRENT_DG_RUN_HOURS)?;

    let mut latest_date: Option<NaiveDate> = None;
    let mut existing_keys = HashSet::new();
    for row in header_row + 1..=sheet.max_row() {
        let date_cell = sheet.cell(row, date_col);
        if let Some(date) = date_cell.as_date() {
            latest_date = Some(latest_date.map_or(date, |d| d.max(date)));
        }

        if !sheet.cell(row, site_col).is_blank() {
            existing_keys.insert(record_key(date_cell, sheet.cell(row, hours_col)));
        }
    }

    let next_row = find_last_data_row(sheet, site_col) + 1;

    debug!(
        sheet = sheet.name(),
        header_row,
        next_row,
        columns = headers.len(),
        keys = existing_keys.len(),
        latest = ?latest_date,
        "sheet mapped"
    );

    Some(SheetInfo {
        sheet_name: sheet.name().to_string(),
        header_row,
        headers,
        col_map,
        latest_date,
        existing_keys,
        next_row,
    })
}

/// Last row of `column` holding a non-blank, non-formula value, scanning up
/// from the sheet's last row. Falls back to `max_row` when none qualifies.
///
/// Whitespace-only text counts as empty here, so a row whose Site ID is a
/// stray space is reused. Rows appended during a run are tracked by
/// `SheetInfo::next_row` instead and are never reused.
pub fn find_last_data_row(sheet: &Sheet, column: usize) -> usize {
    (1..=sheet.max_row())
        .rev()
        .find(|&row| {
            let cell = sheet.cell(row, column);
            !cell.is_blank() && !cell.is_formula()
        })
        .unwrap_or_else(|| sheet.max_row())
}
