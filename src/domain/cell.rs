// ==========================================
// Fuel Ledger - Cell values
// ==========================================
// Responsibility: typed value held by one workbook cell
// Cells are addressed 1-based (row, column) by the workbook grid
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Date format used for visit dates written by the ledger
pub const LEDGER_DATE_FORMAT: &str = "%d/%m/%Y";

/// Rendering of native date cells in key/display text
const DATETIME_TEXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Value of a single workbook cell
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Blank = true-empty cell, or text that is empty after trimming.
    /// Zero and other numbers are present values.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Text whose first character is the formula marker `=`
    pub fn is_formula(&self) -> bool {
        matches!(self, CellValue::Text(s) if s.starts_with('='))
    }

    /// Human-readable text of the cell (empty cells render as "")
    pub fn display_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => format_float(*f),
            CellValue::DateTime(dt) => dt.format(DATETIME_TEXT_FORMAT).to_string(),
        }
    }

    /// Text form used in de-duplication keys.
    ///
    /// Differs from `display_text` only for empty cells, which render as the
    /// literal `None` so that "no value" never collides with an empty string
    /// typed into a cell by hand.
    pub fn key_text(&self) -> String {
        match self {
            CellValue::Empty => "None".to_string(),
            other => other.display_text(),
        }
    }

    /// Date carried by the cell: native date/time cells, or text in `DD/MM/YYYY`
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::DateTime(dt) => Some(dt.date()),
            CellValue::Text(s) => NaiveDate::parse_from_str(s.trim(), LEDGER_DATE_FORMAT).ok(),
            _ => None,
        }
    }
}

/// Float rendering that keeps a trailing `.0` on whole values (`12.0`, not `12`),
/// so a float cell never renders the same as an integer cell.
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        CellValue::DateTime(value)
    }
}
