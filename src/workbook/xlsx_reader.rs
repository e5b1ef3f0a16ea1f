// ==========================================
// Fuel Ledger - Excel workbook reader
// ==========================================
// Supports: .xlsx / .xlsm / .xls (calamine auto-detect)
// Cells keep their 1-based sheet coordinates, including leading blank rows
// ==========================================

use crate::domain::cell::CellValue;
use crate::workbook::error::{WorkbookError, WorkbookResult};
use crate::workbook::grid::{Sheet, Workbook};
use calamine::{open_workbook_auto, Data, DataType, Reader};
use std::path::Path;
use tracing::{debug, info};

const SUPPORTED_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls"];

/// Read every sheet of an Excel file into a workbook
///
/// # Arguments
/// - path: Excel file path
///
/// # Returns
/// - Ok(Workbook): sheets in file order
/// - Err: missing file, unsupported extension, calamine failure
pub fn read_workbook(path: &Path) -> WorkbookResult<Workbook> {
    if !path.exists() {
        return Err(WorkbookError::NotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(WorkbookError::UnsupportedFormat(ext));
    }

    let mut excel = open_workbook_auto(path)?;
    let mut workbook = Workbook::new();

    for name in excel.sheet_names() {
        let range = excel.worksheet_range(&name)?;
        let mut sheet = Sheet::new(name.clone());

        // start() is the 0-based position of the first used cell
        if let Some((row0, col0)) = range.start() {
            for (r, row) in range.rows().enumerate() {
                for (c, data) in row.iter().enumerate() {
                    let value = convert(data);
                    if value == CellValue::Empty {
                        continue;
                    }
                    sheet.set_cell(row0 as usize + r + 1, col0 as usize + c + 1, value);
                }
            }
        }

        debug!(sheet = %name, rows = sheet.max_row(), columns = sheet.max_column(), "sheet read");
        workbook.add_sheet(sheet);
    }

    info!(path = %path.display(), sheets = workbook.len(), "Excel workbook read");
    Ok(workbook)
}

fn convert(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => whole_number(*f).map_or(CellValue::Float(*f), CellValue::Int),
        Data::Bool(b) => CellValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(_) | Data::DateTimeIso(_) => match data.as_datetime() {
            Some(dt) => CellValue::DateTime(dt),
            None => CellValue::Text(data.to_string()),
        },
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(format!("#{:?}", e)),
    }
}

/// Excel stores every number as a float; whole values come back as integers
fn whole_number(value: f64) -> Option<i64> {
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.is_finite() && value.fract() == 0.0 && in_range).then_some(value as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::schema_mapper::record_key;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_workbook(&dir.path().join("ledger.xlsx")).unwrap_err();
        assert!(matches!(err, WorkbookError::NotFound(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.txt");
        std::fs::write(&path, "not a workbook").unwrap();
        let err = read_workbook(&path).unwrap_err();
        assert!(matches!(err, WorkbookError::UnsupportedFormat(ext) if ext == "txt"));
    }

    #[test]
    fn test_convert_scalars() {
        assert_eq!(convert(&Data::Empty), CellValue::Empty);
        assert_eq!(convert(&Data::Int(5)), CellValue::Int(5));
        assert_eq!(convert(&Data::Float(2.5)), CellValue::Float(2.5));
        assert_eq!(convert(&Data::String("x".into())), CellValue::from("x"));
        assert_eq!(convert(&Data::Bool(true)), CellValue::from("TRUE"));
    }

    #[test]
    fn test_whole_floats_become_integers() {
        assert_eq!(convert(&Data::Float(1500.0)), CellValue::Int(1500));
        assert_eq!(convert(&Data::Float(-3.0)), CellValue::Int(-3));
        assert_eq!(convert(&Data::Float(1500.5)), CellValue::Float(1500.5));
        assert_eq!(convert(&Data::Float(f64::INFINITY)), CellValue::Float(f64::INFINITY));
        assert_eq!(convert(&Data::Float(1e20)), CellValue::Float(1e20));
    }

    #[test]
    fn test_imported_run_hours_key_matches_transcript_reading() {
        let imported = record_key(&CellValue::Empty, &convert(&Data::Float(1500.0)));
        let transcribed = record_key(&CellValue::Empty, &CellValue::Int(1500));
        assert_eq!(imported, transcribed);
        assert_eq!(imported, ("None".to_string(), "1500".to_string()));
    }
}
