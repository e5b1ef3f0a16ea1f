// ==========================================
// Fuel Ledger - Sheet CSV export
// ==========================================

use crate::workbook::error::{WorkbookError, WorkbookResult};
use crate::workbook::grid::Workbook;
use csv::WriterBuilder;
use std::path::Path;
use tracing::info;

/// Write one sheet as CSV, rows 1..=max_row, columns 1..=max_column
///
/// # Returns
/// - number of rows written
pub fn export_sheet(workbook: &Workbook, sheet_name: &str, output: &Path) -> WorkbookResult<usize> {
    let sheet = workbook
        .sheet(sheet_name)
        .ok_or_else(|| WorkbookError::SheetNotFound(sheet_name.to_string()))?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = WriterBuilder::new().flexible(false).from_path(output)?;
    for row in 1..=sheet.max_row() {
        let record: Vec<String> = sheet.row_values(row).iter().map(|v| v.display_text()).collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;

    info!(sheet = sheet_name, path = %output.display(), rows = sheet.max_row(), "sheet exported");
    Ok(sheet.max_row())
}
