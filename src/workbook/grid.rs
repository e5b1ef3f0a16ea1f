// ==========================================
// Fuel Ledger - Workbook grid
// ==========================================
// Responsibility: named sheets of 1-based (row, column) cells
// Sheets grow on write; reported dimensions never shrink
// ==========================================

use crate::domain::cell::CellValue;
use std::collections::BTreeMap;

static EMPTY_CELL: CellValue = CellValue::Empty;

/// One named sheet: sparse grid of cells
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sheet {
    name: String,
    cells: BTreeMap<(usize, usize), CellValue>,
    max_row: usize,
    max_column: usize,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sheet whose row `i` (0-based in `rows`) lands at row `i + 1`
    pub fn from_rows(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let mut sheet = Sheet::new(name);
        for (r, row) in rows.into_iter().enumerate() {
            for (c, value) in row.into_iter().enumerate() {
                sheet.set_cell(r + 1, c + 1, value);
            }
        }
        sheet
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last row touched by any write (0 for a fresh sheet)
    pub fn max_row(&self) -> usize {
        self.max_row
    }

    pub fn max_column(&self) -> usize {
        self.max_column
    }

    /// Cell at (row, column); unset positions read as empty
    pub fn cell(&self, row: usize, column: usize) -> &CellValue {
        self.cells.get(&(row, column)).unwrap_or(&EMPTY_CELL)
    }

    /// Write a cell, growing the sheet as needed. Row/column 0 is ignored.
    pub fn set_cell(&mut self, row: usize, column: usize, value: impl Into<CellValue>) {
        if row == 0 || column == 0 {
            debug_assert!(false, "cell addresses are 1-based");
            return;
        }

        let value = value.into();
        self.max_row = self.max_row.max(row);
        self.max_column = self.max_column.max(column);
        if value == CellValue::Empty {
            self.cells.remove(&(row, column));
        } else {
            self.cells.insert((row, column), value);
        }
    }

    /// Extend the reported dimensions without writing a value
    pub fn reserve(&mut self, max_row: usize, max_column: usize) {
        self.max_row = self.max_row.max(max_row);
        self.max_column = self.max_column.max(max_column);
    }

    /// Cells 1..=max_column of a row
    pub fn row_values(&self, row: usize) -> Vec<CellValue> {
        (1..=self.max_column)
            .map(|c| self.cell(row, c).clone())
            .collect()
    }

    /// Non-empty cells in (row, column) order
    pub fn used_cells(&self) -> impl Iterator<Item = (usize, usize, &CellValue)> {
        self.cells.iter().map(|(&(r, c), v)| (r, c, v))
    }
}

/// Ordered collection of named sheets
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sheets.iter().any(|s| s.name == name)
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|s| s.name == name)
    }

    /// Add a sheet, replacing any sheet with the same name in place
    pub fn add_sheet(&mut self, sheet: Sheet) {
        match self.sheets.iter_mut().find(|s| s.name == sheet.name) {
            Some(existing) => *existing = sheet,
            None => self.sheets.push(sheet),
        }
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_grows_on_write() {
        let mut sheet = Sheet::new("fuel capture");
        assert_eq!(sheet.max_row(), 0);

        sheet.set_cell(3, 5, "x");
        assert_eq!(sheet.max_row(), 3);
        assert_eq!(sheet.max_column(), 5);
        assert_eq!(sheet.cell(3, 5), &CellValue::from("x"));
        assert_eq!(sheet.cell(1, 1), &CellValue::Empty);
        assert_eq!(sheet.cell(99, 99), &CellValue::Empty);
    }

    #[test]
    fn test_writing_empty_clears_but_keeps_dimensions() {
        let mut sheet = Sheet::new("s");
        sheet.set_cell(2, 2, 7_i64);
        sheet.set_cell(2, 2, CellValue::Empty);
        assert_eq!(sheet.cell(2, 2), &CellValue::Empty);
        assert_eq!(sheet.max_row(), 2);
        assert_eq!(sheet.used_cells().count(), 0);
    }

    #[test]
    fn test_from_rows() {
        let sheet = Sheet::from_rows(
            "s",
            vec![
                vec!["A".into(), "B".into()],
                vec![CellValue::Int(1), CellValue::Empty, CellValue::Float(2.5)],
            ],
        );
        assert_eq!(sheet.max_row(), 2);
        assert_eq!(sheet.max_column(), 3);
        assert_eq!(sheet.row_values(1)[2], CellValue::Empty);
        assert_eq!(sheet.cell(2, 3), &CellValue::Float(2.5));
    }

    #[test]
    fn test_workbook_replace_sheet() {
        let mut wb = Workbook::new();
        wb.add_sheet(Sheet::new("a"));
        wb.add_sheet(Sheet::new("b"));

        let mut replacement = Sheet::new("a");
        replacement.set_cell(1, 1, "new");
        wb.add_sheet(replacement);

        assert_eq!(wb.sheet_names(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(wb.sheet("a").unwrap().cell(1, 1), &CellValue::from("new"));
        assert!(wb.sheet("missing").is_none());
    }
}
