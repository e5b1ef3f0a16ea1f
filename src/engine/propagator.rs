// ==========================================
// Fuel Ledger - Propagator
// ==========================================
// Responsibility: forward-fill the "previous" columns of each site's rows
// Order: rows in append (row-number) order, never re-sorted by date
// Fills: PREVIOUS VISIT DATE <- CURRENT VISIT DATE
//        PREVIOUS DIESEL LEVEL <- FUEL LEFT ON SITE
//        PREVIOUS DG RUN HOURS <- CURRENT DG RUN HOURS
// ==========================================

use crate::domain::cell::CellValue;
use crate::domain::entry::fields;
use crate::domain::report::PropagationSummary;
use crate::engine::progress::{phases, scaled, RunReporter};
use crate::engine::schema_mapper::{map_sheet, SheetInfo};
use crate::workbook::grid::{Sheet, Workbook};
use serde::Serialize;
use tracing::{debug, error, info, warn};

/// Columns a sheet needs before it can be propagated
pub const REQUIRED_COLUMNS: [&str; 7] = [
    fields::SITE_ID,
    fields::PREVIOUS_VISIT_DATE,
    fields::CURRENT_VISIT_DATE,
    fields::PREVIOUS_DIESEL_LEVEL,
    fields::FUEL_LEFT_ON_SITE,
    fields::PREVIOUS_DG_RUN_HOURS,
    fields::CURRENT_DG_RUN_HOURS,
];

/// Sheets handled by one propagation pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PropagationOutcome {
    pub sheets_processed: Vec<String>,
    pub sheets_skipped: Vec<String>,
    pub totals: PropagationSummary,
}

/// One (previous column, source column) pair and its rolling value
struct CarryForward {
    target: usize,
    source: usize,
    last_seen: Option<CellValue>,
}

impl CarryForward {
    fn new(target: usize, source: usize) -> Self {
        Self {
            target,
            source,
            last_seen: None,
        }
    }

    /// Fill the target cell of `row` if blank, then advance from the source cell
    ///
    /// # Returns
    /// - true when a value was written
    fn apply(&mut self, sheet: &mut Sheet, row: usize) -> bool {
        let source = sheet.cell(row, self.source).clone();

        let mut filled = false;
        if sheet.cell(row, self.target).is_blank() {
            let value = match &self.last_seen {
                Some(carried) => Some(carried.clone()),
                None if !source.is_blank() => Some(source.clone()),
                None => None,
            };
            if let Some(value) = value {
                sheet.set_cell(row, self.target, value);
                filled = true;
            }
        }

        if !source.is_blank() {
            self.last_seen = Some(source);
        }
        filled
    }
}

/// Column positions used by the fill, resolved once per sheet
struct FillColumns {
    date: (usize, usize),
    diesel: (usize, usize),
    dg_hours: (usize, usize),
}

impl FillColumns {
    fn resolve(info: &SheetInfo) -> Option<Self> {
        let col = |name: &str| info.column(name);
        Some(Self {
            date: (col(fields::PREVIOUS_VISIT_DATE)?, col(fields::CURRENT_VISIT_DATE)?),
            diesel: (col(fields::PREVIOUS_DIESEL_LEVEL)?, col(fields::FUEL_LEFT_ON_SITE)?),
            dg_hours: (col(fields::PREVIOUS_DG_RUN_HOURS)?, col(fields::CURRENT_DG_RUN_HOURS)?),
        })
    }
}

#[derive(Debug, Default)]
pub struct Propagator;

impl Propagator {
    pub fn new() -> Self {
        Self
    }

    /// Propagate each named sheet in order
    ///
    /// Missing or unusable sheets are skipped with a diagnostic.
    pub fn propagate(
        &self,
        workbook: &mut Workbook,
        sheet_names: &[String],
        reporter: &dyn RunReporter,
    ) -> PropagationOutcome {
        let mut outcome = PropagationOutcome::default();

        for name in sheet_names {
            let Some(sheet) = workbook.sheet_mut(name) else {
                warn!(sheet = %name, "sheet not found");
                reporter.diagnostic(&format!("⚠️ Sheet '{}' not found, skipping...", name));
                outcome.sheets_skipped.push(name.clone());
                continue;
            };

            match self.propagate_sheet(sheet, reporter) {
                Some(summary) => {
                    reporter.diagnostic(&format!(
                        "✅ Sheet '{}': {} sites, {} rows updated",
                        name, summary.sites_processed, summary.rows_updated
                    ));
                    outcome.totals.absorb(&summary);
                    outcome.sheets_processed.push(name.clone());
                }
                None => outcome.sheets_skipped.push(name.clone()),
            }
        }

        info!(
            sites = outcome.totals.sites_processed,
            rows = outcome.totals.rows_updated,
            dates = outcome.totals.dates_filled,
            diesel = outcome.totals.diesel_levels_filled,
            dg_hours = outcome.totals.dg_hours_filled,
            "propagation complete"
        );
        outcome
    }

    /// Propagate one sheet, creating missing required columns first
    ///
    /// # Returns
    /// - None: no header row, or required columns still absent
    pub fn propagate_sheet(
        &self,
        sheet: &mut Sheet,
        reporter: &dyn RunReporter,
    ) -> Option<PropagationSummary> {
        let name = sheet.name().to_string();
        let Some(mut info) = map_sheet(sheet) else {
            warn!(sheet = %name, "no header row found");
            reporter.diagnostic(&format!(
                "⚠️ Could not get info for sheet '{}', skipping...",
                name
            ));
            return None;
        };

        for column in info.missing_columns(&REQUIRED_COLUMNS) {
            info.ensure_column(sheet, column);
        }

        let missing = info.missing_columns(&REQUIRED_COLUMNS);
        let Some(columns) = FillColumns::resolve(&info).filter(|_| missing.is_empty()) else {
            error!(sheet = %name, ?missing, "required columns missing");
            reporter.diagnostic(&format!(
                "⚠️ Sheet '{}' missing required columns, skipping...",
                name
            ));
            return None;
        };

        let groups = group_by_site(sheet, &info);
        let total = groups.len();
        let mut summary = PropagationSummary::default();

        for (idx, (site_id, rows)) in groups.iter().enumerate() {
            reporter.progress(scaled(idx, total, phases::PROPAGATION));

            let site = fill_site_rows(sheet, &columns, rows);
            summary.sites_processed += 1;
            summary.absorb(&site);

            debug!(sheet = %name, site_id = %site_id, rows = site.rows_updated, "site propagated");
            reporter.diagnostic(&format!("✅ Site {}: {} rows updated", site_id, site.rows_updated));
        }

        Some(summary)
    }
}

/// Rows below the header grouped by trimmed Site ID text, groups in order of
/// first appearance, rows ascending
pub fn group_by_site(sheet: &Sheet, info: &SheetInfo) -> Vec<(String, Vec<usize>)> {
    let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
    let Some(site_col) = info.column(fields::SITE_ID) else {
        return groups;
    };

    for row in info.header_row + 1..=sheet.max_row() {
        let cell = sheet.cell(row, site_col);
        if cell.is_blank() {
            continue;
        }
        let site_id = cell.display_text().trim().to_string();
        match groups.iter_mut().find(|(id, _)| *id == site_id) {
            Some((_, rows)) => rows.push(row),
            None => groups.push((site_id, vec![row])),
        }
    }
    groups
}

/// Fill one site's rows; `sites_processed` of the result is left at 0
fn fill_site_rows(sheet: &mut Sheet, columns: &FillColumns, rows: &[usize]) -> PropagationSummary {
    let mut date = CarryForward::new(columns.date.0, columns.date.1);
    let mut diesel = CarryForward::new(columns.diesel.0, columns.diesel.1);
    let mut dg_hours = CarryForward::new(columns.dg_hours.0, columns.dg_hours.1);

    let mut summary = PropagationSummary::default();
    for &row in rows {
        let date_filled = date.apply(sheet, row);
        let diesel_filled = diesel.apply(sheet, row);
        let dg_filled = dg_hours.apply(sheet, row);

        summary.dates_filled += usize::from(date_filled);
        summary.diesel_levels_filled += usize::from(diesel_filled);
        summary.dg_hours_filled += usize::from(dg_filled);
        if date_filled || diesel_filled || dg_filled {
            summary.rows_updated += 1;
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::progress::SilentReporter;

    fn header() -> Vec<CellValue> {
        [
            "SITE ID",
            "CURRENT VISIT DATE",
            "PREVIOUS VISIT DATE",
            "CURRENT DG RUN HOURS",
            "PREVIOUS DG RUN HOURS",
            "FUEL LEFT ON SITE",
            "PREVIOUS DIESEL LEVEL",
            "NAME OF TECHNICIAN",
        ]
        .iter()
        .map(|h| CellValue::from(*h))
        .collect()
    }

    fn row(site: &str, date: &str, hours: Option<i64>, fuel_left: Option<i64>) -> Vec<CellValue> {
        vec![
            site.into(),
            if date.is_empty() { CellValue::Empty } else { date.into() },
            CellValue::Empty,
            hours.map(CellValue::Int).unwrap_or_default(),
            CellValue::Empty,
            fuel_left.map(CellValue::Int).unwrap_or_default(),
            CellValue::Empty,
        ]
    }

    #[test]
    fn test_carry_forward_from_first_row_only() {
        let mut sheet = Sheet::from_rows(
            "fuel capture",
            vec![
                header(),
                row("IHS_CBT_001", "01/01/2025", None, None),
                row("IHS_CBT_001", "", None, None),
                row("IHS_CBT_001", "", None, None),
            ],
        );

        let summary = Propagator::new()
            .propagate_sheet(&mut sheet, &SilentReporter)
            .unwrap();

        for r in 2..=4 {
            assert_eq!(sheet.cell(r, 3), &CellValue::from("01/01/2025"));
        }
        assert_eq!(summary.sites_processed, 1);
        assert_eq!(summary.dates_filled, 3);
        assert_eq!(summary.rows_updated, 3);
        assert_eq!(summary.diesel_levels_filled, 0);
    }

    #[test]
    fn test_trackers_advance_independently() {
        let mut sheet = Sheet::from_rows(
            "fuel capture",
            vec![
                header(),
                row("A", "01/01/2025", Some(100), Some(40)),
                row("A", "08/01/2025", None, Some(35)),
                row("A", "", Some(130), None),
            ],
        );

        Propagator::new()
            .propagate_sheet(&mut sheet, &SilentReporter)
            .unwrap();

        // dates: own, then carried
        assert_eq!(sheet.cell(2, 3), &CellValue::from("01/01/2025"));
        assert_eq!(sheet.cell(3, 3), &CellValue::from("01/01/2025"));
        assert_eq!(sheet.cell(4, 3), &CellValue::from("08/01/2025"));
        // run hours: row 3 has none, so row 4 still sees row 2's value
        assert_eq!(sheet.cell(2, 5), &CellValue::Int(100));
        assert_eq!(sheet.cell(3, 5), &CellValue::Int(100));
        assert_eq!(sheet.cell(4, 5), &CellValue::Int(100));
        // diesel
        assert_eq!(sheet.cell(2, 7), &CellValue::Int(40));
        assert_eq!(sheet.cell(3, 7), &CellValue::Int(40));
        assert_eq!(sheet.cell(4, 7), &CellValue::Int(35));
    }

    #[test]
    fn test_present_values_are_kept_and_zero_is_present() {
        let mut r1 = row("A", "01/01/2025", Some(0), Some(0));
        r1[2] = "31/12/2024".into();
        let mut sheet = Sheet::from_rows(
            "s",
            vec![header(), r1, row("A", "", None, None)],
        );

        Propagator::new()
            .propagate_sheet(&mut sheet, &SilentReporter)
            .unwrap();

        assert_eq!(sheet.cell(2, 3), &CellValue::from("31/12/2024"));
        assert_eq!(sheet.cell(3, 3), &CellValue::from("01/01/2025"));
        assert_eq!(sheet.cell(3, 5), &CellValue::Int(0));
        assert_eq!(sheet.cell(3, 7), &CellValue::Int(0));
    }

    #[test]
    fn test_sites_grouped_in_first_appearance_order() {
        let sheet = Sheet::from_rows(
            "s",
            vec![
                header(),
                row("B", "", None, None),
                row(" A ", "", None, None),
                row("", "", None, None),
                row("B", "", None, None),
                row("A", "", None, None),
            ],
        );
        let info = map_sheet(&sheet).unwrap();

        let groups = group_by_site(&sheet, &info);
        assert_eq!(
            groups,
            vec![("B".to_string(), vec![2, 5]), ("A".to_string(), vec![3, 6])]
        );
    }

    #[test]
    fn test_second_run_is_idempotent() {
        let mut sheet = Sheet::from_rows(
            "s",
            vec![
                header(),
                row("A", "01/01/2025", Some(100), Some(40)),
                row("B", "02/01/2025", Some(7), None),
                row("A", "08/01/2025", Some(150), Some(20)),
            ],
        );
        let propagator = Propagator::new();

        let first = propagator.propagate_sheet(&mut sheet, &SilentReporter).unwrap();
        assert!(first.rows_updated > 0);

        let second = propagator.propagate_sheet(&mut sheet, &SilentReporter).unwrap();
        assert_eq!(second.rows_updated, 0);
        assert_eq!(second.sites_processed, 2);
    }

    #[test]
    fn test_missing_columns_are_created() {
        let mut sheet = Sheet::from_rows(
            "s",
            vec![
                vec![
                    "SITE ID".into(),
                    "CURRENT VISIT DATE".into(),
                    "CURRENT DG RUN HOURS".into(),
                    "NAME OF TECHNICIAN".into(),
                ],
                vec!["A".into(), "01/01/2025".into(), CellValue::Int(10)],
            ],
        );

        let summary = Propagator::new()
            .propagate_sheet(&mut sheet, &SilentReporter)
            .unwrap();

        assert_eq!(sheet.cell(1, 5), &CellValue::from("PREVIOUS VISIT DATE"));
        assert_eq!(sheet.cell(1, 8), &CellValue::from("PREVIOUS DG RUN HOURS"));
        assert_eq!(sheet.cell(2, 5), &CellValue::from("01/01/2025"));
        assert_eq!(sheet.cell(2, 8), &CellValue::Int(10));
        assert_eq!(summary.dates_filled, 1);
        assert_eq!(summary.dg_hours_filled, 1);
    }

    #[test]
    fn test_missing_and_unusable_sheets_are_skipped() {
        let mut wb = Workbook::new();
        wb.add_sheet(Sheet::from_rows("fuel capture", vec![vec!["no header".into()]]));
        wb.add_sheet(Sheet::from_rows(
            "MS CAPTURE",
            vec![header(), row("A", "01/01/2025", None, None)],
        ));

        let names = vec![
            "fuel capture".to_string(),
            "MS CAPTURE".to_string(),
            "other".to_string(),
        ];
        let outcome = Propagator::new().propagate(&mut wb, &names, &SilentReporter);

        assert_eq!(outcome.sheets_processed, vec!["MS CAPTURE".to_string()]);
        assert_eq!(
            outcome.sheets_skipped,
            vec!["fuel capture".to_string(), "other".to_string()]
        );
        assert_eq!(outcome.totals.dates_filled, 1);
    }
}
