// ==========================================
// Propagation integration tests
// ==========================================
// Target: forward-fill through the API against a SQLite ledger
// ==========================================


use fuel_ledger::{
    logging, CellValue, LedgerApi, Sheet, SilentReporter, TechnicianDirectory, Workbook,
    WorkbookStore,
};
use tempfile::tempdir;
use test_helpers::{col, config_in, header_row, seeded_store, RecordingReporter};

/// Three visits of one site, only the first with a fuel-left reading
fn single_site_ledger() -> Workbook {
    let mut sheet = Sheet::from_rows("fuel capture", vec![header_row()]);
    for (row, date, hours) in [(2, "01/01/2025", 100_i64), (3, "08/01/2025", 150), (4, "15/01/2025", 210)] {
        sheet.set_cell(row, col("SITE ID"), "IHS_CBT_001");
        sheet.set_cell(row, col("CURRENT VISIT DATE"), date);
        sheet.set_cell(row, col("CURRENT DG RUN HOURS"), hours);
    }
    sheet.set_cell(2, col("FUEL LEFT ON SITE"), 55.5);

    let mut wb = Workbook::new();
    wb.add_sheet(sheet);
    wb
}

#[test]
fn test_single_site_three_rows() {
    logging::init_test();
    let dir = tempdir().unwrap();
    let store = seeded_store(dir.path(), &single_site_ledger());
    let api = LedgerApi::with_directory(store, config_in(dir.path()), TechnicianDirectory::default())
        .unwrap();

    let reporter = RecordingReporter::default();
    let summary = api
        .run_propagation(Some(vec!["fuel capture".to_string()]), &reporter)
        .unwrap();

    assert_eq!(summary.sheets_processed, vec!["fuel capture".to_string()]);
    assert_eq!(summary.totals.sites_processed, 1);
    assert_eq!(summary.totals.rows_updated, 3);
    assert_eq!(summary.totals.dates_filled, 3);
    assert_eq!(summary.totals.dg_hours_filled, 3);
    assert_eq!(summary.totals.diesel_levels_filled, 3);
    assert!(summary.backup.as_ref().unwrap().starts_with(dir.path().join("backups")));

    let wb = api.store().load().unwrap();
    let sheet = wb.sheet("fuel capture").unwrap();
    let prev_date = col("PREVIOUS VISIT DATE");
    let prev_hours = col("PREVIOUS DG RUN HOURS");
    let prev_diesel = col("PREVIOUS DIESEL LEVEL");

    // first row seeds from itself, later rows carry the previous row's value
    assert_eq!(sheet.cell(2, prev_date), &CellValue::from("01/01/2025"));
    assert_eq!(sheet.cell(3, prev_date), &CellValue::from("01/01/2025"));
    assert_eq!(sheet.cell(4, prev_date), &CellValue::from("08/01/2025"));
    assert_eq!(sheet.cell(2, prev_hours), &CellValue::Int(100));
    assert_eq!(sheet.cell(4, prev_hours), &CellValue::Int(150));
    for row in 2..=4 {
        assert_eq!(sheet.cell(row, prev_diesel), &CellValue::Float(55.5));
    }

    let progress = reporter.progress_values();
    assert!(progress.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(progress.last(), Some(&100));
    assert!(reporter
        .messages()
        .contains(&"✅ Site IHS_CBT_001: 3 rows updated".to_string()));
}

#[test]
fn test_second_run_changes_nothing() {
    let dir = tempdir().unwrap();
    let store = seeded_store(dir.path(), &single_site_ledger());
    let api = LedgerApi::with_directory(store, config_in(dir.path()), TechnicianDirectory::default())
        .unwrap();

    api.run_propagation(None, &SilentReporter).unwrap();
    let after_first = api.store().load().unwrap();

    let second = api.run_propagation(None, &SilentReporter).unwrap();
    assert_eq!(second.totals.rows_updated, 0);
    assert_eq!(second.totals.sites_processed, 1);
    assert_eq!(api.store().load().unwrap(), after_first);
}

#[test]
fn test_missing_sheet_is_skipped_not_fatal() {
    let dir = tempdir().unwrap();
    let store = seeded_store(dir.path(), &single_site_ledger());
    let api = LedgerApi::with_directory(store, config_in(dir.path()), TechnicianDirectory::default())
        .unwrap();

    let reporter = RecordingReporter::default();
    let summary = api.run_propagation(None, &reporter).unwrap();

    assert_eq!(summary.sheets_skipped, vec!["MS CAPTURE".to_string()]);
    assert!(reporter
        .messages()
        .contains(&"⚠️ Sheet 'MS CAPTURE' not found, skipping...".to_string()));
}

#[test]
fn test_missing_previous_columns_are_created() {
    let dir = tempdir().unwrap();
    let mut sheet = Sheet::from_rows(
        "fuel capture",
        vec![vec![
            "SITE ID".into(),
            "CURRENT VISIT DATE".into(),
            "CURRENT DG RUN HOURS".into(),
            "NAME OF TECHNICIAN".into(),
        ]],
    );
    sheet.set_cell(2, 1, "IHS_CBT_010");
    sheet.set_cell(2, 2, "02/02/2025");
    sheet.set_cell(2, 3, 42_i64);
    let mut wb = Workbook::new();
    wb.add_sheet(sheet);

    let store = seeded_store(dir.path(), &wb);
    let api = LedgerApi::with_directory(store, config_in(dir.path()), TechnicianDirectory::default())
        .unwrap();
    let summary = api
        .run_propagation(Some(vec!["fuel capture".to_string()]), &SilentReporter)
        .unwrap();

    assert_eq!(summary.totals.dates_filled, 1);
    assert_eq!(summary.totals.diesel_levels_filled, 0);

    let saved = api.store().load().unwrap();
    let sheet = saved.sheet("fuel capture").unwrap();
    let headers: Vec<String> = sheet.row_values(1).iter().map(|c| c.display_text()).collect();
    for name in [
        "PREVIOUS VISIT DATE",
        "PREVIOUS DIESEL LEVEL",
        "FUEL LEFT ON SITE",
        "PREVIOUS DG RUN HOURS",
    ] {
        assert!(headers.iter().any(|h| h == name), "missing {}", name);
    }
}
