// ==========================================
// Transcript extraction tests
// ==========================================


use fuel_ledger::config::LedgerConfig;
use fuel_ledger::domain::fields;
use fuel_ledger::importer::{BlockExtractor, MISSING_FIELDS_REASON, PARSE_FAILED_REASON};
use fuel_ledger::{logging, Normalizer, NumericReading, SilentReporter, TechnicianDirectory};
use tempfile::tempdir;
use test_helpers::{write_transcript, RecordingReporter, SAMPLE_TRANSCRIPT};

fn extractor() -> BlockExtractor {
    let directory = TechnicianDirectory::from_pairs([("IHS_CBT_101", "MIKE")]);
    BlockExtractor::new(&LedgerConfig::default(), directory).unwrap()
}

#[test]
fn test_entries_plus_skipped_equals_blocks() {
    logging::init_test();
    let ex = extractor();

    let transcripts = [
        SAMPLE_TRANSCRIPT,
        "",
        "no delimiter at all",
        "REFUELING TEMPLATE",
        "REFUELING TEMPLATE\n\nrefueling template\nSite ID: CBT 1\nREFUELING TEMPLATE\nhi",
    ];
    for text in transcripts {
        let result = ex.extract_text(text, &SilentReporter);
        assert_eq!(
            result.entries.len() + result.skipped_count,
            result.total_blocks,
            "transcript: {:?}",
            text
        );
        assert_eq!(result.unmatched_blocks.len(), result.skipped_count);
    }
}

#[test]
fn test_sample_transcript() {
    let ex = extractor();
    let result = ex.extract_text(SAMPLE_TRANSCRIPT, &SilentReporter);

    assert_eq!(result.total_blocks, 4);
    assert_eq!(result.entries.len(), 3);
    assert_eq!(result.unmatched_blocks[0].reason, MISSING_FIELDS_REASON);
    assert!(result.unmatched_blocks[0].content.contains("good morning team"));

    let first = &result.entries[0];
    assert_eq!(first.site_id(), "IHS_CBT_101");
    assert_eq!(first.text(fields::SITE_NAME), "Kabwata");
    assert_eq!(first.visit_date(), "05/01/2025");
    assert_eq!(first.current_run_hours(), Some(&NumericReading::Integer(1500)));
    assert_eq!(first.reading(fields::FUEL_ADDED), Some(&NumericReading::Decimal(100.5)));
    assert_eq!(first.text(fields::SUPPLIER), "PUMA");
    assert_eq!(first.text(fields::NAME_OF_TECHNICIAN), "MIKE");

    let second = &result.entries[1];
    assert_eq!(second.site_id(), "IHS_CBT_102A");
    assert_eq!(second.text(fields::NAME_OF_TECHNICIAN), "N/A");
}

#[test]
fn test_every_accepted_entry_has_a_key_field() {
    let ex = extractor();
    let text = "REFUELING TEMPLATE\nRuntime: 5\nREFUELING TEMPLATE\nDate: 1/1/24\n\
                REFUELING TEMPLATE\nat cbt 9\nREFUELING TEMPLATE\nFuel added: 30";
    let result = ex.extract_text(text, &SilentReporter);

    assert_eq!(result.entries.len(), 3);
    for entry in &result.entries {
        assert!(
            !entry.site_id().is_empty()
                || !entry.visit_date().is_empty()
                || entry.current_run_hours().is_some()
        );
    }
}

#[test]
fn test_empty_block_is_parse_failure() {
    let result = extractor().extract_text("REFUELING TEMPLATE\n   \n\n", &SilentReporter);
    assert_eq!(result.skipped_count, 1);
    assert_eq!(result.unmatched_blocks[0].reason, PARSE_FAILED_REASON);
}

#[test]
fn test_progress_and_diagnostics_per_block() {
    let reporter = RecordingReporter::default();
    extractor().extract_text(SAMPLE_TRANSCRIPT, &reporter);

    assert_eq!(reporter.progress_values(), vec![20, 30, 40, 50]);
    let messages = reporter.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("❌ Block 4"));
}

#[test]
fn test_extract_file() {
    let dir = tempdir().unwrap();
    let path = write_transcript(dir.path(), SAMPLE_TRANSCRIPT);

    let result = extractor().extract_file(&path, &SilentReporter).unwrap();
    assert_eq!(result.entries.len(), 3);

    assert!(extractor()
        .extract_file(&dir.path().join("missing.txt"), &SilentReporter)
        .is_err());
}

#[test]
fn test_normalizer_properties() {
    let n = Normalizer::new(&LedgerConfig::default().suppliers).unwrap();

    for raw in ["cbt-045m", "IHS CBT 045M", "IHS_CBT_045M", "site cbt045m today"] {
        assert_eq!(n.normalize_site_id(raw), "IHS_CBT_045M", "input {:?}", raw);
    }
    let canonical = n.normalize_site_id("cbt 12");
    assert_eq!(n.normalize_site_id(&canonical), canonical);

    assert_eq!(n.convert_numeric("1,234.5", false), NumericReading::Decimal(1234.5));
    assert_eq!(n.convert_numeric("12", false), NumericReading::Integer(12));
    assert_eq!(n.convert_numeric("abc", true), NumericReading::Faulty);
    assert_eq!(n.convert_numeric("", true), NumericReading::Missing);
    assert_eq!(n.convert_numeric("abc", false), NumericReading::Missing);

    assert_eq!(n.normalize_supplier("delivered by ccs fuel ltd"), "CCS FUEL");
    assert_eq!(n.normalize_supplier("TOTALLY empty"), "");
}
