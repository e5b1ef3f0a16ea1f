// ==========================================
// Fuel Ledger - Block extractor
// ==========================================
// Responsibility: transcript -> event blocks -> Entry per block
// Flow: split on delimiter -> label-variant line scan -> derived fields
//       -> validation gate -> numeric coercion
// ==========================================

use crate::config::{FieldLabels, LedgerConfig};
use crate::domain::entry::{fields, Entry, FieldValue};
use crate::domain::report::UnmatchedBlock;
use crate::domain::LEDGER_DATE_FORMAT;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::normalizer::Normalizer;
use crate::importer::technician_directory::TechnicianDirectory;
use crate::engine::progress::{phases, scaled, RunReporter};
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Reason recorded for blocks with no non-blank line
pub const PARSE_FAILED_REASON: &str = "Parse failed";

/// Reason recorded for blocks failing the minimum-field gate
pub const MISSING_FIELDS_REASON: &str =
    "Missing all required fields (need at least Site ID, Date, or Runtime)";

/// Result of extracting a whole transcript
#[derive(Debug, Clone, Default)]
pub struct ExtractionResult {
    pub entries: Vec<Entry>,
    pub skipped_count: usize,
    pub unmatched_blocks: Vec<UnmatchedBlock>,
    pub total_blocks: usize,
}

/// Result of extracting one block
#[derive(Debug, Clone, PartialEq)]
pub enum BlockOutcome {
    Accepted(Entry),
    /// Only blank lines
    Empty,
    Rejected(String),
}

/// Label variants of one field, lower-cased once at construction
struct LabelMatcher {
    field: String,
    variants: Vec<String>,
}

impl LabelMatcher {
    fn from_labels(labels: &FieldLabels) -> Self {
        Self {
            field: labels.field.clone(),
            variants: labels.variants.iter().map(|v| v.to_lowercase()).collect(),
        }
    }

    fn matches(&self, lower_line: &str) -> bool {
        self.variants.iter().any(|v| lower_line.contains(v.as_str()))
    }
}

pub struct BlockExtractor {
    delimiter: Regex,
    labels: Vec<LabelMatcher>,
    numeric_fields: Vec<String>,
    run_hour_fields: Vec<String>,
    overwritable_field: String,
    normalizer: Normalizer,
    directory: TechnicianDirectory,
}

impl BlockExtractor {
    /// # Arguments
    /// - config: delimiter, label table, numeric fields, supplier allow-list
    /// - directory: site -> technician lookup
    pub fn new(config: &LedgerConfig, directory: TechnicianDirectory) -> ImportResult<Self> {
        let delimiter = RegexBuilder::new(&regex::escape(config.block_delimiter.trim()))
            .case_insensitive(true)
            .build()
            .map_err(|e| ImportError::InvalidPattern {
                pattern: config.block_delimiter.clone(),
                message: e.to_string(),
            })?;

        Ok(Self {
            delimiter,
            labels: config.field_labels.iter().map(LabelMatcher::from_labels).collect(),
            numeric_fields: config.numeric_fields.clone(),
            run_hour_fields: config.run_hour_fields.clone(),
            overwritable_field: config.overwritable_field.clone(),
            normalizer: Normalizer::new(&config.suppliers)?,
            directory,
        })
    }

    /// Extractor using the roster carried by the config
    pub fn from_config(config: &LedgerConfig) -> ImportResult<Self> {
        Self::new(config, TechnicianDirectory::from_roster(&config.technicians))
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Blocks following each delimiter; text before the first one is dropped
    pub fn split_blocks<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.delimiter.split(text).skip(1).collect()
    }

    /// Read and extract a transcript file
    pub fn extract_file(
        &self,
        path: &Path,
        reporter: &dyn RunReporter,
    ) -> ImportResult<ExtractionResult> {
        if !path.exists() {
            return Err(ImportError::TranscriptNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Ok(self.extract_text(&content, reporter))
    }

    /// Extract every block of a transcript.
    ///
    /// Invariant: `entries.len() + skipped_count == total_blocks`, and every
    /// rejected block appears in `unmatched_blocks` in transcript order.
    pub fn extract_text(&self, text: &str, reporter: &dyn RunReporter) -> ExtractionResult {
        let blocks = self.split_blocks(text);
        let total_blocks = blocks.len();
        let mut result = ExtractionResult {
            total_blocks,
            ..Default::default()
        };

        for (idx, block) in blocks.iter().enumerate() {
            reporter.progress(scaled(idx, total_blocks, phases::EXTRACTION));

            let reason = match self.extract_block(block) {
                BlockOutcome::Accepted(entry) => {
                    info!(block = idx + 1, site_id = %entry.site_id(), "block parsed");
                    result.entries.push(entry);
                    continue;
                }
                BlockOutcome::Empty => PARSE_FAILED_REASON.to_string(),
                BlockOutcome::Rejected(reason) => reason,
            };

            warn!(block = idx + 1, reason = %reason, "block rejected");
            reporter.diagnostic(&format!("❌ Block {}: {}", idx + 1, reason));
            result.skipped_count += 1;
            result.unmatched_blocks.push(UnmatchedBlock::new(reason, *block));
        }

        info!(
            parsed = result.entries.len(),
            skipped = result.skipped_count,
            "transcript extraction complete"
        );
        result
    }

    /// Extract the field mapping of one block
    pub fn extract_block(&self, block: &str) -> BlockOutcome {
        let lines: Vec<&str> = block
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        if lines.is_empty() {
            return BlockOutcome::Empty;
        }

        let block_text = lines.join("\n");
        let raw = self.scan_lines(&lines);

        let raw_site = raw
            .get(fields::SITE_ID)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
            .unwrap_or(&block_text);
        let site_id = self.normalizer.normalize_site_id(raw_site);
        let visit_date = self.normalizer.normalize_date(&block_text);
        let has_runtime = raw
            .get(fields::CURRENT_DG_RUN_HOURS)
            .is_some_and(|v| !v.is_empty());

        if site_id.is_empty() && visit_date.is_none() && !has_runtime {
            debug!("block has no site id, date or runtime");
            return BlockOutcome::Rejected(MISSING_FIELDS_REASON.to_string());
        }

        let supplier = self.normalizer.normalize_supplier(
            raw.get(fields::SUPPLIER)
                .map(String::as_str)
                .unwrap_or(&block_text),
        );
        let site_name = raw
            .get(fields::SITE_NAME)
            .map(|s| s.trim().to_string())
            .unwrap_or_default();

        let mut entry = Entry::new();
        for (field, value) in &raw {
            entry.insert(field.clone(), value.clone());
        }

        if !site_id.is_empty() {
            entry.insert(
                fields::NAME_OF_TECHNICIAN,
                self.directory.technician_for(&site_id),
            );
        }
        entry.insert(fields::SITE_ID, site_id);
        entry.insert(
            fields::CURRENT_VISIT_DATE,
            visit_date
                .map(|d| d.format(LEDGER_DATE_FORMAT).to_string())
                .unwrap_or_default(),
        );
        entry.insert(fields::SUPPLIER, supplier);
        entry.insert(fields::SITE_NAME, site_name);

        self.coerce_numeric(&mut entry, &raw);

        BlockOutcome::Accepted(entry)
    }

    /// Line scan: per line, the first field (in table order) with a matching
    /// variant claims the line. Populated fields are skipped unless overwritable.
    fn scan_lines(&self, lines: &[&str]) -> HashMap<String, String> {
        let mut raw: HashMap<String, String> = HashMap::new();

        for line in lines {
            let lower = line.to_lowercase();
            for matcher in &self.labels {
                if raw.contains_key(&matcher.field) && matcher.field != self.overwritable_field {
                    continue;
                }
                if matcher.matches(&lower) {
                    raw.insert(matcher.field.clone(), value_after_separator(line));
                    break;
                }
            }
        }

        raw
    }

    fn coerce_numeric(&self, entry: &mut Entry, raw: &HashMap<String, String>) {
        let targets = self
            .run_hour_fields
            .iter()
            .map(|f| (f, true))
            .chain(self.numeric_fields.iter().map(|f| (f, false)));

        for (field, allow_faulty) in targets {
            if let Some(value) = raw.get(field) {
                let reading = self.normalizer.convert_numeric(value, allow_faulty);
                entry.insert(field.clone(), FieldValue::Reading(reading));
            }
        }
    }
}

/// Text after the first ':' or '-', or the whole line when neither occurs
fn value_after_separator(line: &str) -> String {
    match line.find([':', '-']) {
        Some(idx) => line[idx + 1..].trim().to_string(),
        None => line.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entry::NumericReading;
    use crate::engine::progress::SilentReporter;

    fn extractor() -> BlockExtractor {
        let directory = TechnicianDirectory::from_pairs([("IHS_CBT_045M", "JUSTIN")]);
        BlockExtractor::new(&LedgerConfig::default(), directory).unwrap()
    }

    #[test]
    fn test_split_drops_preamble() {
        let ex = extractor();
        let text = "chat header\nREFUELING TEMPLATE\nA\nrefueling template\nB";
        let blocks = ex.split_blocks(text);
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].contains('A'));
        assert!(blocks[1].contains('B'));
        assert!(ex.split_blocks("no marker here").is_empty());
    }

    #[test]
    fn test_full_block() {
        let ex = extractor();
        let block = "\nSite ID: CBT-045M\nSite name: Chilenje\nDate: 5/1/24\n\
                     Runtime: 1,234\nPre Rt: 1200\nFuel found: 40.5\nFuel added: 100\n\
                     Fuel source: Puma\nCPH: 2.1\n";

        let BlockOutcome::Accepted(entry) = ex.extract_block(block) else {
            panic!("block should be accepted");
        };

        assert_eq!(entry.site_id(), "IHS_CBT_045M");
        assert_eq!(entry.text(fields::SITE_NAME), "Chilenje");
        assert_eq!(entry.visit_date(), "05/01/2024");
        assert_eq!(entry.current_run_hours(), Some(&NumericReading::Integer(1234)));
        assert_eq!(entry.reading(fields::FUEL_FOUND), Some(&NumericReading::Decimal(40.5)));
        assert_eq!(entry.reading(fields::FUEL_ADDED), Some(&NumericReading::Integer(100)));
        assert_eq!(entry.reading(fields::CPH), Some(&NumericReading::Decimal(2.1)));
        assert_eq!(entry.text(fields::SUPPLIER), "PUMA");
        assert_eq!(entry.text(fields::NAME_OF_TECHNICIAN), "JUSTIN");
    }

    #[test]
    fn test_first_field_in_table_order_claims_line() {
        let ex = extractor();
        // "Pre Rt" also contains "rt", and CURRENT DG RUN HOURS is declared first
        let BlockOutcome::Accepted(entry) = ex.extract_block("Pre Rt: 900\nDate: 1/2/24") else {
            panic!("block should be accepted");
        };
        assert_eq!(entry.current_run_hours(), Some(&NumericReading::Integer(900)));
        assert!(entry.reading(fields::PREVIOUS_DG_RUN_HOURS).is_none());
    }

    #[test]
    fn test_first_value_kept_for_repeated_label() {
        let ex = extractor();
        let BlockOutcome::Accepted(entry) = ex.extract_block("Runtime: 10\nRuntime: 20") else {
            panic!("block should be accepted");
        };
        assert_eq!(entry.current_run_hours(), Some(&NumericReading::Integer(10)));
    }

    #[test]
    fn test_site_falls_back_to_block_text() {
        let ex = extractor();
        // the labelled value is blank, so the whole block is searched
        let BlockOutcome::Accepted(entry) = ex.extract_block("Site ID:\nat ihs cbt 045m\nok") else {
            panic!("block should be accepted");
        };
        assert_eq!(entry.site_id(), "IHS_CBT_045M");
        assert_eq!(entry.visit_date(), "");
    }

    #[test]
    fn test_unknown_site_gets_placeholder_technician() {
        let ex = extractor();
        let BlockOutcome::Accepted(entry) = ex.extract_block("Site ID: CBT 777A") else {
            panic!("block should be accepted");
        };
        assert_eq!(entry.text(fields::NAME_OF_TECHNICIAN), "N/A");
    }

    #[test]
    fn test_no_site_means_no_technician() {
        let ex = extractor();
        let BlockOutcome::Accepted(entry) = ex.extract_block("Runtime: abc") else {
            panic!("block should be accepted");
        };
        assert_eq!(entry.site_id(), "");
        assert!(!entry.contains(fields::NAME_OF_TECHNICIAN));
        assert!(entry.is_faulty());
    }

    #[test]
    fn test_fuel_fields_never_faulty() {
        let ex = extractor();
        let BlockOutcome::Accepted(entry) =
            ex.extract_block("Site ID: CBT 045M\nFuel added: lots\nCPH: n/a")
        else {
            panic!("block should be accepted");
        };
        assert_eq!(entry.reading(fields::FUEL_ADDED), Some(&NumericReading::Missing));
        assert_eq!(entry.reading(fields::CPH), Some(&NumericReading::Missing));
    }

    #[test]
    fn test_explicit_supplier_label_does_not_fall_back() {
        let ex = extractor();
        let BlockOutcome::Accepted(entry) =
            ex.extract_block("Site ID: CBT 045M\nSource: roadside\nnotes: from PUMA")
        else {
            panic!("block should be accepted");
        };
        assert_eq!(entry.text(fields::SUPPLIER), "");
    }

    #[test]
    fn test_validation_gate() {
        let ex = extractor();
        assert_eq!(
            ex.extract_block("hello\nnothing useful"),
            BlockOutcome::Rejected(MISSING_FIELDS_REASON.to_string())
        );
        assert_eq!(ex.extract_block("  \n\n  "), BlockOutcome::Empty);
        // empty runtime value does not satisfy the gate
        assert!(matches!(
            ex.extract_block("Runtime:"),
            BlockOutcome::Rejected(_)
        ));
    }

    #[test]
    fn test_extract_text_counts_every_block() {
        let ex = extractor();
        let text = "preamble\n\
                    REFUELING TEMPLATE\nSite ID: CBT 045M\nDate: 5/1/24\nRuntime: 100\n\
                    REFUELING TEMPLATE\n\n\
                    REFUELING TEMPLATE\njust chatting\n\
                    REFUELING TEMPLATE\nRuntime: broken";

        let result = ex.extract_text(text, &SilentReporter);

        assert_eq!(result.total_blocks, 4);
        assert_eq!(result.entries.len(), 2);
        assert_eq!(result.skipped_count, 2);
        assert_eq!(result.entries.len() + result.skipped_count, result.total_blocks);
        assert_eq!(result.unmatched_blocks[0].reason, PARSE_FAILED_REASON);
        assert_eq!(result.unmatched_blocks[1].reason, MISSING_FIELDS_REASON);
        assert!(result.unmatched_blocks[1].content.contains("just chatting"));
    }

    #[test]
    fn test_value_after_separator() {
        assert_eq!(value_after_separator("Site ID: CBT-045M"), "CBT-045M");
        assert_eq!(value_after_separator("Runtime - 55"), "55");
        assert_eq!(value_after_separator("cbt 045m"), "cbt 045m");
    }
}
