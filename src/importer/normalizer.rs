// ==========================================
// Fuel Ledger - Normalizer
// ==========================================
// Responsibility: raw text fragment -> canonical site id / date / supplier / number
// All operations are pure; the supplier allow-list is injected
// ==========================================

use crate::domain::entry::NumericReading;
use crate::importer::error::{ImportError, ImportResult};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// "CBT", optional separator, digits, optional trailing letter
static SITE_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)CBT[_\s-]?\d+[A-Z]?").expect("site id pattern is valid"));

/// "Date", optional ':' or '-', then D/M/YY or D/M/YYYY
static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Date\s*[:\-]?\s*(\d{1,2}/\d{1,2}/\d{2,4})").expect("date pattern is valid")
});

const SITE_PREFIX: &str = "IHS_";

/// Two-digit year first, then four-digit year
const TRANSCRIPT_DATE_FORMATS: [&str; 2] = ["%d/%m/%y", "%d/%m/%Y"];

pub struct Normalizer {
    /// (canonical supplier name, whole-word matcher), in allow-list order
    suppliers: Vec<(String, Regex)>,
}

impl Normalizer {
    /// # Arguments
    /// - suppliers: allow-listed supplier names, matched in the given order
    pub fn new(suppliers: &[String]) -> ImportResult<Self> {
        let suppliers = suppliers
            .iter()
            .map(|name| {
                let pattern = format!(r"(?i)\b{}\b", regex::escape(name));
                Regex::new(&pattern)
                    .map(|re| (name.clone(), re))
                    .map_err(|e| ImportError::InvalidPattern {
                        pattern,
                        message: e.to_string(),
                    })
            })
            .collect::<ImportResult<Vec<_>>>()?;

        Ok(Self { suppliers })
    }

    /// Canonical site id (`IHS_CBT_045M`) from the first match in `text`, or "".
    ///
    /// `cbt-045m`, `IHS CBT 045M` and `cbt045m` all yield `IHS_CBT_045M`;
    /// normalizing a canonical id returns it unchanged.
    pub fn normalize_site_id(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let upper = text.to_uppercase();
        let Some(found) = SITE_ID_PATTERN.find(&upper) else {
            return String::new();
        };

        let mut site_id: String = found
            .as_str()
            .chars()
            .map(|c| if c == '-' || c.is_whitespace() { '_' } else { c })
            .collect();

        if !site_id.starts_with(SITE_PREFIX) {
            site_id = format!("{}{}", SITE_PREFIX, site_id);
        }

        site_id = site_id.replace("IHSCBT", "IHS_CBT");
        if site_id.contains("CBT") && !site_id.contains("CBT_") {
            site_id = site_id.replacen("CBT", "CBT_", 1);
        }

        site_id
    }

    /// Date following the first `Date` label in `text`
    pub fn normalize_date(&self, text: &str) -> Option<NaiveDate> {
        let captures = DATE_PATTERN.captures(text)?;
        let raw = captures.get(1)?.as_str().trim();

        TRANSCRIPT_DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
    }

    /// First allow-listed supplier appearing as a whole word, or ""
    pub fn normalize_supplier(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        self.suppliers
            .iter()
            .find(|(_, re)| re.is_match(text))
            .map(|(name, _)| name.clone())
            .unwrap_or_default()
    }

    /// Numeric coercion of a raw value
    ///
    /// # Rules
    /// - thousands separators and surrounding whitespace are stripped
    /// - a value containing `.` parses as decimal, otherwise as integer
    /// - parse failure: `Faulty` when `allow_faulty`, else `Missing`
    /// - empty input is always `Missing`
    pub fn convert_numeric(&self, value: &str, allow_faulty: bool) -> NumericReading {
        if value.trim().is_empty() {
            return NumericReading::Missing;
        }

        let cleaned = value.replace(',', "");
        let cleaned = cleaned.trim();

        let parsed = if cleaned.contains('.') {
            cleaned.parse::<f64>().ok().map(NumericReading::Decimal)
        } else {
            cleaned.parse::<i64>().ok().map(NumericReading::Integer)
        };

        match parsed {
            Some(reading) => reading,
            None if allow_faulty => NumericReading::Faulty,
            None => NumericReading::Missing,
        }
    }
}
