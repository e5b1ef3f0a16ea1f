// ==========================================
// Fuel Ledger - Entry (one recognized refueling event)
// ==========================================
// Responsibility: canonical field names, numeric readings, the Entry mapping
// Lifecycle: built once per accepted block, read-only afterwards
// ==========================================

use crate::domain::cell::CellValue;
use std::collections::BTreeMap;

// ==========================================
// Canonical field / column names
// ==========================================
pub mod fields {
    pub const SITE_ID: &str = "SITE ID";
    pub const SITE_NAME: &str = "SITE NAME";
    pub const DATE: &str = "DATE";
    pub const CURRENT_VISIT_DATE: &str = "CURRENT VISIT DATE";
    pub const PREVIOUS_VISIT_DATE: &str = "PREVIOUS VISIT DATE";
    pub const CURRENT_DG_RUN_HOURS: &str = "CURRENT DG RUN HOURS";
    pub const PREVIOUS_DG_RUN_HOURS: &str = "PREVIOUS DG RUN HOURS";
    pub const FUEL_FOUND: &str = "FUEL FOUND";
    pub const FUEL_ADDED: &str = "FUEL ADDED";
    pub const FUEL_LEFT_ON_SITE: &str = "FUEL LEFT ON SITE";
    pub const PREVIOUS_DIESEL_LEVEL: &str = "PREVIOUS DIESEL LEVEL";
    pub const CPH: &str = "CPH";
    pub const SUPPLIER: &str = "SUPPLIER";
    pub const NAME_OF_TECHNICIAN: &str = "NAME OF TECHNICIAN";
}

/// Storage literal for an unparseable run-hours reading
pub const FAULTY: &str = "FAULTY";

/// Technician placeholder for sites missing from the directory
pub const NOT_ASSIGNED: &str = "N/A";

// ==========================================
// NumericReading
// ==========================================

/// Result of numeric coercion of a raw field value
#[derive(Debug, Clone, PartialEq)]
pub enum NumericReading {
    Integer(i64),
    Decimal(f64),
    /// Value present but not a number (only for fields that tolerate it)
    Faulty,
    Missing,
}

impl NumericReading {
    pub fn is_faulty(&self) -> bool {
        matches!(self, NumericReading::Faulty)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, NumericReading::Missing)
    }

    /// Cell written for this reading; `Faulty` is stored as the literal `FAULTY`
    pub fn to_cell(&self) -> CellValue {
        match self {
            NumericReading::Integer(i) => CellValue::Int(*i),
            NumericReading::Decimal(f) => CellValue::Float(*f),
            NumericReading::Faulty => CellValue::Text(FAULTY.to_string()),
            NumericReading::Missing => CellValue::Empty,
        }
    }
}

// ==========================================
// FieldValue / Entry
// ==========================================

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Reading(NumericReading),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Reading(_) => None,
        }
    }

    pub fn as_reading(&self) -> Option<&NumericReading> {
        match self {
            FieldValue::Reading(r) => Some(r),
            FieldValue::Text(_) => None,
        }
    }

    /// Blank text renders as an empty cell
    pub fn to_cell(&self) -> CellValue {
        match self {
            FieldValue::Text(s) if s.trim().is_empty() => CellValue::Empty,
            FieldValue::Text(s) => CellValue::Text(s.clone()),
            FieldValue::Reading(r) => r.to_cell(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<NumericReading> for FieldValue {
    fn from(value: NumericReading) -> Self {
        FieldValue::Reading(value)
    }
}

/// Field mapping extracted from one accepted transcript block.
/// Keys are canonical upper-case column names.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Entry {
    fields: BTreeMap<String, FieldValue>,
}

impl Entry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Text of a field, "" when absent or numeric
    pub fn text(&self, field: &str) -> &str {
        self.get(field).and_then(FieldValue::as_text).unwrap_or("")
    }

    pub fn reading(&self, field: &str) -> Option<&NumericReading> {
        self.get(field).and_then(FieldValue::as_reading)
    }

    pub fn site_id(&self) -> &str {
        self.text(fields::SITE_ID)
    }

    /// Visit date as `DD/MM/YYYY`, "" when the block carried no date
    pub fn visit_date(&self) -> &str {
        self.text(fields::CURRENT_VISIT_DATE)
    }

    pub fn current_run_hours(&self) -> Option<&NumericReading> {
        self.reading(fields::CURRENT_DG_RUN_HOURS)
    }

    pub fn is_faulty(&self) -> bool {
        self.current_run_hours()
            .map(NumericReading::is_faulty)
            .unwrap_or(false)
    }

    /// Cell that would be written for `field`; absent fields render empty
    pub fn cell_for(&self, field: &str) -> CellValue {
        self.get(field).map(FieldValue::to_cell).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
