// ==========================================
// Fuel Ledger - Importer layer
// ==========================================
// Responsibility: chat transcript -> Entries + unmatched blocks
// ==========================================

pub mod block_extractor;
pub mod error;
pub mod normalizer;
pub mod technician_directory;
pub mod unmatched_exporter;

pub use block_extractor::{
    BlockExtractor, BlockOutcome, ExtractionResult, MISSING_FIELDS_REASON, PARSE_FAILED_REASON,
};
pub use error::{ImportError, ImportResult};
pub use normalizer::Normalizer;
pub use technician_directory::TechnicianDirectory;
pub use unmatched_exporter::UnmatchedExporter;
