//! Intake for clinical case files.
//!
//! This crate sits in front of the mapping engine and the OCR collaborator:
//!
//! - **Intake gate**: routes a file to the structured or unstructured pipeline
//!   by extension and enforces the per-pipeline size cap.
//! - **Structured parsing**: reads exactly one patient record from a CSV or
//!   JSON payload into a [`RawRecord`](septoctor_model::RawRecord).
//! - **Relevance screen**: filename keyword heuristic run before OCR.
//!
//! # Example
//!
//! ```ignore
//! use septoctor_ingest::{IntakeLimits, check_intake, parse_structured};
//! use septoctor_model::PipelineKind;
//!
//! let limits = IntakeLimits::default();
//! if let PipelineKind::Structured(format) = check_intake("case.csv", bytes.len() as u64, &limits)? {
//!     let raw = parse_structured(&bytes, format)?;
//! }
//! ```

mod gate;
mod relevance;
mod structured;

// === Intake Gate ===
pub use gate::{
    IntakeLimits, STRUCTURED_MAX_BYTES, UNSTRUCTURED_MAX_BYTES, check_intake, evaluate_intake,
    file_extension,
};

// === Structured Parsing ===
pub use structured::{parse_csv_record, parse_json_record, parse_structured};

// === Relevance Screen ===
pub use relevance::{
    DEFAULT_ALLOW_KEYWORDS, DEFAULT_BLOCK_KEYWORDS, RelevanceKeywords, RelevanceVerdict,
};
