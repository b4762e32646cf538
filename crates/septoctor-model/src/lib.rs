//! Data model for single-record clinical intake.
//!
//! Types shared by every stage of the intake pipeline:
//!
//! - [`RawRecord`]: one loosely-shaped record exactly as parsed from a file
//! - [`NormalizedKey`]: a raw key canonicalized for synonym matching
//! - [`MappedRecord`]: the typed record keyed by canonical field names
//! - [`MappingOutcome`] / [`IntakeDecision`]: terminal results of the
//!   structured pipeline and of the intake/relevance gates
//! - [`IngestOutput`]: the tagged value handed to the downstream consumer
//! - [`IntakeError`]: the rejection taxonomy

pub mod error;
pub mod key;
pub mod kinds;
pub mod outcome;
pub mod record;

pub use error::{IntakeError, Result};
pub use key::NormalizedKey;
pub use kinds::{DocumentKind, PipelineKind, SourceFormat};
pub use outcome::{IngestOutput, IngestReport, IntakeDecision, MappingOutcome};
pub use record::{FieldValue, MappedRecord, MappedRecordBuilder, RawRecord};
