//! Terminal results of the intake pipeline.

use serde::{Deserialize, Serialize};

use crate::error::IntakeError;
use crate::kinds::{PipelineKind, SourceFormat};
use crate::record::MappedRecord;

/// Result of the structured mapping pipeline.
///
/// Either a valid outcome carrying the mapped record, or an invalid one
/// carrying the rejection; there is no partially mapped output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingOutcome {
    pub record: Option<MappedRecord>,
    pub valid: bool,
    pub message: String,
    pub mapped_field_count: usize,
    pub format: SourceFormat,
    #[serde(skip)]
    pub rejection: Option<IntakeError>,
}

impl MappingOutcome {
    /// Builds a valid outcome.
    pub fn accepted(record: MappedRecord, mapped_field_count: usize, format: SourceFormat) -> Self {
        Self {
            record: Some(record),
            valid: true,
            message: format!(
                "Successfully mapped {mapped_field_count} fields from {} file",
                format.label()
            ),
            mapped_field_count,
            format,
            rejection: None,
        }
    }

    /// Builds an invalid outcome from a rejection.
    pub fn rejected(error: IntakeError, format: SourceFormat) -> Self {
        Self {
            record: None,
            valid: false,
            message: error.user_message(),
            mapped_field_count: 0,
            format,
            rejection: Some(error),
        }
    }

    /// Converts into the mapped record, or the rejection that prevented it.
    pub fn into_result(self) -> Result<MappedRecord, IntakeError> {
        match (self.record, self.rejection) {
            (Some(record), None) => Ok(record),
            (_, Some(error)) => Err(error),
            (None, None) => Err(IntakeError::NoFieldsMapped {
                examples: Vec::new(),
            }),
        }
    }
}

/// Output of the intake and relevance gates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeDecision {
    pub accepted: bool,
    pub reason: String,
    /// Pipeline the file was routed to, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PipelineKind>,
}

impl IntakeDecision {
    pub fn accept(kind: Option<PipelineKind>, reason: impl Into<String>) -> Self {
        Self {
            accepted: true,
            reason: reason.into(),
            kind,
        }
    }

    pub fn reject(reason: impl Into<String>) -> Self {
        Self {
            accepted: false,
            reason: reason.into(),
            kind: None,
        }
    }

    /// Rejection decision carrying the operator-facing message of `error`.
    pub fn from_error(error: &IntakeError) -> Self {
        Self::reject(error.user_message())
    }
}

/// Value delivered to the downstream consumer.
///
/// Tagged so consumers never have to sniff whether they received a mapped
/// record or raw OCR text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum IngestOutput {
    Structured(MappedRecord),
    FreeText(String),
}

impl IngestOutput {
    pub fn as_record(&self) -> Option<&MappedRecord> {
        match self {
            IngestOutput::Structured(record) => Some(record),
            IngestOutput::FreeText(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            IngestOutput::FreeText(text) => Some(text),
            IngestOutput::Structured(_) => None,
        }
    }
}

/// Successful ingestion: the output plus the operator message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestReport {
    pub output: IngestOutput,
    pub message: String,
}
