//! Intake pipeline orchestration.
//!
//! One call per uploaded file, no shared mutable state:
//!
//! 1. **Intake gate** routes by extension and enforces the size cap.
//! 2. Structured files are parsed into one raw record and mapped onto the
//!    canonical schema.
//! 3. Documents pass the relevance screen and go to the OCR collaborator.
//!
//! Every rejection comes back as an [`IntakeError`]; nothing is partially
//! delivered.

use std::path::Path;

use tracing::{info, info_span, warn};

use septoctor_ingest::{IntakeLimits, RelevanceKeywords, check_intake, parse_structured};
use septoctor_map::MappingEngine;
use septoctor_model::{
    DocumentKind, IngestOutput, IngestReport, IntakeDecision, IntakeError, MappingOutcome,
    PipelineKind, SourceFormat,
};
use septoctor_ocr::{OcrClient, OcrError};
use septoctor_standards::CanonicalSchema;

use crate::config::{ConfigError, IntakeConfig};

/// Runs uploaded files through intake, mapping, and OCR.
///
/// The schema is borrowed read-only; the pipeline itself is `Send + Sync`
/// and can be shared between threads.
pub struct IntakePipeline<'s> {
    schema: &'s CanonicalSchema,
    limits: IntakeLimits,
    relevance: RelevanceKeywords,
    ocr: Option<Box<dyn OcrClient>>,
}

impl<'s> IntakePipeline<'s> {
    /// Pipeline with default limits and keywords and no OCR collaborator.
    pub fn new(schema: &'s CanonicalSchema) -> Self {
        Self {
            schema,
            limits: IntakeLimits::default(),
            relevance: RelevanceKeywords::default(),
            ocr: None,
        }
    }

    /// Pipeline configured from `config`, including its OCR client.
    pub fn from_config(
        schema: &'s CanonicalSchema,
        config: &IntakeConfig,
    ) -> Result<Self, ConfigError> {
        let mut pipeline = Self::new(schema)
            .with_limits(config.limits)
            .with_relevance(config.relevance.clone());
        pipeline.ocr = config.ocr_client()?;
        Ok(pipeline)
    }

    #[must_use]
    pub fn with_limits(mut self, limits: IntakeLimits) -> Self {
        self.limits = limits;
        self
    }

    #[must_use]
    pub fn with_relevance(mut self, relevance: RelevanceKeywords) -> Self {
        self.relevance = relevance;
        self
    }

    #[must_use]
    pub fn with_ocr(mut self, client: Box<dyn OcrClient>) -> Self {
        self.ocr = Some(client);
        self
    }

    pub fn schema(&self) -> &'s CanonicalSchema {
        self.schema
    }

    pub fn limits(&self) -> &IntakeLimits {
        &self.limits
    }

    pub fn has_ocr(&self) -> bool {
        self.ocr.is_some()
    }

    /// Runs the intake gate and, for documents, the relevance screen.
    ///
    /// Nothing is read or parsed; only the name and size are inspected.
    pub fn check(&self, filename: &str, size: u64) -> IntakeDecision {
        let kind = match check_intake(filename, size, &self.limits) {
            Ok(kind) => kind,
            Err(error) => return IntakeDecision::from_error(&error),
        };
        match kind {
            PipelineKind::Structured(format) => IntakeDecision::accept(
                Some(kind),
                format!("{} file accepted for structured mapping", format.label()),
            ),
            PipelineKind::Unstructured(_) => {
                let mut decision = self.relevance.decide(filename);
                if decision.accepted {
                    decision.kind = Some(kind);
                }
                decision
            }
        }
    }

    /// Parses and maps a structured payload.
    ///
    /// Parse failures are folded into an invalid outcome.
    pub fn ingest_structured(&self, bytes: &[u8], format: SourceFormat) -> MappingOutcome {
        match parse_structured(bytes, format) {
            Ok(raw) => MappingEngine::new(self.schema).map_record(&raw, format),
            Err(error) => {
                warn!(format = %format, kind = error.kind(), "structured file rejected");
                MappingOutcome::rejected(error, format)
            }
        }
    }

    /// Runs the full pipeline on an in-memory upload.
    pub fn ingest(&self, filename: &str, bytes: &[u8]) -> Result<IngestReport, IntakeError> {
        let _span = info_span!("ingest", filename).entered();

        let kind = check_intake(filename, bytes.len() as u64, &self.limits)?;
        let report = match kind {
            PipelineKind::Structured(format) => {
                let outcome = self.ingest_structured(bytes, format);
                let message = outcome.message.clone();
                IngestReport {
                    output: IngestOutput::Structured(outcome.into_result()?),
                    message,
                }
            }
            PipelineKind::Unstructured(document) => {
                self.extract_document(filename, document, bytes)?
            }
        };

        info!(pipeline = %kind, "ingestion complete");
        Ok(report)
    }

    /// Reads `path` and runs the full pipeline on it.
    ///
    /// The intake gate runs on the file's metadata before any bytes are read.
    pub fn ingest_path(&self, path: &Path) -> Result<IngestReport, IntakeError> {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let metadata = std::fs::metadata(path).map_err(|e| file_read_error(path, &e))?;
        check_intake(&filename, metadata.len(), &self.limits)?;

        let bytes = std::fs::read(path).map_err(|e| file_read_error(path, &e))?;
        self.ingest(&filename, &bytes)
    }

    fn extract_document(
        &self,
        filename: &str,
        document: DocumentKind,
        bytes: &[u8],
    ) -> Result<IngestReport, IntakeError> {
        self.relevance.check(filename)?;
        let ocr = self.ocr.as_ref().ok_or(OcrError::NotConfigured)?;
        let text = ocr.extract_text(bytes).map_err(|error| {
            warn!(document = %document, error = %error, "OCR failed");
            IntakeError::from(error)
        })?;
        let message = format!(
            "Extracted {} characters from {} document",
            text.chars().count(),
            document.as_str().to_uppercase()
        );
        Ok(IngestReport {
            output: IngestOutput::FreeText(text),
            message,
        })
    }
}

fn file_read_error(path: &Path, error: &std::io::Error) -> IntakeError {
    IntakeError::FileRead {
        path: path.display().to_string(),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use septoctor_standards::builtin_schema;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_pipeline_is_send_and_sync() {
        assert_send_sync::<IntakePipeline<'static>>();
    }

    #[test]
    fn test_check_screens_documents_only() {
        let schema = builtin_schema();
        let pipeline = IntakePipeline::new(&schema);

        let decision = pipeline.check("holiday_notes.csv", 100);
        assert!(decision.accepted);
        assert_eq!(decision.kind, Some(PipelineKind::Structured(SourceFormat::Csv)));

        let decision = pipeline.check("holiday_notes.pdf", 100);
        assert!(!decision.accepted);
        assert!(decision.kind.is_none());
    }

    #[test]
    fn test_missing_ocr_is_ocr_failure() {
        let schema = builtin_schema();
        let err = IntakePipeline::new(&schema)
            .ingest("case_sheet.pdf", b"%PDF")
            .unwrap_err();
        assert!(matches!(err, IntakeError::OcrFailure { .. }));
    }
}
