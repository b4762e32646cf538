//! Intake gate: file type routing and size caps.

use serde::{Deserialize, Serialize};
use tracing::debug;

use septoctor_model::{IntakeDecision, IntakeError, PipelineKind};

/// Size cap for CSV/JSON uploads (1 MB).
pub const STRUCTURED_MAX_BYTES: u64 = 1024 * 1024;

/// Size cap for documents sent to OCR (3 MB).
pub const UNSTRUCTURED_MAX_BYTES: u64 = 3 * 1024 * 1024;

/// Per-pipeline size caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeLimits {
    pub structured_max_bytes: u64,
    pub unstructured_max_bytes: u64,
}

impl Default for IntakeLimits {
    fn default() -> Self {
        Self {
            structured_max_bytes: STRUCTURED_MAX_BYTES,
            unstructured_max_bytes: UNSTRUCTURED_MAX_BYTES,
        }
    }
}

impl IntakeLimits {
    /// Returns the cap that applies to `kind`.
    pub fn max_bytes_for(&self, kind: PipelineKind) -> u64 {
        match kind {
            PipelineKind::Structured(_) => self.structured_max_bytes,
            PipelineKind::Unstructured(_) => self.unstructured_max_bytes,
        }
    }
}

/// Lowercased text after the last `.` of the file name, if any.
///
/// Directory components are ignored, so `"cases.v2/report"` has no extension.
pub fn file_extension(filename: &str) -> Option<String> {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_ascii_lowercase())
    }
}

/// Routes a file to its pipeline and enforces the size cap.
///
/// A file exactly at the cap is accepted.
pub fn check_intake(
    filename: &str,
    size: u64,
    limits: &IntakeLimits,
) -> Result<PipelineKind, IntakeError> {
    let kind = file_extension(filename)
        .and_then(|ext| PipelineKind::from_extension(&ext))
        .ok_or_else(|| IntakeError::UnsupportedType {
            filename: filename.to_string(),
        })?;

    let max_size = limits.max_bytes_for(kind);
    if size > max_size {
        return Err(IntakeError::OversizedFile {
            filename: filename.to_string(),
            size,
            max_size,
        });
    }

    debug!(filename, size, pipeline = %kind, "file passed intake gate");
    Ok(kind)
}

/// Same as [`check_intake`], folded into an [`IntakeDecision`].
pub fn evaluate_intake(filename: &str, size: u64, limits: &IntakeLimits) -> IntakeDecision {
    match check_intake(filename, size, limits) {
        Ok(kind) => IntakeDecision::accept(
            Some(kind),
            format!("accepted for the {} pipeline", kind.label()),
        ),
        Err(error) => IntakeDecision::from_error(&error),
    }
}
