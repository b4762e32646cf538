//! Rejection taxonomy for the intake pipeline.

use thiserror::Error;

use crate::kinds::SourceFormat;

/// Reasons an ingestion call is rejected.
///
/// None of these is fatal to the process: each is caught at the boundary
/// where it is detected and reported to the operator via [`user_message`].
///
/// [`user_message`]: IntakeError::user_message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    /// Extension is neither structured nor a supported document type.
    #[error("unsupported file type for {filename}")]
    UnsupportedType { filename: String },

    /// File exceeds the size cap of its pipeline.
    #[error("file {filename} is {size} bytes, limit is {max_size} bytes")]
    OversizedFile {
        filename: String,
        size: u64,
        max_size: u64,
    },

    /// Structured file holds more than one record.
    #[error("file contains {records} records, only one is accepted")]
    MultiRecordFile { records: usize },

    /// Structured file holds no record.
    #[error("{format} file contains 0 records")]
    EmptyFile { format: SourceFormat },

    /// The underlying parser rejected the content.
    #[error("failed to parse {format}: {message}")]
    ParseError {
        format: SourceFormat,
        message: String,
    },

    /// No key matched any canonical field.
    #[error("no recognized clinical fields (expected fields like {})", .examples.join(", "))]
    NoFieldsMapped { examples: Vec<String> },

    /// Filename matched the relevance blocklist.
    #[error("document {filename} looks irrelevant (matched '{keyword}')")]
    IrrelevantDocument { filename: String, keyword: String },

    /// The OCR collaborator failed or is unavailable.
    #[error("OCR failed: {message}")]
    OcrFailure { message: String },

    /// Reading the input file failed.
    #[error("failed to read file {path}: {message}")]
    FileRead { path: String, message: String },
}

impl IntakeError {
    /// Returns an operator-facing message for this rejection.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::UnsupportedType { .. } => "Invalid file type. Please upload a CSV or JSON file, \
                 or a PDF, image, DOC/DOCX, or TXT document."
                .to_string(),
            Self::OversizedFile { max_size, .. } => format!(
                "File size exceeds {} limit. Please upload a smaller file.",
                format_size_limit(*max_size)
            ),
            Self::MultiRecordFile { records } => format!(
                "File contains {records} records. Please upload a file with only one patient record."
            ),
            Self::EmptyFile {
                format: SourceFormat::Csv,
            } => "CSV file must contain a header row and one data row (0 records found)."
                .to_string(),
            Self::EmptyFile {
                format: SourceFormat::Json,
            } => "File is empty (0 records found).".to_string(),
            Self::ParseError { format, message } => {
                format!("Error parsing {format} file: {message}")
            }
            Self::NoFieldsMapped { examples } => format!(
                "No valid patient data fields found in file. Please ensure the file contains \
                 medical assessment fields like {}, etc.",
                examples.join(", ")
            ),
            Self::IrrelevantDocument { .. } => "File appears to be irrelevant. Please upload a \
                 medical case sheet or patient report."
                .to_string(),
            Self::OcrFailure { .. } => {
                "OCR failed. Please try again or use manual entry.".to_string()
            }
            Self::FileRead { .. } => {
                "Could not read the selected file. Please try again.".to_string()
            }
        }
    }

    /// Short machine-readable name of the rejection kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedType { .. } => "unsupported_type",
            Self::OversizedFile { .. } => "oversized_file",
            Self::MultiRecordFile { .. } => "multi_record_file",
            Self::EmptyFile { .. } => "empty_file",
            Self::ParseError { .. } => "parse_error",
            Self::NoFieldsMapped { .. } => "no_fields_mapped",
            Self::IrrelevantDocument { .. } => "irrelevant_document",
            Self::OcrFailure { .. } => "ocr_failure",
            Self::FileRead { .. } => "file_read",
        }
    }
}

/// Formats a byte limit as whole MB when possible ("1 MB", "3 MB").
fn format_size_limit(bytes: u64) -> String {
    const MIB: u64 = 1024 * 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{} MB", bytes / MIB)
    } else {
        format!("{bytes} bytes")
    }
}

pub type Result<T> = std::result::Result<T, IntakeError>;
