//! File kinds recognized by the intake gate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Format of a structured input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Csv,
    Json,
}

impl SourceFormat {
    pub const ALL: [SourceFormat; 2] = [SourceFormat::Csv, SourceFormat::Json];

    /// Lowercase file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            SourceFormat::Csv => "csv",
            SourceFormat::Json => "json",
        }
    }

    /// Uppercase label used in operator messages ("CSV", "JSON").
    pub fn label(&self) -> &'static str {
        match self {
            SourceFormat::Csv => "CSV",
            SourceFormat::Json => "JSON",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SourceFormat {
    type Err = String;

    /// Parses a file extension, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(SourceFormat::Csv),
            "json" => Ok(SourceFormat::Json),
            other => Err(format!("not a structured format: {other}")),
        }
    }
}

/// Kind of an unstructured document that needs OCR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Jpeg,
    Png,
    Doc,
    Docx,
    Txt,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Jpeg => "jpeg",
            DocumentKind::Png => "png",
            DocumentKind::Doc => "doc",
            DocumentKind::Docx => "docx",
            DocumentKind::Txt => "txt",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(DocumentKind::Pdf),
            "jpg" | "jpeg" => Ok(DocumentKind::Jpeg),
            "png" => Ok(DocumentKind::Png),
            "doc" => Ok(DocumentKind::Doc),
            "docx" => Ok(DocumentKind::Docx),
            "txt" => Ok(DocumentKind::Txt),
            other => Err(format!("not a document format: {other}")),
        }
    }
}

/// Which pipeline a file is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "pipeline", content = "format", rename_all = "snake_case")]
pub enum PipelineKind {
    /// CSV/JSON parsed and mapped onto the canonical schema.
    Structured(SourceFormat),
    /// Document text extracted by the OCR collaborator.
    Unstructured(DocumentKind),
}

impl PipelineKind {
    /// Classifies a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        if let Ok(format) = ext.parse::<SourceFormat>() {
            return Some(PipelineKind::Structured(format));
        }
        ext.parse::<DocumentKind>()
            .ok()
            .map(PipelineKind::Unstructured)
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, PipelineKind::Structured(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            PipelineKind::Structured(_) => "structured",
            PipelineKind::Unstructured(_) => "unstructured",
        }
    }
}

impl fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineKind::Structured(format) => write!(f, "structured ({format})"),
            PipelineKind::Unstructured(kind) => write!(f, "unstructured ({kind})"),
        }
    }
}
