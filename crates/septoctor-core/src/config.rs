//! Intake configuration file.
//!
//! ```toml
//! schema = "standards/canonical_schema.toml"
//!
//! [limits]
//! structured_max_bytes = 1048576
//! unstructured_max_bytes = 3145728
//!
//! [relevance]
//! allow = ["case", "patient", "report"]
//! block = ["holiday", "selfie"]
//!
//! [ocr]
//! endpoint = "http://localhost:3000/api/ocr"
//! timeout_secs = 30
//! ```
//!
//! Every section is optional.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use septoctor_ingest::{IntakeLimits, RelevanceKeywords};
use septoctor_ocr::{HttpOcrClient, OcrClient, OcrConfig, OcrError};
use septoctor_standards::{CanonicalSchema, StandardsError, builtin_schema, load_schema};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Schema(#[from] StandardsError),

    #[error(transparent)]
    Ocr(#[from] OcrError),
}

/// Settings for one intake deployment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntakeConfig {
    /// Schema file replacing the built-in table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<PathBuf>,
    pub limits: IntakeLimits,
    pub relevance: RelevanceKeywords,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ocr: Option<OcrConfig>,
}

impl IntakeConfig {
    /// Reads a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config = Self::from_toml_str(&contents, path)?;
        debug!(path = %path.display(), "loaded intake config");
        Ok(config)
    }

    /// Parses config text; `origin` is only used in error messages.
    pub fn from_toml_str(contents: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Toml {
            path: origin.to_path_buf(),
            source: e,
        })
    }

    /// Loads the configured schema, or the built-in one.
    pub fn load_schema(&self) -> Result<CanonicalSchema, ConfigError> {
        match &self.schema {
            Some(path) => Ok(load_schema(path)?),
            None => Ok(builtin_schema()),
        }
    }

    /// Builds the HTTP OCR client when an endpoint is configured.
    pub fn ocr_client(&self) -> Result<Option<Box<dyn OcrClient>>, ConfigError> {
        match &self.ocr {
            Some(ocr) => {
                let client: Box<dyn OcrClient> = Box::new(HttpOcrClient::new(ocr)?);
                Ok(Some(client))
            }
            None => Ok(None),
        }
    }
}
