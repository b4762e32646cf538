//! Resolution of the effective intake configuration.
//!
//! Precedence, highest first: command-line flags, the `--config` file, the
//! built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use septoctor_core::IntakeConfig;
use septoctor_ocr::OcrConfig;

/// Configuration-related command-line flags.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config: Option<PathBuf>,
    pub schema: Option<PathBuf>,
    pub ocr_endpoint: Option<String>,
}

/// Builds the configuration the commands run with.
///
/// A relative `schema` path inside a config file is resolved against the
/// directory of that file.
pub fn resolve_config(overrides: &ConfigOverrides) -> Result<IntakeConfig> {
    let mut config = match &overrides.config {
        Some(path) => {
            let mut config = IntakeConfig::load(path)
                .with_context(|| format!("load config {}", path.display()))?;
            if let Some(schema) = config.schema.take() {
                config.schema = Some(relative_to(path, schema));
            }
            config
        }
        None => IntakeConfig::default(),
    };

    if let Some(schema) = &overrides.schema {
        config.schema = Some(schema.clone());
    }
    if let Some(endpoint) = &overrides.ocr_endpoint {
        match &mut config.ocr {
            Some(ocr) => ocr.endpoint.clone_from(endpoint),
            None => config.ocr = Some(OcrConfig::new(endpoint.clone())),
        }
    }
    Ok(config)
}

fn relative_to(config_path: &Path, schema: PathBuf) -> PathBuf {
    if schema.is_absolute() {
        return schema;
    }
    match config_path.parent() {
        Some(dir) => dir.join(schema),
        None => schema,
    }
}
