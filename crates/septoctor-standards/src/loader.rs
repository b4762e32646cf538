#![deny(unsafe_code)]

//! TOML schema files.
//!
//! ```toml
//! [schema]
//! name = "neonatal-sepsis-intake"
//! version = "1.0.0"
//! examples = ["birth_weight", "gestational_age"]
//!
//! [[fields]]
//! name = "birth_weight_grams"
//! class = "categorical_source"
//! synonyms = ["birth_weight", "weight", "birth_weight_grams", "bw"]
//!
//! [fields.derived]
//! target = "birth_weight_category"
//! bands = [
//!     { below = 1500.0, label = "<1500 g" },
//!     { below = 2500.0, label = "1500–2499 g" },
//!     { label = "≥2500 g" },
//! ]
//! ```
//!
//! `class` may be omitted; it is then inferred from the field name.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StandardsError;
use crate::schema::{
    BandLimit, CanonicalField, CanonicalSchema, CategoryBand, DerivedCategory, ValueClass,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaFile {
    pub schema: SchemaHeader,
    pub fields: Vec<FieldEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaHeader {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldEntry {
    pub name: String,
    #[serde(default)]
    pub class: Option<ValueClass>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub derived: Option<DerivedEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivedEntry {
    pub target: String,
    pub bands: Vec<BandEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandEntry {
    #[serde(default)]
    pub below: Option<f64>,
    #[serde(default)]
    pub at_most: Option<f64>,
    pub label: String,
}

impl BandEntry {
    fn into_band(self, field: &str) -> Result<CategoryBand, StandardsError> {
        let limit = match (self.below, self.at_most) {
            (Some(bound), None) => BandLimit::Below(bound),
            (None, Some(bound)) => BandLimit::AtMost(bound),
            (None, None) => BandLimit::Unbounded,
            (Some(_), Some(_)) => {
                return Err(StandardsError::InvalidBands {
                    field: field.to_string(),
                    message: format!("band '{}' sets both below and at_most", self.label),
                });
            }
        };
        Ok(CategoryBand {
            limit,
            label: self.label,
        })
    }
}

impl SchemaFile {
    pub fn into_schema(self) -> Result<CanonicalSchema, StandardsError> {
        let mut fields = Vec::with_capacity(self.fields.len());
        for entry in self.fields {
            let class = entry.class.unwrap_or_else(|| ValueClass::infer(&entry.name));
            let mut field = CanonicalField {
                name: entry.name,
                class,
                synonyms: entry.synonyms,
                derived: None,
            };
            if let Some(derived) = entry.derived {
                let bands = derived
                    .bands
                    .into_iter()
                    .map(|band| band.into_band(&field.name))
                    .collect::<Result<Vec<_>, _>>()?;
                field.derived = Some(DerivedCategory {
                    target: derived.target,
                    bands,
                });
            }
            fields.push(field);
        }
        CanonicalSchema::new(
            self.schema.name,
            self.schema.version,
            fields,
            self.schema.examples,
        )
    }
}

/// Parses and validates a schema from TOML text.
///
/// `origin` is only used in error messages.
pub fn parse_schema_toml(contents: &str, origin: &Path) -> Result<CanonicalSchema, StandardsError> {
    let file: SchemaFile = toml::from_str(contents).map_err(|e| StandardsError::Toml {
        path: origin.to_path_buf(),
        source: e,
    })?;
    file.into_schema()
}

/// Loads and validates a schema file.
pub fn load_schema(path: &Path) -> Result<CanonicalSchema, StandardsError> {
    let contents = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    let schema = parse_schema_toml(&contents, path)?;
    debug!(
        path = %path.display(),
        name = schema.name(),
        version = schema.version(),
        fields = schema.len(),
        "loaded canonical schema"
    );
    Ok(schema)
}
