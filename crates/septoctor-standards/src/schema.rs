#![deny(unsafe_code)]

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use septoctor_model::NormalizedKey;
use septoctor_model::key::normalize_key;

use crate::error::StandardsError;
use crate::hash::sha256_hex;

/// Name fragments that mark a canonical field as numeric.
pub const NUMERIC_NAME_MARKERS: &[&str] =
    &["hours", "count", "celsius", "bpm", "apgar", "grams", "weeks"];

/// How values of a canonical field are coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueClass {
    /// yes/no style flags ("Y", "true", "0", ...).
    BooleanLike,
    /// Measurements and counts parsed as floating point.
    Numeric,
    /// Numeric fields that also feed a derived category.
    CategoricalSource,
    /// Passed through untouched.
    FreeText,
}

impl ValueClass {
    /// Class implied by a field name: numeric when the name carries a unit
    /// or count marker, boolean-like otherwise.
    pub fn infer(name: &str) -> Self {
        let name = name.to_lowercase();
        if NUMERIC_NAME_MARKERS
            .iter()
            .any(|marker| name.contains(marker))
        {
            ValueClass::Numeric
        } else {
            ValueClass::BooleanLike
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ValueClass::Numeric | ValueClass::CategoricalSource)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueClass::BooleanLike => "boolean-like",
            ValueClass::Numeric => "numeric",
            ValueClass::CategoricalSource => "categorical-source",
            ValueClass::FreeText => "free-text",
        }
    }
}

impl fmt::Display for ValueClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upper bound of a category band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandLimit {
    /// Value strictly below the bound.
    Below(f64),
    /// Value at or below the bound.
    AtMost(f64),
    /// Catch-all; only valid as the last band.
    Unbounded,
}

impl BandLimit {
    pub fn contains(&self, value: f64) -> bool {
        match self {
            BandLimit::Below(bound) => value < *bound,
            BandLimit::AtMost(bound) => value <= *bound,
            BandLimit::Unbounded => true,
        }
    }

    fn bound(&self) -> Option<f64> {
        match self {
            BandLimit::Below(bound) | BandLimit::AtMost(bound) => Some(*bound),
            BandLimit::Unbounded => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBand {
    pub limit: BandLimit,
    pub label: String,
}

/// Banded label computed from a numeric field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedCategory {
    /// Name of the derived field written to the mapped record.
    pub target: String,
    /// Bands checked in order; the first containing the value wins.
    pub bands: Vec<CategoryBand>,
}

impl DerivedCategory {
    pub fn categorize(&self, value: f64) -> Option<&str> {
        if !value.is_finite() {
            return None;
        }
        self.bands
            .iter()
            .find(|band| band.limit.contains(value))
            .map(|band| band.label.as_str())
    }

    fn validate(&self, field: &str) -> Result<(), StandardsError> {
        let invalid = |message: &str| StandardsError::InvalidBands {
            field: field.to_string(),
            message: message.to_string(),
        };
        if self.target.is_empty() {
            return Err(invalid("derived target name is empty"));
        }
        if self.bands.is_empty() {
            return Err(invalid("no bands declared"));
        }
        let mut previous: Option<f64> = None;
        for (index, band) in self.bands.iter().enumerate() {
            if band.label.trim().is_empty() {
                return Err(invalid("band label is empty"));
            }
            match band.limit.bound() {
                Some(bound) => {
                    if !bound.is_finite() {
                        return Err(invalid("band bound is not finite"));
                    }
                    if previous.is_some_and(|prev| bound <= prev) {
                        return Err(invalid("band bounds must be strictly ascending"));
                    }
                    previous = Some(bound);
                }
                None if index + 1 != self.bands.len() => {
                    return Err(invalid("unbounded band must be last"));
                }
                None => {}
            }
        }
        Ok(())
    }
}

/// One canonical field of the schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalField {
    pub name: String,
    pub class: ValueClass,
    /// Normalized synonyms in priority order.
    pub synonyms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived: Option<DerivedCategory>,
}

impl CanonicalField {
    pub fn new(name: &str, class: ValueClass, synonyms: &[&str]) -> Self {
        Self {
            name: normalize_key(name),
            class,
            synonyms: synonyms.iter().map(|s| normalize_key(s)).collect(),
            derived: None,
        }
    }

    #[must_use]
    pub fn with_derived(mut self, derived: DerivedCategory) -> Self {
        self.derived = Some(derived);
        self
    }

    /// True when `key` is one of this field's synonyms.
    pub fn accepts(&self, key: &NormalizedKey) -> bool {
        self.synonyms.iter().any(|synonym| synonym == key.as_str())
    }
}

/// Versioned, ordered canonical schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalSchema {
    name: String,
    version: String,
    fields: Vec<CanonicalField>,
    examples: Vec<String>,
}

impl CanonicalSchema {
    /// Builds and validates a schema. Field names and synonyms are normalized.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        fields: Vec<CanonicalField>,
        examples: Vec<String>,
    ) -> Result<Self, StandardsError> {
        let schema = Self::assemble(name, version, fields, examples);
        schema.validate()?;
        Ok(schema)
    }

    pub(crate) fn assemble(
        name: impl Into<String>,
        version: impl Into<String>,
        fields: Vec<CanonicalField>,
        examples: Vec<String>,
    ) -> Self {
        let fields = fields
            .into_iter()
            .map(|mut field| {
                field.name = normalize_key(&field.name);
                field.synonyms = field.synonyms.iter().map(|s| normalize_key(s)).collect();
                field
            })
            .collect::<Vec<_>>();
        let examples = if examples.is_empty() {
            fields.iter().take(3).map(|f| f.name.clone()).collect()
        } else {
            examples
        };
        Self {
            name: name.into(),
            version: version.into(),
            fields,
            examples,
        }
    }

    /// Checks structural invariants of the schema.
    pub fn validate(&self) -> Result<(), StandardsError> {
        if self.version.trim().is_empty() {
            return Err(StandardsError::invalid("schema version is empty"));
        }
        if self.fields.is_empty() {
            return Err(StandardsError::invalid("schema declares no fields"));
        }
        let mut names = BTreeSet::new();
        for field in &self.fields {
            if field.name.is_empty() {
                return Err(StandardsError::invalid("field with empty name"));
            }
            if !names.insert(field.name.as_str()) {
                return Err(StandardsError::DuplicateField {
                    field: field.name.clone(),
                });
            }
            if field.synonyms.iter().any(String::is_empty) {
                return Err(StandardsError::invalid(format!(
                    "field {} has an empty synonym",
                    field.name
                )));
            }
        }
        for field in &self.fields {
            let Some(derived) = &field.derived else {
                continue;
            };
            if !field.class.is_numeric() {
                return Err(StandardsError::InvalidBands {
                    field: field.name.clone(),
                    message: format!("derived categories need a numeric field, not {}", field.class),
                });
            }
            derived.validate(&field.name)?;
            if !names.insert(derived.target.as_str()) {
                return Err(StandardsError::DuplicateField {
                    field: derived.target.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Fields in schema order.
    pub fn fields(&self) -> &[CanonicalField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&CanonicalField> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Example field names quoted to operators when nothing maps.
    pub fn examples(&self) -> &[String] {
        &self.examples
    }

    /// Fields that carry derived-category bands, in schema order.
    pub fn derived_sources(&self) -> impl Iterator<Item = (&CanonicalField, &DerivedCategory)> {
        self.fields
            .iter()
            .filter_map(|field| field.derived.as_ref().map(|derived| (field, derived)))
    }

    /// True when any field lists `key` as a synonym.
    pub fn recognizes(&self, key: &NormalizedKey) -> bool {
        self.fields.iter().any(|field| field.accepts(key))
    }

    /// SHA-256 over the JSON form of the schema.
    pub fn fingerprint(&self) -> String {
        let bytes = serde_json::to_vec(self).unwrap_or_default();
        sha256_hex(&bytes)
    }
}
