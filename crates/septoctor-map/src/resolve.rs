//! Synonym resolution against normalized raw keys.

use std::collections::BTreeMap;

use tracing::debug;

use septoctor_model::{FieldValue, NormalizedKey, RawRecord};
use septoctor_standards::{CanonicalField, CanonicalSchema};

/// A raw record indexed by normalized key.
///
/// When two raw keys normalize to the same key, the later one in source order
/// wins.
#[derive(Debug)]
pub struct NormalizedRecord<'a> {
    entries: BTreeMap<String, (&'a str, &'a FieldValue)>,
    raw: &'a RawRecord,
}

impl<'a> NormalizedRecord<'a> {
    pub fn new(raw: &'a RawRecord) -> Self {
        let mut entries = BTreeMap::new();
        for (key, value) in raw.iter() {
            let normalized = NormalizedKey::new(key).into_inner();
            if let Some((previous, _)) = entries.insert(normalized, (key, value)) {
                debug!(previous, replaced_by = key, "raw keys collide after normalization");
            }
        }
        Self { entries, raw }
    }

    /// Value stored under an already normalized key.
    pub fn get(&self, normalized: &str) -> Option<&'a FieldValue> {
        self.entries.get(normalized).map(|(_, value)| *value)
    }

    /// Original spelling of the raw key that supplied `normalized`.
    pub fn source_key(&self, normalized: &str) -> Option<&'a str> {
        self.entries.get(normalized).map(|(key, _)| *key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw keys, in source order, that match no synonym of any field.
    pub fn unrecognized(&self, schema: &CanonicalSchema) -> Vec<&'a str> {
        self.raw
            .keys()
            .filter(|key| !schema.recognizes(&NormalizedKey::new(key)))
            .collect()
    }
}

/// Finds the first synonym of `field` present in `record`.
///
/// Returns the matching synonym and its value.
pub fn resolve_field<'f, 'a>(
    field: &'f CanonicalField,
    record: &NormalizedRecord<'a>,
) -> Option<(&'f str, &'a FieldValue)> {
    field
        .synonyms
        .iter()
        .find_map(|synonym| record.get(synonym).map(|value| (synonym.as_str(), value)))
}
