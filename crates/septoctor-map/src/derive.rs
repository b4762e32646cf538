//! Derived categories for numeric source fields.

use tracing::debug;

use septoctor_model::{FieldValue, MappedRecordBuilder};
use septoctor_standards::CanonicalSchema;

/// Adds the derived category of every numeric source field in `record`.
///
/// A source that is absent, still text after coercion, or outside every band
/// yields nothing. Returns the number of categories added.
pub fn derive_categories(schema: &CanonicalSchema, record: &mut MappedRecordBuilder) -> usize {
    let mut added = 0;
    for (field, derived) in schema.derived_sources() {
        let Some(value) = record.get(&field.name).and_then(FieldValue::as_number) else {
            continue;
        };
        if let Some(label) = derived.categorize(value) {
            debug!(source = %field.name, target = %derived.target, "derived category");
            record.insert(derived.target.clone(), FieldValue::text(label));
            added += 1;
        }
    }
    added
}
