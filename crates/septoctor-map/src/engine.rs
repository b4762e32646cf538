//! Mapping engine.

use tracing::{debug, info, warn};

use septoctor_model::{
    IntakeError, MappedRecord, MappedRecordBuilder, MappingOutcome, RawRecord, SourceFormat,
};
use septoctor_standards::CanonicalSchema;

use crate::coerce::coerce_value;
use crate::derive::derive_categories;
use crate::resolve::{NormalizedRecord, resolve_field};

/// A successfully mapped record and its match count.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedFields {
    pub record: MappedRecord,
    /// Canonical fields matched from raw keys; derived categories excluded.
    pub mapped_field_count: usize,
}

/// Maps raw records onto a canonical schema.
///
/// The engine borrows the schema and holds no other state, so one engine can
/// serve any number of records.
#[derive(Debug, Clone, Copy)]
pub struct MappingEngine<'s> {
    schema: &'s CanonicalSchema,
}

impl<'s> MappingEngine<'s> {
    pub fn new(schema: &'s CanonicalSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &'s CanonicalSchema {
        self.schema
    }

    /// Maps `raw` and reports the result as a [`MappingOutcome`].
    pub fn map_record(&self, raw: &RawRecord, format: SourceFormat) -> MappingOutcome {
        match self.try_map(raw) {
            Ok(mapped) => {
                info!(
                    format = %format,
                    mapped = mapped.mapped_field_count,
                    fields = mapped.record.len(),
                    "record mapped"
                );
                MappingOutcome::accepted(mapped.record, mapped.mapped_field_count, format)
            }
            Err(error) => {
                warn!(format = %format, kind = error.kind(), "record rejected");
                MappingOutcome::rejected(error, format)
            }
        }
    }

    /// Maps `raw`, failing with [`IntakeError::NoFieldsMapped`] when no key
    /// matches a canonical field.
    pub fn try_map(&self, raw: &RawRecord) -> Result<MappedFields, IntakeError> {
        let normalized = NormalizedRecord::new(raw);
        let mut builder = MappedRecordBuilder::new();
        let mut mapped_field_count = 0;

        for field in self.schema.fields() {
            let Some((synonym, value)) = resolve_field(field, &normalized) else {
                continue;
            };
            debug!(field = %field.name, synonym, class = %field.class, "field resolved");
            builder.insert(field.name.clone(), coerce_value(field.class, value));
            mapped_field_count += 1;
        }

        let unrecognized = normalized.unrecognized(self.schema);
        if !unrecognized.is_empty() {
            debug!(keys = ?unrecognized, "raw keys matched no canonical field");
        }

        if mapped_field_count == 0 {
            return Err(IntakeError::NoFieldsMapped {
                examples: self.schema.examples().to_vec(),
            });
        }

        derive_categories(self.schema, &mut builder);
        Ok(MappedFields {
            record: builder.build(),
            mapped_field_count,
        })
    }
}
