#![deny(unsafe_code)]

//! Mapping of raw structured records onto the canonical clinical schema.
//!
//! For each canonical field, in schema order, the first synonym present among
//! the normalized raw keys supplies the value. The value is then coerced by
//! the field's value class, and numeric sources gain their derived category.

pub mod coerce;
pub mod derive;
pub mod engine;
pub mod resolve;

pub use coerce::{coerce_boolean, coerce_numeric, coerce_value, parse_leading_number};
pub use derive::derive_categories;
pub use engine::{MappedFields, MappingEngine};
pub use resolve::{NormalizedRecord, resolve_field};
