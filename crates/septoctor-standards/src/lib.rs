#![deny(unsafe_code)]

//! Canonical clinical schema.
//!
//! The schema is a versioned, ordered table of canonical fields. Each field
//! declares a value class and a priority-ordered synonym list; numeric fields
//! may also carry derived-category bands. A schema is an explicitly
//! constructed immutable value: the engine receives it by reference and
//! never mutates it.
//!
//! The built-in table is available through [`builtin_schema`]; a replacement
//! can be loaded from TOML with [`load_schema`].

pub mod builtin;
pub mod error;
pub mod hash;
pub mod loader;
pub mod schema;

pub use crate::builtin::{BUILTIN_SCHEMA_NAME, BUILTIN_SCHEMA_VERSION, builtin_schema};
pub use crate::error::StandardsError;
pub use crate::loader::{load_schema, parse_schema_toml};
pub use crate::schema::{
    BandLimit, CanonicalField, CanonicalSchema, CategoryBand, DerivedCategory,
    NUMERIC_NAME_MARKERS, ValueClass,
};
