#![deny(unsafe_code)]

//! Intake pipeline for neonatal sepsis case files.
//!
//! [`IntakePipeline`] wires the intake gate, structured parsing, the mapping
//! engine, the relevance screen, and the OCR collaborator into one
//! synchronous call per uploaded file. [`IntakeConfig`] carries the tunable
//! parts (size caps, keyword lists, OCR endpoint, schema file).

pub mod config;
pub mod pipeline;

pub use config::{ConfigError, IntakeConfig};
pub use pipeline::IntakePipeline;
