#![deny(unsafe_code)]

//! OCR collaborator for documents on the unstructured intake path.
//!
//! The pipeline only depends on the [`OcrClient`] trait; [`HttpOcrClient`] is
//! the production implementation that posts base64-encoded document bytes to
//! a text-extraction service. Failures are never retried.

mod client;
mod config;
mod error;

pub use client::{HttpOcrClient, OcrClient};
pub use config::{DEFAULT_TIMEOUT_SECS, OcrConfig};
pub use error::{OcrError, Result};
