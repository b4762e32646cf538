//! CLI library components for septoctor intake.

pub mod logging;
pub mod settings;
pub mod summary;
