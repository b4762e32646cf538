//! CLI argument definitions for septoctor.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use septoctor_cli::settings::ConfigOverrides;

#[derive(Parser)]
#[command(
    name = "septoctor",
    version,
    about = "Neonatal sepsis case-file intake",
    long_about = "Ingest one neonatal sepsis case file per call.\n\n\
                  CSV and JSON files are mapped onto the canonical clinical schema;\n\
                  PDF, image, DOC/DOCX and TXT documents are sent to the OCR service."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Intake configuration file (TOML).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Canonical schema file replacing the built-in table.
    #[arg(long = "schema", value_name = "PATH", global = true)]
    pub schema: Option<PathBuf>,

    /// OCR service endpoint (overrides the config file).
    #[arg(long = "ocr-endpoint", value_name = "URL", global = true)]
    pub ocr_endpoint: Option<String>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config: self.config.clone(),
            schema: self.schema.clone(),
            ocr_endpoint: self.ocr_endpoint.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full intake pipeline on one file.
    Ingest(IngestArgs),

    /// Run only the intake gate and relevance screen on one file.
    Check(CheckArgs),

    /// List the canonical schema fields.
    Schema,
}

#[derive(Parser)]
pub struct IngestArgs {
    /// Case file to ingest.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Print the tagged JSON output instead of a table.
    #[arg(long = "json")]
    pub json: bool,

    /// Write the tagged JSON output to a file.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// File to check.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
