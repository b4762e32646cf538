//! Filename relevance screen for documents headed to OCR.
//!
//! The blocklist is checked first. A name that matches neither list is
//! accepted, so the allowlist only ever confirms an acceptance.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use septoctor_model::{IntakeDecision, IntakeError};

pub const DEFAULT_ALLOW_KEYWORDS: &[&str] = &[
    "case", "patient", "medical", "report", "sepsis", "neonatal", "sheet", "lab", "scan",
];

pub const DEFAULT_BLOCK_KEYWORDS: &[&str] =
    &["holiday", "vacation", "selfie", "wallpaper", "music", "song"];

/// Outcome of screening one filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelevanceVerdict {
    Blocked { keyword: String },
    Allowed { keyword: String },
    /// No keyword matched either list.
    Unmatched,
}

impl RelevanceVerdict {
    pub fn is_relevant(&self) -> bool {
        !matches!(self, RelevanceVerdict::Blocked { .. })
    }
}

/// Keyword lists used by the relevance screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelevanceKeywords {
    pub allow: Vec<String>,
    pub block: Vec<String>,
}

impl Default for RelevanceKeywords {
    fn default() -> Self {
        Self {
            allow: DEFAULT_ALLOW_KEYWORDS.iter().map(ToString::to_string).collect(),
            block: DEFAULT_BLOCK_KEYWORDS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl RelevanceKeywords {
    /// Screens a filename by case-insensitive substring match.
    pub fn assess(&self, filename: &str) -> RelevanceVerdict {
        let name = filename.to_lowercase();
        if let Some(keyword) = find_keyword(&name, &self.block) {
            return RelevanceVerdict::Blocked { keyword };
        }
        match find_keyword(&name, &self.allow) {
            Some(keyword) => RelevanceVerdict::Allowed { keyword },
            None => RelevanceVerdict::Unmatched,
        }
    }

    /// Screens a filename, failing with [`IntakeError::IrrelevantDocument`] on a blocklist hit.
    pub fn check(&self, filename: &str) -> Result<RelevanceVerdict, IntakeError> {
        match self.assess(filename) {
            RelevanceVerdict::Blocked { keyword } => {
                info!(filename, keyword = %keyword, "document rejected by relevance screen");
                Err(IntakeError::IrrelevantDocument {
                    filename: filename.to_string(),
                    keyword,
                })
            }
            verdict => {
                debug!(filename, verdict = ?verdict, "document passed relevance screen");
                Ok(verdict)
            }
        }
    }

    /// Same as [`check`](Self::check), folded into an [`IntakeDecision`].
    pub fn decide(&self, filename: &str) -> IntakeDecision {
        match self.check(filename) {
            Ok(RelevanceVerdict::Allowed { keyword }) => {
                IntakeDecision::accept(None, format!("filename mentions '{keyword}'"))
            }
            Ok(_) => IntakeDecision::accept(None, "no keyword matched, accepted by default"),
            Err(error) => IntakeDecision::from_error(&error),
        }
    }
}

fn find_keyword(name: &str, keywords: &[String]) -> Option<String> {
    keywords
        .iter()
        .map(|keyword| keyword.trim().to_lowercase())
        .find(|keyword| !keyword.is_empty() && name.contains(keyword.as_str()))
}
