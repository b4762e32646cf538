//! Error types for the OCR collaborator.

use septoctor_model::IntakeError;
use thiserror::Error;

/// Errors returned by an [`OcrClient`](crate::OcrClient).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OcrError {
    /// Transport-level failure (connection refused, TLS, malformed body).
    #[error("network error: {0}")]
    Network(String),

    /// The request exceeded the configured timeout.
    #[error("OCR request timed out")]
    Timeout,

    /// The service answered with a non-success status.
    #[error("OCR service returned HTTP {status}: {message}")]
    Service { status: u16, message: String },

    /// The endpoint in the configuration is unusable.
    #[error("invalid OCR endpoint '{endpoint}': {message}")]
    InvalidEndpoint { endpoint: String, message: String },

    /// No OCR collaborator is configured.
    #[error("no OCR service configured")]
    NotConfigured,
}

impl OcrError {
    /// Returns a user-friendly error message suitable for display.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Network(_) | Self::Timeout => {
                "Could not reach the OCR service. Please check your connection."
            }
            Self::Service { .. } => "OCR failed. Please try again or use manual entry.",
            Self::InvalidEndpoint { .. } | Self::NotConfigured => {
                "OCR is not configured. Please use manual entry or a structured file."
            }
        }
    }
}

impl From<reqwest::Error> for OcrError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(error.to_string())
        }
    }
}

impl From<OcrError> for IntakeError {
    fn from(error: OcrError) -> Self {
        IntakeError::OcrFailure {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, OcrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converts_to_intake_failure() {
        let intake: IntakeError = OcrError::Service {
            status: 503,
            message: "busy".to_string(),
        }
        .into();
        assert_eq!(
            intake,
            IntakeError::OcrFailure {
                message: "OCR service returned HTTP 503: busy".to_string()
            }
        );
        assert_eq!(
            intake.user_message(),
            "OCR failed. Please try again or use manual entry."
        );
    }
}
