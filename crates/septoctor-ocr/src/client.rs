//! OCR client trait and HTTP implementation.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::OcrConfig;
use crate::error::{OcrError, Result};

/// Extracts plain text from document bytes.
///
/// Implementations must not retry: the pipeline surfaces any failure to the
/// operator as a distinct OCR error.
pub trait OcrClient: Send + Sync {
    fn extract_text(&self, document: &[u8]) -> Result<String>;
}

#[derive(Serialize)]
struct OcrRequest {
    #[serde(rename = "imageBase64")]
    image_base64: String,
}

#[derive(Deserialize)]
struct OcrResponse {
    #[serde(default)]
    text: Option<String>,
}

/// Client for an HTTP text-extraction service.
///
/// Sends `POST <endpoint>` with `{"imageBase64": "..."}` and reads the
/// `text` member of the JSON reply.
pub struct HttpOcrClient {
    client: Client,
    endpoint: Url,
}

impl HttpOcrClient {
    pub fn new(config: &OcrConfig) -> Result<Self> {
        let endpoint =
            Url::parse(&config.endpoint).map_err(|e| OcrError::InvalidEndpoint {
                endpoint: config.endpoint.clone(),
                message: e.to_string(),
            })?;
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl OcrClient for HttpOcrClient {
    fn extract_text(&self, document: &[u8]) -> Result<String> {
        debug!(endpoint = %self.endpoint, bytes = document.len(), "sending document to OCR");

        let request = OcrRequest {
            image_base64: STANDARD.encode(document),
        };
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(
                USER_AGENT,
                concat!("septoctor/", env!("CARGO_PKG_VERSION")),
            )
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(status = status.as_u16(), "OCR service rejected the document");
            return Err(OcrError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let body: OcrResponse = response.json()?;
        let text = body.text.unwrap_or_default();
        info!(chars = text.chars().count(), "OCR text extracted");
        Ok(text)
    }
}
