//! Gemini vision API client.

use std::io::Cursor;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::ImageFormat;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ClientError;
use crate::models::config::ClientConfig;

use super::{ExtractionClient, FlyerImage, ANALYSIS_PROMPT};

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text { text: &'a str },
    Image { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: &'static str,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

/// Client for the `generateContent` endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    timeout_secs: u64,
}

impl GeminiClient {
    /// Create a client with an explicit API key.
    pub fn new(config: &ClientConfig, api_key: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: api_key.into(),
            timeout_secs: config.timeout_secs,
        })
    }

    /// Create a client reading the API key from the configured environment variable.
    pub fn from_env(config: &ClientConfig) -> Result<Self, ClientError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ClientError::MissingApiKey(config.api_key_env.clone()))?;
        Self::new(config, api_key)
    }

    fn request_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        )
    }
}

impl ExtractionClient for GeminiClient {
    async fn analyze(&self, image: &FlyerImage) -> Result<String, ClientError> {
        let data = encode_png_base64(&image.bytes)?;
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text { text: ANALYSIS_PROMPT },
                    Part::Image {
                        inline_data: InlineData {
                            mime_type: "image/png",
                            data,
                        },
                    },
                ],
            }],
        };

        info!("Sending {} to {} for analysis", image.name, self.model);

        let response = self
            .http
            .post(self.request_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        debug!("Received {} bytes with status {} for {}", text.len(), status, image.name);

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        analysis_text(&text)
    }
}

impl GeminiClient {
    fn map_transport_error(&self, error: reqwest::Error) -> ClientError {
        if error.is_timeout() {
            ClientError::Timeout(self.timeout_secs)
        } else {
            ClientError::Transport(error.without_url().to_string())
        }
    }
}

/// Decode any supported raster format and re-encode it as base64 PNG.
fn encode_png_base64(bytes: &[u8]) -> Result<String, ClientError> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| ClientError::InvalidImage(e.to_string()))?;

    let mut png = Cursor::new(Vec::new());
    image
        .write_to(&mut png, ImageFormat::Png)
        .map_err(|e| ClientError::InvalidImage(e.to_string()))?;

    Ok(STANDARD.encode(png.into_inner()))
}

/// Pull the first candidate's text out of a success body.
fn analysis_text(body: &str) -> Result<String, ClientError> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| ClientError::Malformed(e.to_string()))?;

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(ClientError::EmptyResponse)?;

    let text = candidate
        .content
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .ok_or_else(|| ClientError::Malformed("candidate has no text part".to_string()))?;

    if text.trim().is_empty() {
        return Err(ClientError::EmptyResponse);
    }

    Ok(text)
}

/// Upstream error message from a failure body, if it has one.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .and_then(|e| e.message)
        .unwrap_or_else(|| "Request failed".to_string())
}
