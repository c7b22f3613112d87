use super::{CompressionClient, CompressionResult};
use crate::domain::assets::OptimizerConfig;
use crate::domain::error::{AppError, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const COMPRESSION_COUNT_HEADER: &str = "Compression-Count";

#[derive(Deserialize)]
struct ShrinkResponse {
    output: ShrinkOutput,
}

#[derive(Deserialize)]
struct ShrinkOutput {
    url: String,
    size: u64,
}

#[derive(Deserialize)]
struct ProviderErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Unprocessed upload response, used for debugging the provider
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub struct TinifyClient {
    client: reqwest::Client,
    endpoint: String,
    auth_header: String,
    timeout: Duration,
}

impl TinifyClient {
    pub fn new(config: &OptimizerConfig, api_key: &str) -> Result<Self> {
        Self::with_timeout(config, api_key, config.request_timeout())
    }

    pub fn with_timeout(config: &OptimizerConfig, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            auth_header: basic_auth_header(&config.api_user, api_key),
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Upload and return the response untouched
    pub async fn shrink_raw(&self, image: Vec<u8>) -> Result<RawResponse> {
        let response = self.post_image(image).await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| {
                (
                    k.as_str().to_string(),
                    v.to_str().unwrap_or("<binary>").to_string(),
                )
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?
            .to_vec();

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }

    async fn post_image(&self, image: Vec<u8>) -> Result<reqwest::Response> {
        debug!(endpoint = %self.endpoint, bytes = image.len(), "Uploading image");
        self.client
            .post(&self.endpoint)
            .header(AUTHORIZATION, &self.auth_header)
            .body(image)
            .send()
            .await
            .map_err(|e| self.transport_error(e))
    }

    fn transport_error(&self, err: reqwest::Error) -> AppError {
        if err.is_timeout() {
            AppError::TransportError(format!("Request timed out after {:?}", self.timeout))
        } else {
            AppError::TransportError(format!("Request failed: {}", err))
        }
    }
}

#[async_trait]
impl CompressionClient for TinifyClient {
    async fn shrink(&self, image: Vec<u8>) -> Result<CompressionResult> {
        let response = self.post_image(image).await?;
        let status = response.status();
        let compression_count = response
            .headers()
            .get(COMPRESSION_COUNT_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        if status != StatusCode::CREATED {
            return Err(provider_error(status.as_u16(), &body));
        }

        let mut result = parse_shrink_body(&body)?;
        result.compression_count = compression_count;
        Ok(result)
    }

    async fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        debug!(location, "Downloading compressed image");
        let response = self
            .client
            .get(location)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        if status != StatusCode::OK {
            return Err(provider_error(status.as_u16(), &body));
        }
        Ok(body.to_vec())
    }
}

/// `Basic base64(user:key)`
pub fn basic_auth_header(user: &str, api_key: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", user, api_key)))
}

pub fn parse_shrink_body(body: &[u8]) -> Result<CompressionResult> {
    let parsed: ShrinkResponse = serde_json::from_slice(body)
        .map_err(|e| AppError::ParseError(format!("Unexpected shrink response: {}", e)))?;

    Ok(CompressionResult {
        location: parsed.output.url,
        size: parsed.output.size,
        compression_count: None,
    })
}

/// Build a provider error, preferring the JSON `message` over the raw body text
pub fn provider_error(status: u16, body: &[u8]) -> AppError {
    let message = match serde_json::from_slice::<ProviderErrorBody>(body) {
        Ok(ProviderErrorBody {
            error: Some(error),
            message: Some(message),
        }) => format!("{}: {}", error, message),
        Ok(ProviderErrorBody {
            message: Some(message),
            ..
        }) => message,
        Ok(ProviderErrorBody {
            error: Some(error), ..
        }) => error,
        _ => String::from_utf8_lossy(body).trim().to_string(),
    };
    AppError::ProviderError { status, message }
}
