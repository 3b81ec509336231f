use anyhow::{Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use crate::providers::Translator;

/// Client for Google's public translate endpoint (`translate_a/single`).
///
/// Performs exactly one request per `translate` call; retry, rate limiting
/// and backoff all live in the pipeline. The per-request timeout makes a
/// hung call surface as a retryable failure instead of stalling a worker
/// forever.
#[derive(Debug)]
pub struct GoogleTranslate {
    /// Base URL of the service
    base_url: String,
    /// HTTP client for making requests
    client: Client,
}

impl GoogleTranslate {
    /// Create a new client against the given endpoint
    pub fn new(endpoint: &str, timeout_secs: u64) -> Result<Self> {
        let base_url = normalize_endpoint(endpoint)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self { base_url, client })
    }

    /// Pull the translated text out of the endpoint's nested-array payload.
    ///
    /// The payload is `[[["<seg>", "<src>", ...], ...], ...]`; the first
    /// element of each segment is a piece of the translation.
    fn extract_translation(payload: &serde_json::Value) -> Result<String, ProviderError> {
        let segments = payload
            .get(0)
            .and_then(|v| v.as_array())
            .ok_or_else(|| {
                ProviderError::ParseError("response is missing the segment array".to_string())
            })?;

        let mut translated = String::new();
        for segment in segments {
            if let Some(piece) = segment.get(0).and_then(|v| v.as_str()) {
                translated.push_str(piece);
            }
        }

        if translated.is_empty() && !segments.is_empty() {
            return Err(ProviderError::ParseError(
                "response segments carried no text".to_string(),
            ));
        }

        Ok(translated)
    }
}

/// Validate an endpoint string and strip any trailing slash
fn normalize_endpoint(endpoint: &str) -> Result<String> {
    if endpoint.trim().is_empty() {
        return Err(anyhow!("Endpoint cannot be empty"));
    }

    let with_scheme = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_string()
    } else {
        format!("https://{}", endpoint)
    };

    let url = Url::parse(&with_scheme)
        .map_err(|e| anyhow!("Invalid endpoint {}: {}", endpoint, e))?;
    url.host_str()
        .ok_or_else(|| anyhow!("Invalid host in endpoint: {}", endpoint))?;

    Ok(with_scheme.trim_end_matches('/').to_string())
}

#[async_trait]
impl Translator for GoogleTranslate {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        // Translating nothing is a valid no-op
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        let url = format!("{}/translate_a/single", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", source_language),
                ("tl", target_language),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(e.to_string())
                } else if e.is_connect() {
                    ProviderError::ConnectionError(e.to_string())
                } else {
                    ProviderError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(ProviderError::RateLimitExceeded(format!(
                "service throttled the request ({})",
                status
            )));
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: truncate(&body, 200),
            });
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Self::extract_translation(&payload)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.translate("hello", "en", "es").await.map(|_| ())
    }
}

/// Clip a body to a printable length for error messages
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        text.chars().take(max_chars).collect()
    } else {
        text.to_string()
    }
}
