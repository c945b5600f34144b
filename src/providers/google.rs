use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Client for the unofficial Google Translate web endpoint.
///
/// Uses the `translate_a/single` endpoint with `client=gtx`, the same one the
/// translate widget talks to. No API key is required, which is why the pacing
/// delay in the adapter matters: the endpoint rate-limits aggressively.
#[derive(Debug)]
pub struct GoogleTranslate {
    /// Base URL of the service
    endpoint: String,
    /// HTTP client for making requests
    client: Client,
}

impl GoogleTranslate {
    /// Create a client against the public endpoint
    pub fn new(timeout_secs: u64) -> Self {
        Self::from_endpoint("https://translate.googleapis.com", timeout_secs)
    }

    /// Create a client against a specific endpoint
    pub fn from_endpoint(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
        }
    }
}

#[async_trait]
impl Provider for GoogleTranslate {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let url = format!("{}/translate_a/single", self.endpoint);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target_language),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "no response body".to_string());
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        // Response shape: [[["Hola", "Hello", ...], ...], ...] where the
        // outer array's first element lists translated segments; concatenate
        // the first string of each segment.
        let segments = value
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| ProviderError::ParseError("missing translation segments".to_string()))?;

        let mut translated = String::new();
        for segment in segments {
            if let Some(part) = segment.get(0).and_then(Value::as_str) {
                translated.push_str(part);
            }
        }

        Ok(translated)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.translate("hello", "es").await.map(|_| ())
    }
}
