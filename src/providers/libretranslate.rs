use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Client for a LibreTranslate server
#[derive(Debug)]
pub struct LibreTranslate {
    /// Base URL of the server
    endpoint: String,
    /// Optional API key (required by the public instance)
    api_key: Option<String>,
    /// HTTP client for making requests
    client: Client,
}

/// Translate request for the LibreTranslate API
#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    /// Text to translate
    q: &'a str,
    /// Source language, auto-detected
    source: &'a str,
    /// Target language code
    target: &'a str,
    /// Plain text, not HTML
    format: &'a str,
    /// API key if the server requires one
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

/// Translate response from the LibreTranslate API
#[derive(Debug, Deserialize)]
struct TranslateResponse {
    /// Translated text
    #[serde(rename = "translatedText")]
    translated_text: String,
}

impl LibreTranslate {
    /// Create a client for the given server
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>, timeout_secs: u64) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key,
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
        }
    }
}

#[async_trait]
impl Provider for LibreTranslate {
    fn name(&self) -> &'static str {
        "libretranslate"
    }

    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let url = format!("{}/translate", self.endpoint);

        let request = TranslateRequest {
            q: text,
            source: "auto",
            target: target_language,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

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

        let parsed: TranslateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Ok(parsed.translated_text)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let url = format!("{}/languages", self.endpoint);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: "languages endpoint unavailable".to_string(),
            });
        }
        Ok(())
    }
}
