use log::warn;
use std::time::Duration;

use crate::providers::Provider;

// @module: Failure containment and pacing around the translation backend

/// Wrapper around an opaque translation backend.
///
/// Translation failure is never fatal to the pipeline: on any backend error
/// the adapter logs a diagnostic and hands back the original text. A fixed
/// pacing delay is applied after each successful call; there is no retry or
/// backoff beyond that.
#[derive(Debug)]
pub struct TranslationAdapter {
    // @field: Backend implementation
    provider: Box<dyn Provider>,

    // @field: Target language code passed to the backend
    target_language: String,

    // @field: Fixed delay after each successful call
    pacing_delay: Duration,
}

impl TranslationAdapter {
    /// Create an adapter around the given backend
    pub fn new(
        provider: Box<dyn Provider>,
        target_language: impl Into<String>,
        pacing_delay: Duration,
    ) -> Self {
        TranslationAdapter {
            provider,
            target_language: target_language.into(),
            pacing_delay,
        }
    }

    /// Target language this adapter translates into
    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    /// Translate a text fragment, returning the original text when the input
    /// is blank, when the backend fails, or when it answers with nothing
    pub async fn translate(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }

        match self.provider.translate(text, &self.target_language).await {
            Ok(translated) => {
                if !self.pacing_delay.is_zero() {
                    tokio::time::sleep(self.pacing_delay).await;
                }
                if translated.trim().is_empty() {
                    text.to_string()
                } else {
                    translated
                }
            }
            Err(e) => {
                warn!(
                    "Translation via {} failed, keeping original text: {}",
                    self.provider.name(),
                    e
                );
                text.to_string()
            }
        }
    }
}
