/*!
 * Provider implementations for different translation backends.
 *
 * This module contains client implementations for the supported machine
 * translation services:
 * - Google Translate: unofficial web endpoint (no API key)
 * - LibreTranslate: self-hostable open-source service
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all translation backends
///
/// This trait defines the interface that all provider implementations must
/// follow, allowing them to be used interchangeably behind the translation
/// adapter.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Short identifier for diagnostics
    fn name(&self) -> &'static str;

    /// Translate a text fragment into the target language
    ///
    /// # Arguments
    /// * `text` - The text to translate
    /// * `target_language` - ISO language code to translate into
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn translate(&self, text: &str, target_language: &str)
        -> Result<String, ProviderError>;

    /// Test the connection to the backend
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the backend is reachable
    async fn test_connection(&self) -> Result<(), ProviderError>;
}

pub mod google;
pub mod libretranslate;
pub mod mock;
