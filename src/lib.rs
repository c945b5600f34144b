/*!
 * # mdtranslate
 *
 * A Rust library for translating Markdown/Quarto document chapters while
 * preserving their structure.
 *
 * ## Features
 *
 * - Extract protected syntactic regions (YAML front matter, callout blocks,
 *   fenced code, inline code, links/images, footnote references) into
 *   positional placeholders before translation
 * - Translate prose line by line with inline-emphasis awareness
 * - Restore fragments in strict reverse order of extraction, translating
 *   link/image labels but never URLs or code
 * - Pluggable translation backends (Google Translate web endpoint,
 *   LibreTranslate) behind a common trait
 * - Failure containment: a failing backend degrades to untranslated text,
 *   never a failed run
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `document_processor`: Fragment extraction and restoration
 * - `translation`: Line translation and pipeline glue:
 *   - `translation::adapter`: failure containment and pacing
 *   - `translation::line`: line classification and emphasis handling
 *   - `translation::pipeline`: extract/translate/restore composition
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `providers`: Client implementations for translation backends:
 *   - `providers::google`: unofficial Google Translate endpoint
 *   - `providers::libretranslate`: LibreTranslate API client
 *   - `providers::mock`: mock backends for testing
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod document_processor;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use document_processor::{FragmentKind, FragmentTables, extract_fragments, restore_fragments};
pub use errors::{AppError, ProviderError, TranslationError};
pub use language_utils::{get_language_name, validate_language_code};
pub use translation::{TranslationAdapter, translate_document};
