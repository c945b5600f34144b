use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// The configuration accepts ISO 639-1 (2-letter) and ISO 639-3 (3-letter)
/// language codes; the target language also ends up in output file names
/// (`<stem>.<lang>.<ext>`), so codes are normalized to lowercase here.

/// Look up a language from a 2- or 3-letter ISO code
fn lookup(code: &str) -> Option<Language> {
    let normalized = code.trim().to_lowercase();
    match normalized.len() {
        2 => Language::from_639_1(&normalized),
        3 => Language::from_639_3(&normalized),
        _ => None,
    }
}

/// Validate that a language code is a known ISO 639 code
pub fn validate_language_code(code: &str) -> Result<()> {
    lookup(code)
        .map(|_| ())
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Get the English language name for a code, for display purposes
pub fn get_language_name(code: &str) -> Result<String> {
    lookup(code)
        .map(|lang| lang.to_name().to_string())
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Normalize a language code to lowercase trimmed form, validating it first
pub fn normalize_language_code(code: &str) -> Result<String> {
    validate_language_code(code)?;
    Ok(code.trim().to_lowercase())
}
