use crate::document_processor;
use crate::translation::adapter::TranslationAdapter;
use crate::translation::line;

// @module: Document pipeline glue
//
// Data flows strictly forward: extraction, line translation, restoration.

/// Translate a whole document while preserving its structural elements.
///
/// Infallible by construction: the worst outcome of any backend failure is an
/// under-translated document, never an error.
pub async fn translate_document(content: &str, adapter: &TranslationAdapter) -> String {
    let (placeheld, tables) = document_processor::extract_fragments(content);
    let translated = line::translate_lines(&placeheld, adapter).await;
    document_processor::restore_fragments(&translated, &tables, adapter).await
}
