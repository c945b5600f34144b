/*!
 * Tests for line classification, emphasis handling and the adapter
 */

use mdtranslate::providers::mock::MockProvider;
use mdtranslate::translation::{
    LineKind, classify_line, normalize_emphasis_spacing, translate_lines,
};
use crate::common;

/// Test that blank lines and lone placeholder lines are skipped
#[test]
fn test_classifyLine_withBlankOrPlaceholderLine_shouldSkip() {
    assert_eq!(classify_line(""), LineKind::Skip);
    assert_eq!(classify_line("   "), LineKind::Skip);
    assert_eq!(classify_line("<<CODEBLOCK_3>>"), LineKind::Skip);
    assert_eq!(classify_line("  <<YAML_0>>  "), LineKind::Skip);
}

/// Test that footnote definitions are recognized in both raw and
/// placeholder-marker form
#[test]
fn test_classifyLine_withFootnoteDefinition_shouldClassifyAsDefinition() {
    assert_eq!(classify_line("[^a]: note text"), LineKind::FootnoteDefinition);
    assert_eq!(
        classify_line("<<FOOTNOTE_REF_2>>: note text"),
        LineKind::FootnoteDefinition
    );
}

/// Test that ordinary lines, including ones with embedded placeholders,
/// are prose
#[test]
fn test_classifyLine_withProse_shouldClassifyAsProse() {
    assert_eq!(classify_line("Hello world"), LineKind::Prose);
    assert_eq!(classify_line("Use <<INLINECODE_0>> here"), LineKind::Prose);
}

/// Test that a definition marker appearing mid-line does not make the line a
/// footnote definition; only line-leading markers are protected
#[test]
fn test_classifyLine_withMidLineDefinitionMarker_shouldClassifyAsProse() {
    assert_eq!(
        classify_line("See note[^a] and[^a]: this is the note."),
        LineKind::Prose
    );
}

/// Test that skip lines pass through while prose lines are translated
#[tokio::test]
async fn test_translateLines_withMixedLines_shouldOnlyTranslateProse() {
    let adapter = common::uppercase_adapter();
    let text = "Hello world\n\n<<CODEBLOCK_0>>\nGoodbye";

    let result = translate_lines(text, &adapter).await;

    assert_eq!(result, "HELLO WORLD\n\n<<CODEBLOCK_0>>\nGOODBYE");
}

/// Test that a bold span containing an italic span reaches the backend as a
/// single call, asterisks included, and that the inner italic is never
/// translated on its own
#[tokio::test]
async fn test_translateLines_withItalicInsideBold_shouldTranslateBoldOnce() {
    let provider = MockProvider::uppercase();
    let adapter = common::adapter_for(provider.clone());

    let result = translate_lines("**bold *and italic* text**", &adapter).await;

    assert_eq!(result, "**BOLD *AND ITALIC* TEXT**");
    let calls = provider.calls();
    assert_eq!(
        calls,
        vec!["bold *and italic* text", "**BOLD *AND ITALIC* TEXT**"]
    );
    assert!(!calls.iter().any(|c| c == "and italic"));
}

/// Test that an italic span outside any bold span is translated on its own
#[tokio::test]
async fn test_translateLines_withStandaloneItalic_shouldTranslateSpan() {
    let provider = MockProvider::uppercase();
    let adapter = common::adapter_for(provider.clone());

    let result = translate_lines("This is *fine* today", &adapter).await;

    assert_eq!(result, "THIS IS *FINE* TODAY");
    assert_eq!(provider.calls(), vec!["fine", "This is *FINE* today"]);
}

/// Test that footnote definition markers stay untouched while the body is
/// translated, with exactly one space between marker and body
#[tokio::test]
async fn test_translateLines_withFootnoteDefinition_shouldTranslateBodyOnly() {
    let provider = MockProvider::uppercase();
    let adapter = common::adapter_for(provider.clone());

    let result = translate_lines("[^note-1]:   **Key** point", &adapter).await;

    assert_eq!(result, "[^note-1]: **KEY** POINT");
    assert_eq!(provider.calls(), vec!["Key", "**KEY** point"]);
}

/// Test that padding inside emphasis delimiters is removed
#[test]
fn test_normalizeEmphasisSpacing_withPaddedDelimiters_shouldTrimInnerText() {
    assert_eq!(normalize_emphasis_spacing("** padded **"), "**padded**");
    assert_eq!(normalize_emphasis_spacing("* loose *"), "*loose*");
    assert_eq!(
        normalize_emphasis_spacing("**bold** and * x *"),
        "**bold** and *x*"
    );
}

/// Test that an emphasis pair with nothing but whitespace inside is left alone
#[test]
fn test_normalizeEmphasisSpacing_withEmptyItalicPair_shouldLeaveTextAlone() {
    assert_eq!(normalize_emphasis_spacing("a * * b"), "a * * b");
}

/// Test that blank input short-circuits without a backend call
#[tokio::test]
async fn test_adapter_withBlankInput_shouldSkipBackend() {
    let provider = MockProvider::identity();
    let adapter = common::adapter_for(provider.clone());

    let result = adapter.translate("   ").await;

    assert_eq!(result, "   ");
    assert_eq!(provider.call_count(), 0);
}

/// Test that a backend failure degrades to the original text
#[tokio::test]
async fn test_adapter_withFailingBackend_shouldReturnOriginalText() {
    let provider = MockProvider::failing();
    let adapter = common::adapter_for(provider.clone());

    let result = adapter.translate("hello world").await;

    assert_eq!(result, "hello world");
    assert_eq!(provider.call_count(), 1);
}

/// Test that an empty backend response degrades to the original text
#[tokio::test]
async fn test_adapter_withEmptyResponse_shouldReturnOriginalText() {
    let adapter = common::adapter_for(MockProvider::empty());

    let result = adapter.translate("hello world").await;

    assert_eq!(result, "hello world");
}

/// Test that the adapter reports its target language
#[test]
fn test_adapter_withTargetLanguage_shouldExposeIt() {
    let adapter = common::identity_adapter();
    assert_eq!(adapter.target_language(), "es");
}
