/*!
 * Tests for fragment extraction and restoration
 */

use mdtranslate::document_processor::{
    FragmentKind, LinkVariant, extract_fragments, restore_fragments,
};
use crate::common;

/// Test that a YAML front matter block at the start of the document is extracted
#[test]
fn test_extractFragments_withLeadingYaml_shouldExtractBlock() {
    let doc = "---\ntitle: \"Test\"\nauthor: Someone\n---\n\nBody text here.";
    let (placeheld, tables) = extract_fragments(doc);

    assert_eq!(tables.yaml.len(), 1);
    assert_eq!(tables.yaml[0], "---\ntitle: \"Test\"\nauthor: Someone\n---");
    assert!(placeheld.starts_with("<<YAML_0>>"));
    assert!(placeheld.contains("Body text here."));
}

/// Test that dashes in the middle of a document are not treated as front matter
#[test]
fn test_extractFragments_withMidDocumentDashes_shouldNotExtractYaml() {
    let doc = "Body first.\n\n---\nnot: yaml\n---\n";
    let (placeheld, tables) = extract_fragments(doc);

    assert!(tables.yaml.is_empty());
    assert_eq!(placeheld, doc);
}

/// Test that fenced code blocks are extracted whole
#[test]
fn test_extractFragments_withFencedCode_shouldExtractWholeBlock() {
    let doc = "Before.\n\n```python\nx = 1\ny = 2\n```\n\nAfter.";
    let (placeheld, tables) = extract_fragments(doc);

    assert_eq!(tables.code_blocks.len(), 1);
    assert_eq!(tables.code_blocks[0], "```python\nx = 1\ny = 2\n```");
    assert!(placeheld.contains("<<CODEBLOCK_0>>"));
    assert!(!placeheld.contains("x = 1"));
}

/// Test that callout blocks are extracted whole, including nested code fences
#[test]
fn test_extractFragments_withCalloutContainingCode_shouldExtractWholeCallout() {
    let callout = "::: {.callout-note}\nSome *note* text.\n\n```r\nf()\n```\n:::";
    let doc = format!("Intro.\n\n{}\n\nOutro.", callout);
    let (placeheld, tables) = extract_fragments(&doc);

    assert_eq!(tables.callouts.len(), 1);
    assert_eq!(tables.callouts[0], callout);
    // The nested fence belongs to the callout, not the code block table
    assert!(tables.code_blocks.is_empty());
    assert!(placeheld.contains("<<CALLOUT_0>>"));
}

/// Test that a callout without a closing marker degrades to prose, not an error
#[test]
fn test_extractFragments_withUnterminatedCallout_shouldLeaveTextInPlace() {
    let doc = "::: {.callout-note}\nNo closing marker here.\n";
    let (placeheld, tables) = extract_fragments(doc);

    assert!(tables.callouts.is_empty());
    assert!(placeheld.contains("No closing marker here."));
}

/// Test that images are matched before plain links and stored structurally
#[test]
fn test_extractFragments_withImageAndLink_shouldMatchImageFirst() {
    let doc = "![An image](/img.png) and [a link](/page.html)";
    let (placeheld, tables) = extract_fragments(doc);

    assert_eq!(tables.links.len(), 2);
    assert_eq!(tables.links[0].variant, LinkVariant::Image);
    assert_eq!(tables.links[0].label, "An image");
    assert_eq!(tables.links[0].url, "/img.png");
    assert_eq!(tables.links[1].variant, LinkVariant::Link);
    assert_eq!(tables.links[1].label, "a link");
    assert_eq!(tables.links[1].url, "/page.html");
    assert_eq!(placeheld, "<<MDLINK_0>> and <<MDLINK_1>>");
}

/// Test that inline code spans are extracted with their backticks
#[test]
fn test_extractFragments_withInlineCode_shouldExtractSpan() {
    let doc = "Call `f(x)` to start.";
    let (placeheld, tables) = extract_fragments(doc);

    assert_eq!(tables.inline_code, vec!["`f(x)`"]);
    assert_eq!(placeheld, "Call <<INLINECODE_0>> to start.");
}

/// Test the footnote discrimination contract: references are extracted while
/// definition markers stay inline
#[test]
fn test_extractFragments_withReferenceAndDefinition_shouldOnlyExtractReference() {
    let doc = "See note[^a] and[^a]: this is the note.";
    let (placeheld, tables) = extract_fragments(doc);

    assert_eq!(tables.footnote_refs, vec!["[^a]"]);
    assert_eq!(placeheld, "See note<<FOOTNOTE_REF_0>> and[^a]: this is the note.");
}

/// Test that a document with no protected regions yields empty tables
#[test]
fn test_extractFragments_withPlainProse_shouldYieldEmptyTables() {
    let doc = "Just some plain text.\nOn two lines.";
    let (placeheld, tables) = extract_fragments(doc);

    assert!(tables.is_empty());
    assert_eq!(tables.len(), 0);
    assert_eq!(placeheld, doc);
}

/// Test that placeholder tokens embed the kind and index
#[test]
fn test_placeholder_withKindAndIndex_shouldFormatToken() {
    assert_eq!(FragmentKind::Yaml.placeholder(0), "<<YAML_0>>");
    assert_eq!(FragmentKind::CodeBlock.placeholder(3), "<<CODEBLOCK_3>>");
    assert_eq!(FragmentKind::FootnoteRef.placeholder(12), "<<FOOTNOTE_REF_12>>");
}

/// Test that extraction followed by restoration with an identity backend
/// reproduces the original document exactly
#[tokio::test]
async fn test_extractRestore_withIdentityBackend_shouldRoundTripExactly() {
    let doc = common::sample_chapter();
    let adapter = common::identity_adapter();

    let (placeheld, tables) = extract_fragments(doc);
    let restored = restore_fragments(&placeheld, &tables, &adapter).await;

    assert_eq!(restored, doc);
}

/// Test that restoration translates link labels but never URLs
#[tokio::test]
async fn test_restoreFragments_withUppercaseBackend_shouldTranslateOnlyLabels() {
    let doc = "Go to [Click here](/path/to/page) now.";
    let adapter = common::uppercase_adapter();

    let (placeheld, tables) = extract_fragments(doc);
    let restored = restore_fragments(&placeheld, &tables, &adapter).await;

    assert_eq!(restored, "Go to [CLICK HERE](/path/to/page) now.");
}

/// Test that restoration tolerates whitespace injected inside token markers
/// and matches case-insensitively
#[tokio::test]
async fn test_restoreFragments_withMangledPlaceholder_shouldStillRestore() {
    let doc = "Keep `secret()` safe.";
    let adapter = common::identity_adapter();

    let (placeheld, tables) = extract_fragments(doc);
    assert_eq!(placeheld, "Keep <<INLINECODE_0>> safe.");

    // Simulate a backend that padded and lowercased the opaque token
    let mangled = placeheld.replace("<<INLINECODE_0>>", "<< inlinecode_0 >>");
    let restored = restore_fragments(&mangled, &tables, &adapter).await;

    assert_eq!(restored, doc);
}

/// Test that a placeholder with an unknown index is left untouched
#[tokio::test]
async fn test_restoreFragments_withUnknownIndex_shouldLeaveTokenAlone() {
    let doc = "Only `one`.";
    let adapter = common::identity_adapter();

    let (_, tables) = extract_fragments(doc);
    let restored = restore_fragments("Text <<INLINECODE_7>> here.", &tables, &adapter).await;

    assert_eq!(restored, "Text <<INLINECODE_7>> here.");
}

/// Test that byte content inside protected regions survives a hostile backend
#[tokio::test]
async fn test_extractRestore_withUppercaseBackend_shouldPreserveProtectedBytes() {
    let doc = common::sample_chapter();
    let adapter = common::uppercase_adapter();

    let (placeheld, tables) = extract_fragments(doc);
    let restored = restore_fragments(&placeheld, &tables, &adapter).await;

    // Fenced code, callout content, inline code and URLs are byte-identical
    assert!(restored.contains("flip <- function() sample(c(\"H\", \"T\"), 1)"));
    assert!(restored.contains("::: {.callout-note}"));
    assert!(restored.contains("The code above is *not* translated."));
    assert!(restored.contains("`flip()`"));
    assert!(restored.contains("(/images/coin.png)"));
    assert!(restored.contains("(/appendix.html)"));
    assert!(restored.contains("title: \"Random experiments\""));
}
