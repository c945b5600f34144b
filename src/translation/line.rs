use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::translation::adapter::TranslationAdapter;

// @module: Line classification and inline-emphasis-aware translation
//
// Operates on placeholder-substituted text; the extractor's placeholder
// tokens pass through untouched. Bold spans are translated before italic
// spans so that `**bold with *italic* inside**` goes to the backend as a
// single bold call; the italic pass only runs on the text between bold spans.

// @const: Bold span, non-greedy up to the first closing `**`; the inner text
// may contain single asterisks (nested italic)
static BOLD_SPAN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());

// @const: Padding immediately inside bold delimiters
static BOLD_PADDING_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*\s*(.+?)\s*\*\*").unwrap());

// @const: Maximal run of asterisks, used to pair single-asterisk italic
// delimiters without lookaround support
static STAR_RUN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*+").unwrap());

// @const: Footnote definition marker at line start, either the raw form or a
// footnote-reference placeholder followed by a colon
static FOOTNOTE_DEF_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\[\^[^\]]+\]:|<<FOOTNOTE_REF_\d+>>:)(.*)$").unwrap());

// @const: Line consisting of exactly one placeholder token
static PLACEHOLDER_LINE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*<<[A-Z_]+_\d+>>\s*$").unwrap());

/// Classification of a single line for translation purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Blank line or a lone placeholder token; passes through unchanged
    Skip,
    /// Footnote definition; only the text after the colon is translated
    FootnoteDefinition,
    /// Ordinary prose line
    Prose,
}

/// Classify a line as skip, footnote definition, or prose
pub fn classify_line(line: &str) -> LineKind {
    if line.trim().is_empty() || PLACEHOLDER_LINE_REGEX.is_match(line) {
        return LineKind::Skip;
    }
    if FOOTNOTE_DEF_REGEX.is_match(line) {
        return LineKind::FootnoteDefinition;
    }
    LineKind::Prose
}

/// Translate placeholder-substituted text line by line.
///
/// Each line is classified and handled on its own; translation calls are
/// strictly sequential, each blocking until the backend responds or fails.
pub async fn translate_lines(text: &str, adapter: &TranslationAdapter) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let total = lines.len();
    let mut translated = Vec::with_capacity(total);

    for (index, line) in lines.iter().enumerate() {
        let result = match classify_line(line) {
            LineKind::Skip => (*line).to_string(),
            LineKind::FootnoteDefinition => translate_footnote_definition(line, adapter).await,
            LineKind::Prose => {
                let processed = translate_emphasis(line, adapter).await;
                let processed = normalize_emphasis_spacing(&processed);
                normalize_emphasis_spacing(&adapter.translate(&processed).await)
            }
        };
        translated.push(result);

        if (index + 1) % 10 == 0 || index + 1 == total {
            debug!("Translated {}/{} lines", index + 1, total);
        }
    }

    translated.join("\n")
}

/// Translate the body of a footnote definition, leaving the marker untouched
async fn translate_footnote_definition(line: &str, adapter: &TranslationAdapter) -> String {
    let Some(caps) = FOOTNOTE_DEF_REGEX.captures(line) else {
        return line.to_string();
    };
    let marker = &caps[1];
    let body = caps[2].trim();
    let body = translate_emphasis(body, adapter).await;
    let body = normalize_emphasis_spacing(&body);
    let body = normalize_emphasis_spacing(&adapter.translate(&body).await);
    format!("{} {}", marker, body)
}

/// Translate bold and italic spans within a line, re-wrapping each translated
/// span in its original delimiters. Bold is resolved first; italic pairing
/// only runs on the segments between bold spans.
async fn translate_emphasis(text: &str, adapter: &TranslationAdapter) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for matched in BOLD_SPAN_REGEX.find_iter(text) {
        out.push_str(&translate_italic_spans(&text[cursor..matched.start()], adapter).await);
        let inner = &text[matched.start() + 2..matched.end() - 2];
        out.push_str("**");
        out.push_str(&adapter.translate(inner).await);
        out.push_str("**");
        cursor = matched.end();
    }
    out.push_str(&translate_italic_spans(&text[cursor..], adapter).await);

    out
}

/// Translate single-asterisk italic spans within a bold-free segment
async fn translate_italic_spans(segment: &str, adapter: &TranslationAdapter) -> String {
    let spans = italic_spans(segment);
    if spans.is_empty() {
        return segment.to_string();
    }

    let mut out = String::with_capacity(segment.len());
    let mut cursor = 0;
    for span in spans {
        out.push_str(&segment[cursor..span.open]);
        out.push('*');
        out.push_str(&adapter.translate(&segment[span.inner_start..span.inner_end]).await);
        out.push('*');
        cursor = span.close_end;
    }
    out.push_str(&segment[cursor..]);

    out
}

/// An italic span located by asterisk-run pairing
struct ItalicSpan {
    /// Offset of the opening asterisk
    open: usize,
    /// Start of the inner text
    inner_start: usize,
    /// End of the inner text
    inner_end: usize,
    /// Offset just past the closing asterisk
    close_end: usize,
}

/// Locate italic spans: two consecutive asterisk runs of length exactly one
/// with non-empty text between them. Runs of two or more asterisks are bold
/// delimiters and never pair, which stands in for the negative lookaround the
/// regex crate does not support.
fn italic_spans(text: &str) -> Vec<ItalicSpan> {
    let runs: Vec<regex::Match> = STAR_RUN_REGEX.find_iter(text).collect();
    let mut spans = Vec::new();
    let mut i = 0;

    while i + 1 < runs.len() {
        let (open, close) = (&runs[i], &runs[i + 1]);
        if open.as_str().len() == 1 && close.as_str().len() == 1 && close.start() > open.end() {
            spans.push(ItalicSpan {
                open: open.start(),
                inner_start: open.end(),
                inner_end: close.start(),
                close_end: close.end(),
            });
            i += 2;
        } else {
            i += 1;
        }
    }

    spans
}

/// Remove accidental padding immediately inside emphasis delimiters, e.g.
/// `** text **` becomes `**text**`. Backends tend to introduce this around
/// the spans they translate.
pub fn normalize_emphasis_spacing(text: &str) -> String {
    let text = BOLD_PADDING_REGEX.replace_all(text, "**${1}**").into_owned();

    let spans = italic_spans(&text);
    if spans.is_empty() {
        return text;
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for span in spans {
        let trimmed = text[span.inner_start..span.inner_end].trim();
        if trimmed.is_empty() {
            // Nothing but padding between the delimiters; leave it alone
            continue;
        }
        out.push_str(&text[cursor..span.open]);
        out.push('*');
        out.push_str(trimmed);
        out.push('*');
        cursor = span.close_end;
    }
    out.push_str(&text[cursor..]);

    out
}
