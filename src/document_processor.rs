use log::warn;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::translation::adapter::TranslationAdapter;
use crate::translation::line::normalize_emphasis_spacing;

// @module: Markdown/Quarto fragment extraction and restoration
//
// Protected syntactic regions are replaced by positional placeholder tokens of
// the form <<KIND_i>> before translation and put back afterwards. Each
// extraction stage operates on the output of the previous one, so later stages
// never see content already claimed by an earlier stage; restoration walks the
// stages in reverse so that restored content cannot be mistaken for a
// placeholder of an earlier stage.

// @const: Callout block, from an attributed opening marker through its closing
// marker on its own line, nested content included
static CALLOUT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":::\s*\{[^}]+\}[\s\S]*?\n:::").unwrap());

// @const: Triple-backtick fenced code block
static CODE_BLOCK_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"```[\s\S]*?```").unwrap());

// @const: Markdown image, matched before plain links since image syntax is a
// superset prefix of link syntax
static IMAGE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").unwrap());

// @const: Markdown link
static LINK_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").unwrap());

// @const: Single-backtick inline code span
static INLINE_CODE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"`[^`]+`").unwrap());

// @const: Footnote reference marker [^id]
static FOOTNOTE_REF_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\^[^\]]+\]").unwrap());

// @const: YAML front matter, anchored to the start of the document; the
// closing delimiter must start a line
static YAML_FRONT_MATTER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A---[\s\S]*?\n---").unwrap());

// @const: Placeholder-shaped token, used to warn about collisions with real
// document content before extraction begins
static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<<(?:YAML|CALLOUT|CODEBLOCK|MDLINK|INLINECODE|FOOTNOTE_REF)_\d+>>").unwrap()
});

// Restoration patterns tolerate whitespace injected inside the token markers
// and match case-insensitively, since backends may mangle the opaque tokens
// while "translating" the surrounding prose.
static RESTORE_YAML_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<<\s*YAML_(\d+)\s*>>").unwrap());
static RESTORE_CALLOUT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<<\s*CALLOUT_(\d+)\s*>>").unwrap());
static RESTORE_CODE_BLOCK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<<\s*CODEBLOCK_(\d+)\s*>>").unwrap());
static RESTORE_FOOTNOTE_REF_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<<\s*FOOTNOTE_REF_(\d+)\s*>>").unwrap());
static RESTORE_MDLINK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<<\s*MDLINK_(\d+)\s*>>").unwrap());
static RESTORE_INLINE_CODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<<\s*INLINECODE_(\d+)\s*>>").unwrap());

/// Kind of protected fragment, embedded in the placeholder token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    /// YAML front matter block
    Yaml,
    /// Quarto callout block
    Callout,
    /// Fenced code block
    CodeBlock,
    /// Markdown link or image
    MdLink,
    /// Inline code span
    InlineCode,
    /// Footnote reference (not a definition)
    FootnoteRef,
}

impl FragmentKind {
    /// Token name embedded in placeholders of this kind
    pub fn token(&self) -> &'static str {
        match self {
            Self::Yaml => "YAML",
            Self::Callout => "CALLOUT",
            Self::CodeBlock => "CODEBLOCK",
            Self::MdLink => "MDLINK",
            Self::InlineCode => "INLINECODE",
            Self::FootnoteRef => "FOOTNOTE_REF",
        }
    }

    /// Placeholder token for the fragment at the given table index
    pub fn placeholder(&self, index: usize) -> String {
        format!("<<{}_{}>>", self.token(), index)
    }
}

/// Variant of a stored markdown link fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkVariant {
    /// Image syntax: ![label](url)
    Image,
    /// Plain link syntax: [label](url)
    Link,
}

/// A markdown link or image, stored with the label separated from the URL so
/// that only the label is translated at restoration time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MdLink {
    /// Image or plain link
    pub variant: LinkVariant,
    /// Label text (alt text for images); the only translatable part
    pub label: String,
    /// Target URL, never translated
    pub url: String,
}

impl MdLink {
    /// Render the link back to markdown with the given label
    pub fn render(&self, label: &str) -> String {
        match self.variant {
            LinkVariant::Image => format!("![{}]({})", label, self.url),
            LinkVariant::Link => format!("[{}]({})", label, self.url),
        }
    }
}

/// Ordered fragment tables, one per kind, append-only during extraction.
/// Placeholder indices are positions into these tables.
#[derive(Debug, Default)]
pub struct FragmentTables {
    /// YAML front matter (at most one entry, anchored to document start)
    pub yaml: Vec<String>,
    /// Callout blocks, whole and untranslated
    pub callouts: Vec<String>,
    /// Fenced code blocks, whole and untranslated
    pub code_blocks: Vec<String>,
    /// Links and images, label split from URL
    pub links: Vec<MdLink>,
    /// Inline code spans, backticks included
    pub inline_code: Vec<String>,
    /// Footnote references (definitions stay inline)
    pub footnote_refs: Vec<String>,
}

impl FragmentTables {
    /// Total number of extracted fragments across all kinds
    pub fn len(&self) -> usize {
        self.yaml.len()
            + self.callouts.len()
            + self.code_blocks.len()
            + self.links.len()
            + self.inline_code.len()
            + self.footnote_refs.len()
    }

    /// True when no fragment of any kind was extracted
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Extract all protected fragments from a document.
///
/// Returns the placeholder-substituted text together with the fragment tables.
/// Re-inserting every table entry at its placeholder reproduces the original
/// text exactly. Absence of any fragment kind is not an error; malformed
/// markup (unterminated fences, callouts without a closing marker on its own
/// line) simply fails to match and is treated as ordinary prose downstream.
pub fn extract_fragments(content: &str) -> (String, FragmentTables) {
    let mut tables = FragmentTables::default();

    if PLACEHOLDER_REGEX.is_match(content) {
        warn!("Document already contains placeholder-shaped tokens; restoration may be ambiguous");
    }

    // Stage 1: callout blocks, whole, nested code included
    let text = extract_verbatim(
        content,
        &CALLOUT_REGEX,
        FragmentKind::Callout,
        &mut tables.callouts,
    );

    // Stage 2: fenced code blocks not inside callouts
    let text = extract_verbatim(
        &text,
        &CODE_BLOCK_REGEX,
        FragmentKind::CodeBlock,
        &mut tables.code_blocks,
    );

    // Stage 3: images, then plain links
    let text = extract_links(&text, &mut tables.links);

    // Stage 4: inline code
    let text = extract_verbatim(
        &text,
        &INLINE_CODE_REGEX,
        FragmentKind::InlineCode,
        &mut tables.inline_code,
    );

    // Stage 5: footnote references; definition markers stay inline
    let text = extract_footnote_refs(&text, &mut tables.footnote_refs);

    // Stage 6: YAML front matter
    let text = extract_yaml(&text, &mut tables.yaml);

    (text, tables)
}

/// Replace every match of `regex` with a placeholder, storing the matched
/// substring verbatim
fn extract_verbatim(
    text: &str,
    regex: &Regex,
    kind: FragmentKind,
    table: &mut Vec<String>,
) -> String {
    regex
        .replace_all(text, |caps: &Captures| {
            table.push(caps[0].to_string());
            kind.placeholder(table.len() - 1)
        })
        .into_owned()
}

/// Extract images and links into structured records, label split from URL
fn extract_links(text: &str, table: &mut Vec<MdLink>) -> String {
    let text = IMAGE_REGEX
        .replace_all(text, |caps: &Captures| {
            table.push(MdLink {
                variant: LinkVariant::Image,
                label: caps[1].to_string(),
                url: caps[2].to_string(),
            });
            FragmentKind::MdLink.placeholder(table.len() - 1)
        })
        .into_owned();

    LINK_REGEX
        .replace_all(&text, |caps: &Captures| {
            table.push(MdLink {
                variant: LinkVariant::Link,
                label: caps[1].to_string(),
                url: caps[2].to_string(),
            });
            FragmentKind::MdLink.placeholder(table.len() - 1)
        })
        .into_owned()
}

/// Extract footnote references, leaving definition markers (those immediately
/// followed by a colon) in place so their definition text can still be
/// translated
fn extract_footnote_refs(text: &str, table: &mut Vec<String>) -> String {
    FOOTNOTE_REF_REGEX
        .replace_all(text, |caps: &Captures| {
            let Some(matched) = caps.get(0) else {
                return String::new();
            };
            if text[matched.end()..].trim_start().starts_with(':') {
                // Definition marker, stays inline
                return matched.as_str().to_string();
            }
            table.push(matched.as_str().to_string());
            FragmentKind::FootnoteRef.placeholder(table.len() - 1)
        })
        .into_owned()
}

/// Extract a document-leading YAML front matter block, if present
fn extract_yaml(text: &str, table: &mut Vec<String>) -> String {
    match YAML_FRONT_MATTER_REGEX.find(text) {
        Some(matched) => {
            table.push(matched.as_str().to_string());
            format!("{}{}", FragmentKind::Yaml.placeholder(0), &text[matched.end()..])
        }
        None => text.to_string(),
    }
}

/// Restore every placeholder from the fragment tables.
///
/// Kinds are restored in the reverse order of extraction layering: YAML,
/// callouts, code blocks, footnote refs, links/images, inline code. Link and
/// image labels are translated here, with the URL reinserted unmodified;
/// every other fragment is reinserted byte-for-byte. Placeholders with an
/// index that has no table entry are left untouched.
pub async fn restore_fragments(
    text: &str,
    tables: &FragmentTables,
    adapter: &TranslationAdapter,
) -> String {
    let text = restore_kind(text, &RESTORE_YAML_REGEX, |idx| tables.yaml.get(idx).cloned());
    let text = restore_kind(&text, &RESTORE_CALLOUT_REGEX, |idx| {
        tables.callouts.get(idx).cloned()
    });
    let text = restore_kind(&text, &RESTORE_CODE_BLOCK_REGEX, |idx| {
        tables.code_blocks.get(idx).cloned()
    });
    let text = restore_kind(&text, &RESTORE_FOOTNOTE_REF_REGEX, |idx| {
        tables.footnote_refs.get(idx).cloned()
    });

    // Labels are translated at restoration time, not during line translation.
    // Normalization happens here on the translated label, before reinsertion;
    // restored fragments themselves are never normalized.
    let mut rendered_links = Vec::with_capacity(tables.links.len());
    for link in &tables.links {
        let label = normalize_emphasis_spacing(&adapter.translate(&link.label).await);
        rendered_links.push(link.render(&label));
    }
    let text = restore_kind(&text, &RESTORE_MDLINK_REGEX, |idx| {
        rendered_links.get(idx).cloned()
    });

    restore_kind(&text, &RESTORE_INLINE_CODE_REGEX, |idx| {
        tables.inline_code.get(idx).cloned()
    })
}

/// Replace each placeholder matched by `regex` with its table entry, leaving
/// tokens with unknown indices as they are
fn restore_kind<F>(text: &str, regex: &Regex, lookup: F) -> String
where
    F: Fn(usize) -> Option<String>,
{
    regex
        .replace_all(text, |caps: &Captures| {
            caps.get(1)
                .and_then(|idx| idx.as_str().parse::<usize>().ok())
                .and_then(&lookup)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
