//! HTML fragment to plain text conversion.
//!
//! Snippets are cut out of raw chapter markup at sentence boundaries, so the
//! input is frequently a fragment: it may end inside a tag or carry closing
//! tags with no opener. Converters must never fail on such input; they
//! return an empty string instead.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

static RE_BLOCK_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)</?(?:br|p|div|li|h[1-6]|tr|td|th|blockquote)\b[^>]*(?:>|$)").unwrap()
});
static RE_ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*(?:>|$)").unwrap());
static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\u{00A0}]+").unwrap());

/// Converts an HTML fragment into display text.
pub trait HtmlToText: Send + Sync {
    fn convert(&self, html: &str) -> String;
}

/// Deterministic tag stripper with entity decoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagStripper;

impl HtmlToText for TagStripper {
    fn convert(&self, html: &str) -> String {
        let spaced = RE_BLOCK_TAG.replace_all(html, " ");
        let stripped = RE_ANY_TAG.replace_all(&spaced, "");
        let decoded = html_escape::decode_html_entities(&stripped);
        collapse_whitespace(&decoded)
    }
}

/// Renderer-style conversion through `html2text`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Html2Text;

impl HtmlToText for Html2Text {
    fn convert(&self, html: &str) -> String {
        // Very large width so no hard line breaks get baked in.
        match html2text::from_read(html.as_bytes(), 10_000) {
            Ok(text) => collapse_whitespace(&text),
            Err(err) => {
                warn!("html2text failed on snippet: {err}");
                String::new()
            }
        }
    }
}

/// Which converter the search engine should use.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ConverterKind {
    #[default]
    Strip,
    Html2text,
}

impl ConverterKind {
    pub fn build(self) -> Box<dyn HtmlToText> {
        match self {
            ConverterKind::Strip => Box::new(TagStripper),
            ConverterKind::Html2text => Box::new(Html2Text),
        }
    }
}

impl std::fmt::Display for ConverterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ConverterKind::Strip => "strip",
            ConverterKind::Html2text => "html2text",
        };
        write!(f, "{}", label)
    }
}

fn collapse_whitespace(text: &str) -> String {
    RE_WHITESPACE.replace_all(text, " ").trim().to_string()
}
