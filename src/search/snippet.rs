//! Sentence snippet extraction around a match in raw chapter HTML.
//!
//! The boundaries are deliberately naive and work on the markup directly:
//!
//! - left: walk back from the match start (inclusive) to the first `>`, `.`,
//!   `!` or `?`; the snippet starts one past it, or at 0.
//! - right: walk forward from the match start to the first `.`, `!`, `?` (kept)
//!   or a `<br` / `</p` opening (snippet ends just before the `<`), or the
//!   last character. A `<` never counts as the last character.
//!
//! The highlight spliced back into the page is located by the raw snippet, so
//! these rules must stay byte-for-byte stable.

use crate::html_text::HtmlToText;
use crate::text_utils::is_sentence_end;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceSnippet {
    /// Inclusive start in the raw text, before trimming.
    pub start_index: usize,
    /// Inclusive end in the raw text, before trimming.
    pub end_index: usize,
    pub raw_html: String,
    pub plain_text: String,
}

impl SentenceSnippet {
    /// Match range reported to the reader: the raw left boundary paired with
    /// the plain-text length.
    pub fn match_range(&self) -> (usize, usize) {
        (self.start_index, self.plain_text.chars().count())
    }
}

pub fn extract(
    text: &[char],
    match_offset: usize,
    match_length: usize,
    converter: &dyn HtmlToText,
) -> Option<SentenceSnippet> {
    if match_offset >= text.len() {
        return None;
    }
    let Some(left) = left_boundary(text, match_offset) else {
        trace!(match_offset, match_length, "no left boundary");
        return None;
    };
    let Some(right) = right_boundary(text, match_offset) else {
        trace!(match_offset, match_length, "no right boundary");
        return None;
    };
    if right + 1 < left {
        return None;
    }

    let raw: String = text[left..=right].iter().collect();
    let raw_html = raw.trim();
    if raw_html.is_empty() {
        return None;
    }
    let plain_text = converter.convert(raw_html).trim().to_string();
    if plain_text.is_empty() {
        trace!(left, right, "snippet converted to empty text");
        return None;
    }

    Some(SentenceSnippet {
        start_index: left,
        end_index: right,
        raw_html: raw_html.to_string(),
        plain_text,
    })
}

fn left_boundary(text: &[char], from: usize) -> Option<usize> {
    for i in (0..=from).rev() {
        if text[i] == '>' || is_sentence_end(text[i]) {
            return Some(i + 1);
        } else if i == 0 {
            return Some(0);
        }
    }
    None
}

fn right_boundary(text: &[char], from: usize) -> Option<usize> {
    let last = text.len().checked_sub(1)?;
    for i in from..=last {
        let ch = text[i];
        if is_sentence_end(ch) {
            return Some(i);
        } else if ch == '<' {
            if i + 2 <= last {
                let tag = (text[i + 1], text[i + 2]);
                if tag == ('b', 'r') || tag == ('/', 'p') {
                    return i.checked_sub(1);
                }
            }
        } else if i == last {
            return Some(i);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html_text::TagStripper;

    fn chars(value: &str) -> Vec<char> {
        value.chars().collect()
    }

    fn snippet_at(html: &str, needle: &str) -> Option<SentenceSnippet> {
        let offset = html.find(needle).expect("needle in fixture");
        let offset = html[..offset].chars().count();
        extract(&chars(html), offset, needle.chars().count(), &TagStripper)
    }

    #[test]
    fn extracts_sentence_between_punctuation() {
        let html = "<p>Hello world. This is a test sentence. Bye.</p>";
        let snippet = snippet_at(html, "test").expect("snippet");

        assert_eq!(snippet.plain_text, "This is a test sentence.");
        assert_eq!(snippet.raw_html, "This is a test sentence.");
        assert_eq!(snippet.start_index, 15);
        assert_eq!(snippet.end_index, 39);
        assert_eq!(snippet.match_range(), (15, 24));
    }

    #[test]
    fn left_boundary_follows_closing_angle_bracket() {
        let html = "<h1>Chapter one</h1>";
        let snippet = snippet_at(html, "one").expect("snippet");
        // No punctuation, `</h1` is not a stop tag: runs to the last char.
        assert_eq!(snippet.start_index, 4);
        assert_eq!(snippet.end_index, html.chars().count() - 1);
        assert_eq!(snippet.plain_text, "Chapter one");
    }

    #[test]
    fn right_boundary_stops_before_line_break_and_paragraph_end() {
        let html = "<p>first line<br/>second line</p>";
        let first = snippet_at(html, "first").expect("first");
        assert_eq!(first.raw_html, "first line");

        let second = snippet_at(html, "second").expect("second");
        assert_eq!(second.raw_html, "second line");
    }

    #[test]
    fn inline_markup_is_kept_raw_and_stripped_in_plain_text() {
        let html = "<p>It was <em>very</em> late!</p>";
        let snippet = snippet_at(html, "late").expect("snippet");
        // Left boundary stops at the `>` of `</em>`.
        assert_eq!(snippet.raw_html, "late!");

        // `</em` is not a stop tag, so the sentence runs on to the `!`.
        let snippet = snippet_at(html, "It").expect("snippet");
        assert_eq!(snippet.raw_html, "It was <em>very</em> late!");
        assert_eq!(snippet.plain_text, "It was very late!");
    }

    #[test]
    fn boundaries_hold_at_document_edges() {
        let snippet = snippet_at("plain text only", "text").expect("snippet");
        assert_eq!(snippet.start_index, 0);
        assert_eq!(snippet.plain_text, "plain text only");
    }

    #[test]
    fn trailing_angle_bracket_without_stop_fails() {
        assert!(snippet_at("no stop here <", "stop").is_none());
        assert!(snippet_at("stop<", "stop").is_none());
    }

    #[test]
    fn markup_only_snippet_fails() {
        // Match inside an attribute: the fragment is only markup.
        let html = "<p>x.<img alt=\"test\"/></p>";
        assert!(snippet_at(html, "test").is_none());
    }

    #[test]
    fn out_of_range_offset_fails() {
        let text = chars("abc");
        assert!(extract(&text, 3, 1, &TagStripper).is_none());
        assert!(extract(&[], 0, 1, &TagStripper).is_none());
    }

    #[test]
    fn stop_tag_at_match_start_cannot_underflow() {
        let text = chars("<br>tail");
        assert!(extract(&text, 0, 3, &TagStripper).is_none());
    }
}
