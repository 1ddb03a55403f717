//! Case- and diacritic-insensitive occurrence scanning.

use crate::text_utils::{FoldedText, fold_str};

/// A match inside a document, in code-point indices of the raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOffset {
    pub offset: usize,
    pub len: usize,
}

impl MatchOffset {
    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// Lazily yields the non-overlapping occurrences of `query` in `text`.
pub fn find_occurrences(text: &[char], query: &str) -> Occurrences {
    Occurrences {
        haystack: FoldedText::new(text),
        needle: fold_str(query),
        source_len: text.len(),
        cursor: 0,
    }
}

#[derive(Debug, Clone)]
pub struct Occurrences {
    haystack: FoldedText,
    needle: Vec<char>,
    source_len: usize,
    cursor: usize,
}

impl Iterator for Occurrences {
    type Item = MatchOffset;

    fn next(&mut self) -> Option<MatchOffset> {
        let width = self.needle.len();
        if width == 0 || self.haystack.len() < width {
            return None;
        }
        let last_start = self.haystack.len() - width;
        while self.cursor <= last_start {
            let start = self.cursor;
            if self.haystack.chars[start..start + width] == self.needle[..]
                && self.on_source_boundaries(start, width)
            {
                // Resume after the match: overlapping hits are not reported.
                self.cursor = start + width;
                let offset = self.haystack.origins[start];
                let end = self
                    .haystack
                    .origins
                    .get(start + width)
                    .copied()
                    .unwrap_or(self.source_len);
                return Some(MatchOffset {
                    offset,
                    len: end - offset,
                });
            }
            self.cursor += 1;
        }
        None
    }
}

impl Occurrences {
    /// A hit must cover whole source characters: it may not begin or end
    /// inside the folded expansion of one (a Hangul syllable splits into
    /// several jamo).
    fn on_source_boundaries(&self, start: usize, width: usize) -> bool {
        let origins = &self.haystack.origins;
        let starts_inside = start > 0 && origins[start] == origins[start - 1];
        let ends_inside = origins.get(start + width) == Some(&origins[start + width - 1]);
        !starts_inside && !ends_inside
    }
}
