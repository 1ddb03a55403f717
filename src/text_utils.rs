//! Text helpers shared by the scanner and the snippet extractor.

use unicode_normalization::char::{decompose_canonical, is_combining_mark};

/// Sentence-ending punctuation used for snippet boundaries.
pub fn is_sentence_end(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

/// Text folded for case- and diacritic-insensitive comparison.
///
/// `origins[i]` is the index of the source code point that produced
/// `chars[i]`; a single source code point may produce several folded ones
/// (a Hangul syllable decomposes into its jamo), and a bare combining mark
/// produces none.
#[derive(Debug, Clone, Default)]
pub struct FoldedText {
    pub chars: Vec<char>,
    pub origins: Vec<usize>,
}

impl FoldedText {
    pub fn new(source: &[char]) -> Self {
        let mut folded = FoldedText {
            chars: Vec::with_capacity(source.len()),
            origins: Vec::with_capacity(source.len()),
        };
        for (idx, &ch) in source.iter().enumerate() {
            fold_char(ch, |c| {
                folded.chars.push(c);
                folded.origins.push(idx);
            });
        }
        folded
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

/// Fold a query string into the same space as `FoldedText`.
pub fn fold_str(value: &str) -> Vec<char> {
    let mut out = Vec::with_capacity(value.len());
    for ch in value.chars() {
        fold_char(ch, |c| out.push(c));
    }
    out
}

fn fold_char(ch: char, mut emit: impl FnMut(char)) {
    decompose_canonical(ch, |base| {
        if is_combining_mark(base) {
            return;
        }
        for lower in base.to_lowercase() {
            if !is_combining_mark(lower) {
                emit(lower);
            }
        }
    });
}
