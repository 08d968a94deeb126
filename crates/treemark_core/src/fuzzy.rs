//! Subsequence matcher used to rank bookmark names.
//!
//! Characters are compared as user-perceived characters (extended grapheme
//! clusters), ignoring case and diacritics, so `é`, `É` and `e` are equal and a
//! decomposed `e\u{301}` counts as one character.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;
use unicode_segmentation::UnicodeSegmentation;

pub const NO_MATCH: usize = 0;
pub const BEST_MATCH: usize = 1;

const FINAL_SIGMA: char = 'ς';
const SIGMA: char = 'σ';

/// Score `needle` against `haystack`.
///
/// Returns `0` when `needle` is not a subsequence of `haystack`, otherwise
/// `1 + skipped`, where `skipped` counts the haystack characters passed over before
/// the last needle character matched. Lower is better.
pub fn score(haystack: &str, needle: &str) -> usize {
    let needle_chars = needle.graphemes(true).map(fold).collect::<Vec<_>>();
    if needle_chars.len() > haystack.graphemes(true).count() {
        return NO_MATCH;
    }
    if needle.nfc().eq(haystack.nfc()) {
        return BEST_MATCH;
    }

    let mut weight = BEST_MATCH;
    let mut pending = needle_chars.iter().peekable();
    let mut haystack_chars = haystack.graphemes(true);

    while let Some(expected) = pending.peek() {
        let Some(current) = haystack_chars.next() else {
            return NO_MATCH;
        };
        if **expected == fold(current) {
            pending.next();
        } else {
            weight += 1;
        }
    }
    weight
}

pub fn is_match(haystack: &str, needle: &str) -> bool {
    score(haystack, needle) != NO_MATCH
}

fn fold(grapheme: &str) -> String {
    grapheme
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| if c == FINAL_SIGMA { SIGMA } else { c })
        .collect()
}
