//! Case-folding, whole-word phrase search and query tokenization.

use std::collections::BTreeSet;

/// Word constituents, as `grep -w` defines them.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lower-case and collapse whitespace runs to single spaces.
pub fn fold(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether `phrase` occurs in `haystack` bounded by non-word characters (or
/// the ends of the text) on both sides. Both inputs must already be folded.
pub fn contains_phrase(haystack: &str, phrase: &str) -> bool {
    if phrase.is_empty() {
        return false;
    }
    // Every candidate start is tried, including ones overlapping a rejected match.
    let mut from = 0;
    while let Some(offset) = haystack[from..].find(phrase) {
        let start = from + offset;
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + phrase.len()..].chars().next();
        if !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char) {
            return true;
        }
        from = start + haystack[start..].chars().next().map_or(1, char::len_utf8);
    }
    false
}

/// Distinct lower-case terms of at least `min_len` characters.
pub fn terms(text: &str, min_len: usize) -> BTreeSet<String> {
    text.split(|c: char| !is_word_char(c))
        .filter(|t| t.chars().count() >= min_len)
        .map(str::to_lowercase)
        .collect()
}
