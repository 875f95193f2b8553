use crate::checker::wordset::WordSet;

pub fn is_hyphenated(word: &str) -> bool {
    word.contains('-')
}

/// A hyphenated word is correct if the whole word is known, or if every
/// hyphen-separated component is. Empty components (from `--`) never match.
pub fn check(word: &str, words: &WordSet) -> bool {
    words.contains(word) || word.split('-').all(|part| words.contains(part))
}
