//! Text processing utilities.
//!
//! Provides the word and sentence counting used by [`metrics`](crate::metrics).
//! The heuristics are plain: words are runs of non-whitespace, sentences are
//! whatever sits between runs of `.`, `!` and `?`.
//!
//! Whitespace follows what a browser trims and splits on, not
//! [`char::is_whitespace`]: U+FEFF (byte order mark) separates words and
//! U+0085 (next line) does not.

/// Whether `ch` separates words.
pub fn is_word_separator(ch: char) -> bool {
    match ch {
        '\u{feff}' => true,
        '\u{85}' => false,
        _ => ch.is_whitespace(),
    }
}

/// Count words on runs of whitespace.
///
/// Leading and trailing whitespace never produce empty tokens, so an
/// all-whitespace input has no words.
pub fn count_words(text: &str) -> usize {
    text.split(is_word_separator)
        .filter(|word| !word.is_empty())
        .count()
}

/// Count sentence fragments.
///
/// A run of terminators (`...`, `?!`) counts as a single boundary. Fragments
/// that are empty or whitespace-only are dropped, so text made of nothing
/// but punctuation has no sentences.
pub fn count_sentences(text: &str) -> usize {
    text.split(is_sentence_terminator)
        .filter(|fragment| !fragment.trim_matches(is_word_separator).is_empty())
        .count()
}

/// Length of the text in Unicode scalar values.
pub fn char_length(text: &str) -> usize {
    text.chars().count()
}

const fn is_sentence_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}
