//! Live essay counters: words, characters, sentences and reading time.
//!
//! Everything here is a pure function of the input string. The counters are
//! recomputed on every edit, so [`compute_metrics`] is total: empty input,
//! whitespace, and punctuation-only text all produce well-defined values.
//!
//! Reading time is `ceil(words / words_per_minute)` with a default pace of
//! [`DEFAULT_WORDS_PER_MINUTE`]. When there are no words at all the estimate
//! is [`ReadingTime::UnderOneMinute`], which renders as `"< 1 min"`.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::text;

/// Reading pace used when none is configured.
pub const DEFAULT_WORDS_PER_MINUTE: usize = 200;

/// Tunables for [`compute_metrics_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticsSettings {
    /// Reading pace in words per minute. Zero is treated as one.
    pub words_per_minute: usize,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
        }
    }
}

/// Estimated time to read a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReadingTime {
    /// Sentinel for text with no words.
    UnderOneMinute,
    /// Whole minutes, rounded up.
    Minutes(usize),
}

impl ReadingTime {
    /// Estimate reading time for `words` at `words_per_minute`.
    pub fn estimate(words: usize, words_per_minute: usize) -> Self {
        match words.div_ceil(words_per_minute.max(1)) {
            0 => Self::UnderOneMinute,
            minutes => Self::Minutes(minutes),
        }
    }

    /// Minutes as a number, with the sentinel reported as zero.
    pub const fn minutes(self) -> usize {
        match self {
            Self::UnderOneMinute => 0,
            Self::Minutes(m) => m,
        }
    }
}

impl fmt::Display for ReadingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnderOneMinute => f.write_str("< 1 min"),
            Self::Minutes(m) => write!(f, "{m} min"),
        }
    }
}

/// Counters derived from essay text. Never stored; recomputed on each edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TextMetrics {
    /// Whitespace-separated tokens in the trimmed text.
    pub word_count: usize,
    /// Characters in the untrimmed text, exactly as typed.
    pub char_count: usize,
    /// Non-blank fragments between runs of `.`, `!` and `?`.
    pub sentence_count: usize,
    /// `word_count / sentence_count`, rounded half up. Zero sentences divide by one.
    pub avg_words_per_sentence: usize,
    /// Estimated reading time.
    pub reading_time: ReadingTime,
}

/// Compute counters with the default reading pace.
pub fn compute_metrics(text: &str) -> TextMetrics {
    compute_metrics_with(text, &AnalyticsSettings::default())
}

/// Compute counters for `text`.
#[tracing::instrument(level = "trace", skip(text), fields(text_len = text.len()))]
pub fn compute_metrics_with(text: &str, settings: &AnalyticsSettings) -> TextMetrics {
    let word_count = text::count_words(text);
    let sentence_count = text::count_sentences(text);

    TextMetrics {
        word_count,
        char_count: text::char_length(text),
        sentence_count,
        avg_words_per_sentence: rounded_ratio(word_count, sentence_count.max(1)),
        reading_time: ReadingTime::estimate(word_count, settings.words_per_minute),
    }
}

/// `round(numerator / denominator)` with halves rounding up, in integers.
const fn rounded_ratio(numerator: usize, denominator: usize) -> usize {
    (2 * numerator + denominator) / (2 * denominator)
}
