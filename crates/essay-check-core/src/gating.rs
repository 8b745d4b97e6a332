//! Submission gating.
//!
//! Two preconditions guard a feedback request. The submit control is only
//! enabled once the essay has [`MIN_SUBMIT_WORDS`] words, and the submit
//! action itself refuses text shorter than [`MIN_SUBMIT_CHARS`] characters.
//! Both are reported as a [`Gate`] value carrying the reason, never as an error.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::metrics::TextMetrics;
use crate::text;

/// Words required before the submit control is enabled.
pub const MIN_SUBMIT_WORDS: usize = 50;

/// Characters required by the submit action.
pub const MIN_SUBMIT_CHARS: usize = 50;

/// Thresholds applied by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SubmitPolicy {
    /// Minimum word count for the submit control.
    pub min_words: usize,
    /// Minimum character count for the submit action.
    pub min_chars: usize,
}

impl Default for SubmitPolicy {
    fn default() -> Self {
        Self {
            min_words: MIN_SUBMIT_WORDS,
            min_chars: MIN_SUBMIT_CHARS,
        }
    }
}

/// Why a submission is not allowed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockReason {
    /// Not enough words to enable the submit control.
    TooFewWords {
        /// Words in the essay.
        have: usize,
        /// Words required.
        need: usize,
    },
    /// Not enough characters for the submit action.
    TooShort {
        /// Characters in the essay.
        have: usize,
        /// Characters required.
        need: usize,
    },
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewWords { have, need } => {
                write!(f, "Please write at least {need} words ({have} so far)")
            }
            Self::TooShort { need, .. } => write!(f, "Please write at least {need} characters"),
        }
    }
}

/// Outcome of a precondition check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum Gate {
    /// The action may proceed.
    Open,
    /// The action is blocked for the given reason.
    Blocked(BlockReason),
}

impl Gate {
    /// Whether the action may proceed.
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }

    /// The blocking reason, if any.
    pub const fn reason(&self) -> Option<BlockReason> {
        match self {
            Self::Open => None,
            Self::Blocked(reason) => Some(*reason),
        }
    }
}

/// Whether the submit control should be enabled for these counters.
pub const fn submit_control(metrics: &TextMetrics, policy: &SubmitPolicy) -> Gate {
    if metrics.word_count < policy.min_words {
        Gate::Blocked(BlockReason::TooFewWords {
            have: metrics.word_count,
            need: policy.min_words,
        })
    } else {
        Gate::Open
    }
}

/// Full check run when the essay is submitted.
///
/// The word gate comes first (a disabled control cannot be pressed), then the
/// character floor on the raw text.
pub fn check_submission(text: &str, policy: &SubmitPolicy) -> Gate {
    let words = text::count_words(text);
    if words < policy.min_words {
        return Gate::Blocked(BlockReason::TooFewWords {
            have: words,
            need: policy.min_words,
        });
    }

    let chars = text::char_length(text);
    if chars < policy.min_chars {
        return Gate::Blocked(BlockReason::TooShort {
            have: chars,
            need: policy.min_chars,
        });
    }

    Gate::Open
}
