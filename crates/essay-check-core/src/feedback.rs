//! Essay feedback.
//!
//! [`generate_feedback`] is a fixed four-item template: no grammar or style
//! analysis happens. The only data-dependent value is the average sentence
//! length interpolated into the style note.
//!
//! Feedback is requested through the [`FeedbackProvider`] capability so a real
//! analysis backend can replace [`TemplateFeedbackProvider`] without touching
//! the counters. The template provider waits for a configurable delay before
//! answering, standing in for a network round trip.

use std::time::Duration;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::FeedbackResult;
use crate::metrics::compute_metrics;

/// Simulated latency of the template provider.
pub const DEFAULT_FEEDBACK_DELAY: Duration = Duration::from_millis(2000);

/// One labelled note in the feedback list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FeedbackItem {
    /// Short heading, prefixed with a status glyph.
    pub label: String,
    /// The note itself.
    pub message: String,
}

impl FeedbackItem {
    fn new(label: &str, message: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            message: message.into(),
        }
    }
}

/// Build the template feedback for `text`.
///
/// Always returns exactly four items: grammar, style, clarity, suggestions.
#[tracing::instrument(level = "debug", skip(text), fields(text_len = text.len()))]
pub fn generate_feedback(text: &str) -> Vec<FeedbackItem> {
    let avg = compute_metrics(text).avg_words_per_sentence;

    vec![
        FeedbackItem::new(
            "\u{2713} Grammar",
            "No major grammar issues detected. Great work!",
        ),
        FeedbackItem::new(
            "\u{26a0} Style",
            format!(
                "Your average sentence length is {avg} words. \
                 Consider varying sentence length for better readability."
            ),
        ),
        FeedbackItem::new(
            "\u{2713} Clarity",
            "Your writing is clear and well-structured.",
        ),
        FeedbackItem::new(
            "\u{1f4a1} Suggestions",
            "Consider adding more specific examples to support your arguments.",
        ),
    ]
}

/// Source of essay feedback.
#[async_trait]
pub trait FeedbackProvider: Send + Sync {
    /// Produce feedback for an essay that already passed the submit gate.
    async fn feedback(&self, text: &str) -> FeedbackResult<Vec<FeedbackItem>>;

    /// Provider name for logs.
    fn name(&self) -> &'static str {
        "unknown"
    }
}

/// Template feedback after a fixed delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateFeedbackProvider {
    delay: Duration,
}

impl TemplateFeedbackProvider {
    /// Create a provider that answers after `delay`.
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Create a provider that answers immediately.
    pub const fn immediate() -> Self {
        Self::new(Duration::ZERO)
    }

    /// The configured delay.
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for TemplateFeedbackProvider {
    fn default() -> Self {
        Self::new(DEFAULT_FEEDBACK_DELAY)
    }
}

#[async_trait]
impl FeedbackProvider for TemplateFeedbackProvider {
    async fn feedback(&self, text: &str) -> FeedbackResult<Vec<FeedbackItem>> {
        if !self.delay.is_zero() {
            tracing::debug!(delay_ms = self.delay.as_millis(), "simulating feedback latency");
            tokio::time::sleep(self.delay).await;
        }
        Ok(generate_feedback(text))
    }

    fn name(&self) -> &'static str {
        "template"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_four_items() {
        let long = "word ".repeat(500);
        for text in ["One.", "A few words here. And more!", long.as_str()] {
            assert_eq!(generate_feedback(text).len(), 4);
        }
    }

    #[test]
    fn labels_in_fixed_order() {
        let labels: Vec<_> = generate_feedback("Hi there.")
            .into_iter()
            .map(|item| item.label)
            .collect();
        assert!(labels[0].ends_with("Grammar"));
        assert!(labels[1].ends_with("Style"));
        assert!(labels[2].ends_with("Clarity"));
        assert!(labels[3].ends_with("Suggestions"));
    }

    #[test]
    fn style_note_interpolates_average() {
        let items = generate_feedback("One two three. Four five six seven eight.");
        assert_eq!(
            items[1].message,
            "Your average sentence length is 4 words. \
             Consider varying sentence length for better readability."
        );
    }

    #[test]
    fn other_notes_are_static() {
        let a = generate_feedback("Short.");
        let b = generate_feedback("A much longer essay with many words in it. Truly.");
        assert_eq!(a[0], b[0]);
        assert_eq!(a[2], b[2]);
        assert_eq!(a[3], b[3]);
        assert_ne!(a[1], b[1]);
    }

    #[tokio::test]
    async fn immediate_provider_returns_template() {
        let provider = TemplateFeedbackProvider::immediate();
        let items = provider.feedback("Hello world.").await.unwrap();
        assert_eq!(items, generate_feedback("Hello world."));
        assert_eq!(provider.name(), "template");
    }

    #[tokio::test(start_paused = true)]
    async fn default_provider_waits_for_delay() {
        let provider = TemplateFeedbackProvider::default();
        assert_eq!(provider.delay(), DEFAULT_FEEDBACK_DELAY);

        let start = tokio::time::Instant::now();
        let items = provider.feedback("Hello world.").await.unwrap();
        assert_eq!(items.len(), 4);
        assert!(start.elapsed() >= DEFAULT_FEEDBACK_DELAY);
    }
}
