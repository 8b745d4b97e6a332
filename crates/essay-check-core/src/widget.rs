//! Essay widget: binds the counters and the feedback flow to a host surface.
//!
//! The host (a page, a terminal, a test double) implements [`EssaySurface`].
//! [`EssayWidget`] owns that surface plus a [`FeedbackProvider`] and exposes
//! the two entry points a host calls at start-up:
//!
//! - [`EssayWidget::wire_live_counting`] attaches the live counters and
//!   renders them once for whatever text is already present.
//! - [`EssayWidget::wire_submit_feedback`] attaches the submit action.
//!
//! Both are idempotent. After wiring, the host forwards edits to
//! [`EssayWidget::handle_input`] and presses to [`EssayWidget::handle_submit`].

use crate::feedback::{FeedbackItem, FeedbackProvider};
use crate::gating::{self, SubmitPolicy};
use crate::metrics::{self, AnalyticsSettings, ReadingTime, TextMetrics};

/// Rendering surface the widget reads from and writes to.
///
/// Display targets are optional on a real page, so their setters default to
/// doing nothing.
pub trait EssaySurface {
    /// Current contents of the essay field.
    fn essay_text(&self) -> String;

    /// Show the word counter.
    fn set_word_count(&mut self, _words: usize) {}

    /// Show the character counter.
    fn set_char_count(&mut self, _chars: usize) {}

    /// Show the reading time estimate.
    fn set_reading_time(&mut self, _time: ReadingTime) {}

    /// Enable or disable the submit control.
    fn set_submit_enabled(&mut self, enabled: bool);

    /// Show or hide the busy indicator while feedback is pending.
    fn set_loading(&mut self, _loading: bool) {}

    /// Replace the feedback panel with `items`.
    fn show_feedback(&mut self, items: &[FeedbackItem]);

    /// Tell the writer something went wrong or is missing.
    fn alert(&mut self, message: &str);
}

/// Settings shared by the counters and the submit gate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EssaySettings {
    /// Reading pace.
    pub analytics: AnalyticsSettings,
    /// Submit thresholds.
    pub policy: SubmitPolicy,
}

/// Result of a wiring call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wiring {
    /// Handlers were attached by this call.
    Attached,
    /// Handlers were already attached; nothing changed.
    AlreadyAttached,
}

/// What happened when the essay was submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// [`EssayWidget::wire_submit_feedback`] has not been called.
    NotWired,
    /// A precondition failed; the message was shown to the writer.
    Rejected(String),
    /// Feedback was rendered.
    Delivered(Vec<FeedbackItem>),
    /// The provider failed; the message was shown to the writer.
    Failed(String),
}

/// Essay widget bound to a surface and a feedback provider.
#[derive(Debug)]
pub struct EssayWidget<S, P> {
    surface: S,
    provider: P,
    settings: EssaySettings,
    counting: bool,
    submitting: bool,
}

impl<S: EssaySurface, P: FeedbackProvider> EssayWidget<S, P> {
    /// Create an unwired widget.
    pub const fn new(surface: S, provider: P, settings: EssaySettings) -> Self {
        Self {
            surface,
            provider,
            settings,
            counting: false,
            submitting: false,
        }
    }

    /// Borrow the surface.
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutably borrow the surface, e.g. to change the essay text.
    pub const fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Give the surface back.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Attach the live counters and render them once.
    pub fn wire_live_counting(&mut self) -> Wiring {
        if self.counting {
            tracing::debug!("live counting already wired");
            return Wiring::AlreadyAttached;
        }
        self.counting = true;
        tracing::debug!("live counting wired");
        self.handle_input();
        Wiring::Attached
    }

    /// Attach the submit action.
    pub fn wire_submit_feedback(&mut self) -> Wiring {
        if self.submitting {
            tracing::debug!("submit feedback already wired");
            return Wiring::AlreadyAttached;
        }
        self.submitting = true;
        tracing::debug!(provider = self.provider.name(), "submit feedback wired");
        Wiring::Attached
    }

    /// Recompute the counters after an edit and push them to the surface.
    ///
    /// Returns `None` if live counting has not been wired.
    pub fn handle_input(&mut self) -> Option<TextMetrics> {
        if !self.counting {
            return None;
        }

        let text = self.surface.essay_text();
        let metrics = metrics::compute_metrics_with(&text, &self.settings.analytics);
        let gate = gating::submit_control(&metrics, &self.settings.policy);

        self.surface.set_word_count(metrics.word_count);
        self.surface.set_char_count(metrics.char_count);
        self.surface.set_reading_time(metrics.reading_time);
        self.surface.set_submit_enabled(gate.is_open());

        tracing::trace!(
            words = metrics.word_count,
            chars = metrics.char_count,
            submit_enabled = gate.is_open(),
            "counters updated"
        );
        Some(metrics)
    }

    /// Check the preconditions, request feedback and render it.
    ///
    /// The loading indicator is shown only while the provider is working and
    /// is cleared whether or not the provider succeeds.
    pub async fn handle_submit(&mut self) -> SubmitOutcome {
        if !self.submitting {
            return SubmitOutcome::NotWired;
        }

        let text = self.surface.essay_text();
        if let Some(reason) = gating::check_submission(&text, &self.settings.policy).reason() {
            let message = reason.to_string();
            tracing::info!(%reason, "submission rejected");
            self.surface.alert(&message);
            return SubmitOutcome::Rejected(message);
        }

        self.surface.set_loading(true);
        let result = self.provider.feedback(&text).await;
        self.surface.set_loading(false);

        match result {
            Ok(items) => {
                tracing::info!(
                    provider = self.provider.name(),
                    items = items.len(),
                    "feedback delivered"
                );
                self.surface.show_feedback(&items);
                SubmitOutcome::Delivered(items)
            }
            Err(err) => {
                tracing::warn!(provider = self.provider.name(), error = %err, "feedback failed");
                let message = err.to_string();
                self.surface.alert(&message);
                SubmitOutcome::Failed(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::error::{FeedbackError, FeedbackResult};
    use crate::feedback::TemplateFeedbackProvider;

    #[derive(Debug, Default)]
    struct RecordingSurface {
        text: String,
        words: Option<usize>,
        chars: Option<usize>,
        reading: Option<ReadingTime>,
        submit_enabled: Option<bool>,
        loading_events: Vec<bool>,
        feedback: Vec<FeedbackItem>,
        alerts: Vec<String>,
        renders: usize,
    }

    impl EssaySurface for RecordingSurface {
        fn essay_text(&self) -> String {
            self.text.clone()
        }

        fn set_word_count(&mut self, words: usize) {
            self.renders += 1;
            self.words = Some(words);
        }

        fn set_char_count(&mut self, chars: usize) {
            self.chars = Some(chars);
        }

        fn set_reading_time(&mut self, time: ReadingTime) {
            self.reading = Some(time);
        }

        fn set_submit_enabled(&mut self, enabled: bool) {
            self.submit_enabled = Some(enabled);
        }

        fn set_loading(&mut self, loading: bool) {
            self.loading_events.push(loading);
        }

        fn show_feedback(&mut self, items: &[FeedbackItem]) {
            self.feedback = items.to_vec();
        }

        fn alert(&mut self, message: &str) {
            self.alerts.push(message.to_string());
        }
    }

    struct DownProvider;

    #[async_trait]
    impl FeedbackProvider for DownProvider {
        async fn feedback(&self, _text: &str) -> FeedbackResult<Vec<FeedbackItem>> {
            Err(FeedbackError::Unavailable("connection refused".to_string()))
        }
    }

    fn widget(text: &str) -> EssayWidget<RecordingSurface, TemplateFeedbackProvider> {
        let surface = RecordingSurface {
            text: text.to_string(),
            ..Default::default()
        };
        EssayWidget::new(
            surface,
            TemplateFeedbackProvider::immediate(),
            EssaySettings::default(),
        )
    }

    fn essay(words: usize) -> String {
        let mut text = vec!["thought"; words].join(" ");
        text.push('.');
        text
    }

    #[test]
    fn wiring_renders_initial_counters() {
        let mut w = widget("Hello world.");
        assert_eq!(w.wire_live_counting(), Wiring::Attached);

        let s = w.surface();
        assert_eq!(s.words, Some(2));
        assert_eq!(s.chars, Some(12));
        assert_eq!(s.reading, Some(ReadingTime::Minutes(1)));
        assert_eq!(s.submit_enabled, Some(false));
    }

    #[test]
    fn wiring_twice_is_a_no_op() {
        let mut w = widget("");
        w.wire_live_counting();
        assert_eq!(w.wire_live_counting(), Wiring::AlreadyAttached);
        assert_eq!(w.surface().renders, 1);

        assert_eq!(w.wire_submit_feedback(), Wiring::Attached);
        assert_eq!(w.wire_submit_feedback(), Wiring::AlreadyAttached);
    }

    #[test]
    fn input_ignored_until_wired() {
        let mut w = widget("text");
        assert!(w.handle_input().is_none());
        assert!(w.surface().words.is_none());
    }

    #[test]
    fn input_toggles_submit_control_at_threshold() {
        let mut w = widget(&essay(49));
        w.wire_live_counting();
        assert_eq!(w.surface().submit_enabled, Some(false));

        w.surface_mut().text = essay(50);
        let metrics = w.handle_input().unwrap();
        assert_eq!(metrics.word_count, 50);
        assert_eq!(w.surface().submit_enabled, Some(true));
    }

    #[tokio::test]
    async fn submit_before_wiring() {
        let mut w = widget(&essay(60));
        assert_eq!(w.handle_submit().await, SubmitOutcome::NotWired);
        assert!(w.surface().loading_events.is_empty());
    }

    #[tokio::test]
    async fn short_essay_rejected_without_loading() {
        let mut w = widget("Too short.");
        w.wire_submit_feedback();

        let outcome = w.handle_submit().await;
        assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
        let s = w.into_surface();
        assert_eq!(s.alerts.len(), 1);
        assert!(s.loading_events.is_empty());
        assert!(s.feedback.is_empty());
    }

    #[tokio::test]
    async fn feedback_rendered_after_loading() {
        let mut w = widget(&essay(60));
        w.wire_submit_feedback();

        let SubmitOutcome::Delivered(items) = w.handle_submit().await else {
            panic!("expected feedback");
        };
        assert_eq!(items.len(), 4);

        let s = w.into_surface();
        assert_eq!(s.loading_events, vec![true, false]);
        assert_eq!(s.feedback, items);
        assert!(s.alerts.is_empty());
    }

    #[tokio::test]
    async fn provider_failure_clears_loading_and_alerts() {
        let surface = RecordingSurface {
            text: essay(60),
            ..Default::default()
        };
        let mut w = EssayWidget::new(surface, DownProvider, EssaySettings::default());
        w.wire_submit_feedback();

        let outcome = w.handle_submit().await;
        assert_eq!(
            outcome,
            SubmitOutcome::Failed("feedback service unavailable: connection refused".to_string())
        );

        let s = w.into_surface();
        assert_eq!(s.loading_events, vec![true, false]);
        assert_eq!(s.alerts.len(), 1);
    }
}
