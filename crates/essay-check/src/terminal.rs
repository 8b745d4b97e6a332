//! Terminal implementation of [`EssaySurface`].
//!
//! Setters record what a page would display; the commands decide when to
//! print it. The loading indicator is an `indicatif` spinner on stderr, which
//! hides itself when stderr is not a terminal.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{OwoColorize, Stream};

use essay_check_core::feedback::FeedbackItem;
use essay_check_core::metrics::ReadingTime;
use essay_check_core::widget::EssaySurface;

/// Essay buffer plus the values a page would be showing.
#[derive(Default)]
pub struct TerminalSurface {
    text: String,
    words: usize,
    chars: usize,
    reading_time: Option<ReadingTime>,
    submit_enabled: bool,
    spinner: Option<ProgressBar>,
    feedback: Vec<FeedbackItem>,
    alerts: Vec<String>,
}

impl TerminalSurface {
    /// Surface holding `text` as the essay.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Append a line to the essay.
    pub fn push_line(&mut self, line: &str) {
        if !self.text.is_empty() {
            self.text.push('\n');
        }
        self.text.push_str(line);
    }

    /// Size of the essay in bytes.
    pub fn text_len(&self) -> usize {
        self.text.len()
    }

    /// Counter values as JSON, for `--json` sessions.
    pub fn counters_json(&self) -> serde_json::Value {
        serde_json::json!({
            "word_count": self.words,
            "char_count": self.chars,
            "reading_time": self.reading_time,
            "submit_enabled": self.submit_enabled,
        })
    }

    /// One-line rendering of the counters.
    pub fn status_line(&self) -> String {
        let reading = self
            .reading_time
            .map_or_else(|| "-".to_string(), |t| t.to_string());
        let submit = if self.submit_enabled {
            "submit: ready"
                .if_supports_color(Stream::Stderr, |t| t.green())
                .to_string()
        } else {
            "submit: locked"
                .if_supports_color(Stream::Stderr, |t| t.dimmed())
                .to_string()
        };
        format!(
            "{} words | {} chars | {reading} | {submit}",
            self.words, self.chars
        )
    }

    /// Feedback shown by the last successful submit.
    pub fn feedback(&self) -> &[FeedbackItem] {
        &self.feedback
    }

    /// Alerts raised so far, oldest first.
    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }
}

impl EssaySurface for TerminalSurface {
    fn essay_text(&self) -> String {
        self.text.clone()
    }

    fn set_word_count(&mut self, words: usize) {
        self.words = words;
    }

    fn set_char_count(&mut self, chars: usize) {
        self.chars = chars;
    }

    fn set_reading_time(&mut self, time: ReadingTime) {
        self.reading_time = Some(time);
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }

    fn set_loading(&mut self, loading: bool) {
        if loading {
            let spinner = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
                spinner.set_style(style);
            }
            spinner.set_message("Reviewing your essay...");
            spinner.enable_steady_tick(Duration::from_millis(100));
            self.spinner = Some(spinner);
        } else if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    fn show_feedback(&mut self, items: &[FeedbackItem]) {
        self.feedback = items.to_vec();
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

/// Print feedback items as a labelled list.
pub fn print_feedback(items: &[FeedbackItem]) {
    for item in items {
        println!("{}", item.label.bold());
        println!("  {}", item.message);
    }
}
