//! Feedback command: submit an essay and print the review.

use std::time::Duration;

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use clap::Args;
use serde::Serialize;
use tracing::{debug, instrument};

use essay_check_core::config::Config;
use essay_check_core::feedback::{FeedbackItem, FeedbackProvider, TemplateFeedbackProvider};
use essay_check_core::metrics::{self, TextMetrics};
use essay_check_core::widget::{EssayWidget, SubmitOutcome};

use super::read_input_file;
use crate::terminal::{self, TerminalSurface};

/// Arguments for the `feedback` subcommand.
#[derive(Args, Debug)]
pub struct FeedbackArgs {
    /// Essay file to review (`-` for stdin).
    pub file: Utf8PathBuf,

    /// Simulated review time in milliseconds (overrides config).
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

#[derive(Serialize)]
struct FeedbackReport<'a> {
    metrics: TextMetrics,
    provider: &'static str,
    feedback: &'a [FeedbackItem],
}

/// Check the submit preconditions, then request and print feedback.
#[instrument(name = "cmd_feedback", skip_all, fields(file = %args.file))]
pub fn cmd_feedback(
    args: FeedbackArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, delay_ms = ?args.delay_ms, "executing feedback command");

    let content = read_input_file(&args.file, max_input_bytes)?;
    let settings = config.essay_settings();
    let delay = args
        .delay_ms
        .map_or_else(|| config.feedback_delay(), Duration::from_millis);
    let provider = TemplateFeedbackProvider::new(delay);
    let provider_name = provider.name();
    let metrics = metrics::compute_metrics_with(&content, &settings.analytics);

    let mut widget = EssayWidget::new(TerminalSurface::new(content), provider, settings);
    widget.wire_submit_feedback();

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("failed to create async runtime")?;
    let outcome = rt.block_on(widget.handle_submit());

    match outcome {
        SubmitOutcome::Delivered(items) => {
            if global_json {
                let report = FeedbackReport {
                    metrics,
                    provider: provider_name,
                    feedback: &items,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                terminal::print_feedback(widget.surface().feedback());
            }
            Ok(())
        }
        SubmitOutcome::Rejected(reason) => bail!("{}: {reason}", args.file),
        SubmitOutcome::Failed(message) => bail!("feedback failed for {}: {message}", args.file),
        SubmitOutcome::NotWired => bail!("submit action is not wired"),
    }
}
