//! Metrics command: live counter values for an essay.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use essay_check_core::config::Config;
use essay_check_core::gating::{self, Gate};
use essay_check_core::metrics::{self, TextMetrics};

use super::read_input_file;

/// Arguments for the `metrics` subcommand.
#[derive(Args, Debug)]
pub struct MetricsArgs {
    /// Essay file to count (`-` for stdin).
    pub file: Utf8PathBuf,

    /// Reading pace in words per minute.
    #[arg(long)]
    pub wpm: Option<usize>,
}

#[derive(Serialize)]
struct MetricsReport {
    #[serde(flatten)]
    metrics: TextMetrics,
    reading_time_label: String,
    submit: Gate,
}

/// Print the counters for an essay and whether it could be submitted.
#[instrument(name = "cmd_metrics", skip_all, fields(file = %args.file))]
pub fn cmd_metrics(
    args: MetricsArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, wpm = ?args.wpm, "executing metrics command");

    let content = read_input_file(&args.file, max_input_bytes)?;

    let mut settings = config.essay_settings();
    if let Some(wpm) = args.wpm {
        settings.analytics.words_per_minute = wpm;
    }

    let metrics = metrics::compute_metrics_with(&content, &settings.analytics);
    let submit = gating::submit_control(&metrics, &settings.policy);

    if global_json {
        let report = MetricsReport {
            metrics,
            reading_time_label: metrics.reading_time.to_string(),
            submit,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}: {}", "Words".dimmed(), metrics.word_count);
    println!("{}: {}", "Characters".dimmed(), metrics.char_count);
    println!("{}: {}", "Sentences".dimmed(), metrics.sentence_count);
    println!(
        "{}: {}",
        "Avg words/sentence".dimmed(),
        metrics.avg_words_per_sentence
    );
    println!("{}: {}", "Reading time".dimmed(), metrics.reading_time);
    match submit {
        Gate::Open => println!("{} ready to submit", "READY:".green()),
        Gate::Blocked(reason) => println!("{} {reason}", "NOT READY:".yellow()),
    }

    Ok(())
}
