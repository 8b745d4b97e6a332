//! Write command: compose an essay on stdin with live counters.
//!
//! Each line typed is appended to the essay and the counters are redrawn.
//! `:submit` asks for feedback, `:quit` leaves without submitting, and end
//! of input submits whatever has been written (if it was not already
//! reviewed).

use std::io::BufRead;
use std::time::Duration;

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use essay_check_core::config::Config;
use essay_check_core::feedback::TemplateFeedbackProvider;
use essay_check_core::widget::{EssayWidget, SubmitOutcome};

use super::read_input_file;
use crate::terminal::{self, TerminalSurface};

const SUBMIT_COMMAND: &str = ":submit";
const QUIT_COMMAND: &str = ":quit";

/// Arguments for the `write` subcommand.
#[derive(Args, Debug)]
pub struct WriteArgs {
    /// Start from an existing draft.
    #[arg(long, value_name = "FILE")]
    pub from: Option<Utf8PathBuf>,

    /// Simulated review time in milliseconds (overrides config).
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

type TerminalWidget = EssayWidget<TerminalSurface, TemplateFeedbackProvider>;

/// Run the interactive writing session.
#[instrument(name = "cmd_write", skip_all)]
pub fn cmd_write(args: WriteArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(from = ?args.from, delay_ms = ?args.delay_ms, "executing write command");

    let draft = match args.from {
        Some(ref path) => read_input_file(path, config.input_limit())?,
        None => String::new(),
    };
    let delay = args
        .delay_ms
        .map_or_else(|| config.feedback_delay(), Duration::from_millis);

    let mut widget = EssayWidget::new(
        TerminalSurface::new(draft),
        TemplateFeedbackProvider::new(delay),
        config.essay_settings(),
    );
    widget.wire_live_counting();
    widget.wire_submit_feedback();

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("failed to create async runtime")?;

    if !global_json {
        eprintln!(
            "{}",
            format!("Type your essay. {SUBMIT_COMMAND} for feedback, {QUIT_COMMAND} to leave.")
                .dimmed()
        );
    }
    render_counters(&widget, global_json);

    let max_input_bytes = config.input_limit();
    let mut buffered = widget.surface().text_len();
    let mut reviewed = false;
    for line in std::io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        match line.trim() {
            QUIT_COMMAND => return Ok(()),
            SUBMIT_COMMAND => {
                reviewed = submit(&rt, &mut widget, global_json)?;
            }
            _ => {
                buffered += line.len() + usize::from(buffered > 0);
                if let Some(max) = max_input_bytes
                    && buffered > max
                {
                    bail!("input too large: stdin exceeds {max} bytes");
                }
                widget.surface_mut().push_line(&line);
                widget.handle_input();
                reviewed = false;
                render_counters(&widget, global_json);
            }
        }
    }

    if reviewed {
        return Ok(());
    }
    if !submit(&rt, &mut widget, global_json)? {
        bail!("essay was not reviewed");
    }
    Ok(())
}

fn render_counters(widget: &TerminalWidget, global_json: bool) {
    if global_json {
        println!("{}", widget.surface().counters_json());
    } else {
        eprintln!("{}", widget.surface().status_line());
    }
}

/// Returns whether feedback was delivered.
fn submit(
    rt: &tokio::runtime::Runtime,
    widget: &mut TerminalWidget,
    global_json: bool,
) -> anyhow::Result<bool> {
    let outcome = rt.block_on(widget.handle_submit());
    for alert in widget.surface_mut().take_alerts() {
        eprintln!("{} {alert}", "!".yellow());
    }

    match outcome {
        SubmitOutcome::Delivered(ref items) => {
            if global_json {
                println!("{}", serde_json::json!({ "feedback": items }));
            } else {
                terminal::print_feedback(widget.surface().feedback());
            }
            Ok(true)
        }
        SubmitOutcome::Rejected(_) | SubmitOutcome::Failed(_) => Ok(false),
        SubmitOutcome::NotWired => bail!("submit action is not wired"),
    }
}
