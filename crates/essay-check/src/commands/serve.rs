//! Serve command: run the MCP server on stdio.

use std::time::Duration;

use anyhow::Context;
use clap::Args;
use rmcp::{ServiceExt, transport::stdio};
use tracing::{info, instrument};

use essay_check_core::config::Config;

use crate::server::ProjectServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Simulated review time in milliseconds for `generate_feedback`
    /// (overrides config; no delay when neither is set).
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

/// `--delay-ms`, then the configured `feedback_delay_ms`, then zero.
fn review_delay(args: &ServeArgs, config: &Config) -> Duration {
    args.delay_ms
        .or(config.feedback_delay_ms)
        .map_or(Duration::ZERO, Duration::from_millis)
}

/// Serve MCP tools over stdin/stdout until the client disconnects.
///
/// stdout carries the protocol, so all diagnostics go through tracing.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(
    args: ServeArgs,
    max_input_bytes: Option<usize>,
    config: Config,
) -> anyhow::Result<()> {
    let delay = review_delay(&args, &config);
    let server = ProjectServer::with_settings(config.essay_settings(), delay, max_input_bytes);

    info!(delay_ms = ?args.delay_ms, "starting MCP server on stdio");
    let service = server
        .serve(stdio())
        .await
        .context("failed to start MCP server")?;
    service
        .waiting()
        .await
        .context("MCP server terminated abnormally")?;
    info!("MCP server stopped");
    Ok(())
}
