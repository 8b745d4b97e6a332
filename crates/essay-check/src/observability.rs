//! Logging setup for the CLI.
//!
//! Two sinks:
//! - stderr, human-readable, quiet by default (warnings and errors only)
//! - a JSONL file, rolled daily, at the level chosen by `RUST_LOG`, `-v`/`-q`
//!   or the configured `log_level`
//!
//! The file sink is skipped (with a warning on stderr) if no usable log
//! directory can be created.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

const LOG_PATH_ENV: &str = "ESSAY_CHECK_LOG_PATH";
const LOG_DIR_ENV: &str = "ESSAY_CHECK_LOG_DIR";
const LOG_FILE_NAME: &str = "essay-check.jsonl";

/// Where the JSONL log goes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Single file, never rotated.
    pub log_path: Option<PathBuf>,
    /// Directory for daily-rotated files.
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Resolve the log location.
    ///
    /// Precedence: `ESSAY_CHECK_LOG_PATH`, `ESSAY_CHECK_LOG_DIR`, the config
    /// file's `log_dir`, then `<platform data dir>/logs`.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        if let Some(path) = non_empty_env(LOG_PATH_ENV) {
            return Self {
                log_path: Some(PathBuf::from(path)),
                log_dir: None,
            };
        }

        let log_dir = non_empty_env(LOG_DIR_ENV)
            .map(PathBuf::from)
            .or(config_log_dir)
            .or_else(|| {
                essay_check_core::config::user_data_local_dir()
                    .map(|dir| dir.join("logs").into_std_path_buf())
            });

        Self {
            log_path: None,
            log_dir,
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Filter for the file sink.
///
/// `RUST_LOG` wins when set. Otherwise `-q` means errors only, each `-v`
/// raises the level one step from `debug`, and with neither the configured
/// level applies.
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => default_level,
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    EnvFilter::new(level)
}

/// Level for the stderr sink.
pub const fn console_level(quiet: bool, verbose: u8) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::ERROR,
        (false, 0) => LevelFilter::WARN,
        (false, 1) => LevelFilter::INFO,
        (false, 2) => LevelFilter::DEBUG,
        (false, _) => LevelFilter::TRACE,
    }
}

/// Install the global subscriber.
///
/// Hold the returned guard until exit so buffered file writes are flushed.
pub fn init_observability(
    config: &ObservabilityConfig,
    file_filter: EnvFilter,
    console: LevelFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_filter(console);

    let (file_layer, guard, file_error) = match open_appender(config) {
        Ok(Some(appender)) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(file_filter);
            (Some(layer), Some(guard), None)
        }
        Ok(None) => (None, None, None),
        Err(err) => (None, None, Some(err)),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    if let Some(err) = file_error {
        tracing::warn!(error = %err, "file logging disabled");
    }
    Ok(guard)
}

fn open_appender(
    config: &ObservabilityConfig,
) -> anyhow::Result<Option<tracing_appender::rolling::RollingFileAppender>> {
    if let Some(ref path) = config.log_path {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = path
            .file_name()
            .with_context(|| format!("log path {} has no file name", path.display()))?;
        ensure_dir(dir)?;
        return Ok(Some(tracing_appender::rolling::never(dir, file_name)));
    }

    let Some(ref dir) = config.log_dir else {
        return Ok(None);
    };
    ensure_dir(dir)?;
    Ok(Some(tracing_appender::rolling::daily(dir, LOG_FILE_NAME)))
}

fn ensure_dir(dir: &Path) -> anyhow::Result<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))
}
