//! Core library for essay-check.
//!
//! This crate provides the essay counters, submission gating and feedback
//! flow used by the `essay-check` CLI, along with the smaller pieces of site
//! logic that carry computed state (form validation, blog filtering, the
//! pricing toggle).
//!
//! # Modules
//!
//! - [`metrics`] - Word, character and sentence counts plus reading time
//! - [`gating`] - Preconditions for submitting an essay
//! - [`feedback`] - Template feedback and the [`FeedbackProvider`] capability
//! - [`widget`] - Binds counters and feedback to a host [`EssaySurface`]
//! - [`forms`] - Newsletter, contact, sign-up and sign-in validation
//! - [`blog`] - Blog search and category filtering
//! - [`pricing`] - Monthly/yearly price selection
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use essay_check_core::{compute_metrics, ReadingTime};
//!
//! let metrics = compute_metrics("Hello world.");
//! assert_eq!(metrics.word_count, 2);
//! assert_eq!(metrics.reading_time, ReadingTime::Minutes(1));
//! ```
#![deny(unsafe_code)]

pub mod blog;
pub mod config;
pub mod error;
pub mod feedback;
pub mod forms;
pub mod gating;
pub mod metrics;
pub mod pricing;
pub mod text;
pub mod widget;

pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use error::{ConfigError, ConfigResult, FeedbackError, FeedbackResult, FormRejection};
pub use feedback::{FeedbackItem, FeedbackProvider, TemplateFeedbackProvider, generate_feedback};
pub use gating::{BlockReason, Gate, SubmitPolicy, check_submission};
pub use metrics::{ReadingTime, TextMetrics, compute_metrics, compute_metrics_with};
pub use widget::{EssaySettings, EssaySurface, EssayWidget, SubmitOutcome, Wiring};

/// Default limit on input size read by the CLI and MCP server (5 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
