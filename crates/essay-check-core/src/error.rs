//! Error types for essay-check-core.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors a [`FeedbackProvider`](crate::feedback::FeedbackProvider) can report.
///
/// The bundled template provider never fails; these exist for backends that
/// reach a remote analysis service.
#[derive(Error, Debug)]
pub enum FeedbackError {
    /// The provider could not be reached.
    #[error("feedback service unavailable: {0}")]
    Unavailable(String),

    /// The provider answered with something we could not use.
    #[error("feedback service returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// Result type alias using [`FeedbackError`].
pub type FeedbackResult<T> = Result<T, FeedbackError>;

/// A form submission that failed a precondition.
///
/// The `Display` text is the message shown to the person filling in the form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormRejection {
    /// One or more required fields are blank.
    #[error("Please fill in all fields")]
    MissingFields,

    /// The email address does not look like `local@domain.tld`.
    #[error("Please enter a valid email address")]
    InvalidEmail,

    /// The password is shorter than the minimum length.
    #[error("Password must be at least {min} characters long")]
    PasswordTooShort {
        /// Minimum accepted password length in characters.
        min: usize,
    },

    /// Password and confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// The terms checkbox was left unchecked.
    #[error("Please accept the terms and conditions")]
    TermsNotAccepted,
}
