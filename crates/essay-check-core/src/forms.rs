//! Precondition checks for the site's forms.
//!
//! Each form is a plain struct of the submitted field values. Validation runs
//! the checks in a fixed order and reports the first failure as a
//! [`FormRejection`] whose `Display` is the message shown to the visitor.
//! Nothing is sent anywhere; an accepted form only yields a confirmation.

use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::FormRejection;

/// Minimum password length for sign-up.
pub const MIN_PASSWORD_CHARS: usize = 6;

/// `local@domain.tld` with no whitespace and exactly one `@`.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

/// Whether `email` looks like an address.
pub fn validate_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Confirmation returned for an accepted form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FormAccepted {
    /// Newsletter subscription.
    Subscribed,
    /// Contact message.
    MessageSent,
    /// Account registration.
    AccountCreated,
    /// Sign-in.
    SignedIn,
}

impl FormAccepted {
    /// Message shown after the form is accepted.
    pub const fn message(self) -> &'static str {
        match self {
            Self::Subscribed => "\u{2713} Subscribed!",
            Self::MessageSent => "\u{2713} Message Sent!",
            Self::AccountCreated => "Account created successfully! Redirecting...",
            Self::SignedIn => "Logged in successfully! Redirecting...",
        }
    }
}

impl std::fmt::Display for FormAccepted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Result of validating a form.
pub type FormResult = Result<FormAccepted, FormRejection>;

/// Newsletter sign-up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct NewsletterForm {
    /// Subscriber address.
    pub email: String,
}

impl NewsletterForm {
    /// A blank address counts as invalid, not missing.
    pub fn validate(&self) -> FormResult {
        check_email(&self.email)?;
        Ok(FormAccepted::Subscribed)
    }
}

/// Contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ContactForm {
    /// Sender name.
    pub name: String,
    /// Sender address.
    pub email: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub message: String,
}

impl ContactForm {
    /// All fields required, then a valid address.
    pub fn validate(&self) -> FormResult {
        require_all(&[
            self.name.as_str(),
            self.email.as_str(),
            self.subject.as_str(),
            self.message.as_str(),
        ])?;
        check_email(&self.email)?;
        Ok(FormAccepted::MessageSent)
    }
}

/// Account registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SignUpForm {
    /// Full name.
    pub full_name: String,
    /// Account address.
    pub email: String,
    /// Chosen password.
    pub password: String,
    /// Password typed again.
    pub confirm_password: String,
    /// Terms and conditions checkbox.
    pub accept_terms: bool,
}

impl SignUpForm {
    /// Fields, address, password length, confirmation, then terms.
    pub fn validate(&self) -> FormResult {
        require_all(&[
            self.full_name.as_str(),
            self.email.as_str(),
            self.password.as_str(),
            self.confirm_password.as_str(),
        ])?;
        check_email(&self.email)?;
        if self.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(FormRejection::PasswordTooShort {
                min: MIN_PASSWORD_CHARS,
            });
        }
        if self.password != self.confirm_password {
            return Err(FormRejection::PasswordMismatch);
        }
        if !self.accept_terms {
            return Err(FormRejection::TermsNotAccepted);
        }
        Ok(FormAccepted::AccountCreated)
    }
}

/// Sign-in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SignInForm {
    /// Account address.
    pub email: String,
    /// Password.
    pub password: String,
    /// "Remember me" checkbox. Not validated.
    pub remember_me: bool,
}

impl SignInForm {
    /// Both fields required, then a valid address.
    pub fn validate(&self) -> FormResult {
        require_all(&[self.email.as_str(), self.password.as_str()])?;
        check_email(&self.email)?;
        Ok(FormAccepted::SignedIn)
    }
}

fn require_all(fields: &[&str]) -> Result<(), FormRejection> {
    if fields.iter().any(|field| field.is_empty()) {
        return Err(FormRejection::MissingFields);
    }
    Ok(())
}

fn check_email(email: &str) -> Result<(), FormRejection> {
    if validate_email(email) {
        Ok(())
    } else {
        Err(FormRejection::InvalidEmail)
    }
}
