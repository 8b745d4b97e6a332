//! Validate command: run the site's form checks from the command line.

use anyhow::bail;
use clap::{Args, Subcommand};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use essay_check_core::forms::{
    self, ContactForm, FormResult, NewsletterForm, SignInForm, SignUpForm,
};

/// Arguments for the `validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Which form to validate.
    #[command(subcommand)]
    pub form: FormCommand,
}

/// Forms that can be validated.
#[derive(Subcommand, Debug)]
pub enum FormCommand {
    /// Check a single email address.
    Email {
        /// Address to check.
        address: String,
    },
    /// Newsletter signup.
    Newsletter {
        /// Subscriber email.
        #[arg(long, default_value = "")]
        email: String,
    },
    /// Contact form.
    Contact {
        /// Sender name.
        #[arg(long, default_value = "")]
        name: String,
        /// Sender email.
        #[arg(long, default_value = "")]
        email: String,
        /// Subject line.
        #[arg(long, default_value = "")]
        subject: String,
        /// Message body.
        #[arg(long, default_value = "")]
        message: String,
    },
    /// Account sign-up.
    Signup {
        /// Full name.
        #[arg(long, default_value = "")]
        name: String,
        /// Account email.
        #[arg(long, default_value = "")]
        email: String,
        /// Password.
        #[arg(long, default_value = "")]
        password: String,
        /// Password confirmation.
        #[arg(long, default_value = "")]
        confirm: String,
        /// Accept the terms and conditions.
        #[arg(long)]
        accept_terms: bool,
    },
    /// Account sign-in.
    Signin {
        /// Account email.
        #[arg(long, default_value = "")]
        email: String,
        /// Password.
        #[arg(long, default_value = "")]
        password: String,
        /// Keep the session.
        #[arg(long)]
        remember: bool,
    },
}

#[derive(Serialize)]
struct ValidationReport {
    form: &'static str,
    valid: bool,
    message: String,
}

impl FormCommand {
    const fn form_name(&self) -> &'static str {
        match self {
            Self::Email { .. } => "email",
            Self::Newsletter { .. } => "newsletter",
            Self::Contact { .. } => "contact",
            Self::Signup { .. } => "signup",
            Self::Signin { .. } => "signin",
        }
    }
}

/// Returns `Ok(message)` on acceptance and `Err(message)` on rejection.
fn run_form(form: FormCommand) -> Result<String, String> {
    let result: FormResult = match form {
        FormCommand::Email { address } => {
            return if forms::validate_email(&address) {
                Ok("Email address looks valid".to_string())
            } else {
                Err(essay_check_core::FormRejection::InvalidEmail.to_string())
            };
        }
        FormCommand::Newsletter { email } => NewsletterForm { email }.validate(),
        FormCommand::Contact {
            name,
            email,
            subject,
            message,
        } => ContactForm {
            name,
            email,
            subject,
            message,
        }
        .validate(),
        FormCommand::Signup {
            name,
            email,
            password,
            confirm,
            accept_terms,
        } => SignUpForm {
            full_name: name,
            email,
            password,
            confirm_password: confirm,
            accept_terms,
        }
        .validate(),
        FormCommand::Signin {
            email,
            password,
            remember,
        } => SignInForm {
            email,
            password,
            remember_me: remember,
        }
        .validate(),
    };
    result
        .map(|accepted| accepted.message().to_string())
        .map_err(|rejected| rejected.to_string())
}

/// Validate one form and report the site's message.
#[instrument(name = "cmd_validate", skip_all)]
pub fn cmd_validate(args: ValidateArgs, global_json: bool) -> anyhow::Result<()> {
    let form_name = args.form.form_name();
    debug!(form = form_name, "executing validate command");

    let outcome = run_form(args.form);

    if global_json {
        let report = ValidationReport {
            form: form_name,
            valid: outcome.is_ok(),
            message: match &outcome {
                Ok(message) | Err(message) => message.clone(),
            },
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if let Ok(ref message) = outcome {
        println!("{} {message}", "PASS:".green());
    }

    if let Err(message) = outcome {
        bail!("{form_name}: {message}");
    }
    Ok(())
}
