//! CLI error types for structured error handling.
//!
//! Typed errors map to specific exit codes. Core errors that reach `main`
//! unwrapped are classified by [`exit_code_for`].

use std::fmt;

use learnlog_core::LearnlogError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Entry or other resource not found
    NotFound { message: String, hint: String },

    /// Not logged in, or the backend rejected the session
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// Invalid user input
    InvalidInput(String),

    /// The operation needs the backend and it is unreachable
    RemoteUnavailable { message: String, hint: String },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } | CliError::RemoteUnavailable { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::AuthFailed { message, hint } => match hint {
                Some(h) => write!(f, "{}\n{}", message, h),
                None => write!(f, "{}", message),
            },
            CliError::InvalidInput(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    pub fn remote_unavailable(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::RemoteUnavailable {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::RemoteUnavailable { .. } => exit_codes::REMOTE_UNAVAILABLE,
        }
    }
}

/// Exit code for a core error surfaced at the command boundary.
pub fn core_exit_code(err: &LearnlogError) -> i32 {
    match err {
        LearnlogError::NotFound(_) => exit_codes::NOT_FOUND,
        LearnlogError::Validation(_) | LearnlogError::InvalidInput(_) => {
            exit_codes::INVALID_INPUT
        }
        LearnlogError::Unauthorized(_) => exit_codes::AUTH_FAILED,
        LearnlogError::Offline(_)
        | LearnlogError::Network(_)
        | LearnlogError::Timeout(_)
        | LearnlogError::Server(_) => exit_codes::REMOTE_UNAVAILABLE,
        LearnlogError::Storage(_) | LearnlogError::Other(_) => exit_codes::GENERAL,
    }
}

/// Exit code for any error returned by a command handler.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.exit_code();
    }
    if let Some(core_err) = err.downcast_ref::<LearnlogError>() {
        return core_exit_code(core_err);
    }
    exit_codes::GENERAL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_codes() {
        assert_eq!(CliError::not_found("x", "Hint: y").exit_code(), 3);
        assert_eq!(CliError::invalid_input("x").exit_code(), 4);
        assert_eq!(CliError::auth_failed_with_hint("x", "y").exit_code(), 5);
        assert_eq!(CliError::remote_unavailable("x", "y").exit_code(), 6);
    }

    #[test]
    fn test_core_errors_through_anyhow() {
        let err: anyhow::Error = LearnlogError::Validation("title is required".into()).into();
        assert_eq!(exit_code_for(&err), 4);
        let err: anyhow::Error = LearnlogError::Offline("remote entry".into()).into();
        assert_eq!(exit_code_for(&err), 6);
        let err: anyhow::Error = LearnlogError::Unauthorized("expired".into()).into();
        assert_eq!(exit_code_for(&err), 5);
        let err = anyhow::anyhow!("something else");
        assert_eq!(exit_code_for(&err), 1);
    }

    #[test]
    fn test_display_includes_hint() {
        let err = CliError::not_found("Entry abc not found", "Hint: Run `learnlog list`");
        assert_eq!(err.to_string(), "Entry abc not found\nHint: Run `learnlog list`");
    }
}
