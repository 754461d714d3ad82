//! Constants used throughout the CLI.

/// Backend used when neither flag, environment, nor config names one.
pub const DEFAULT_REMOTE_URL: &str = "http://localhost:5000";

/// Entries shown by `list` without `--limit`.
pub const DEFAULT_LIST_LIMIT: usize = 20;

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Usage error (reported by clap)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// General failure.
    pub const GENERAL: i32 = 1;

    /// Entry not found.
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or payload rejected by validation.
    pub const INVALID_INPUT: i32 = 4;

    /// Login required, or the backend rejected the session.
    pub const AUTH_FAILED: i32 = 5;

    /// Backend unreachable for an operation that needs it.
    pub const REMOTE_UNAVAILABLE: i32 = 6;
}
