//! Learnlog CLI - a learning journal that keeps working when its backend is down
//!
//! This is the command-line interface for Learnlog. Entries live on a REST
//! backend; when it cannot be reached, the CLI reads and writes a local
//! snapshot instead.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod ui;

use clap::Parser;
use learnlog_core::LearnlogError;
use tracing_subscriber::EnvFilter;

use crate::app::{AppContext, LOGIN_HINT};
use crate::cli::{Cli, Commands};
use crate::commands::{auth, entries, init, misc, sync};
use crate::errors::exit_code_for;
use crate::ui::print_error;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        let ui_ctx = ctx.ui_context(false, None);

        let rejected_session = e
            .downcast_ref::<LearnlogError>()
            .is_some_and(LearnlogError::is_unauthorized);
        if rejected_session {
            if let Ok(store) = ctx.session_store() {
                if let Err(clear_err) = store.clear() {
                    tracing::warn!(error = %clear_err, "failed to remove rejected session");
                }
            }
        }

        let error_msg = format!("{}", e);
        let (message, hint) = match split_hint(&error_msg) {
            Some((message, hint)) => (message.to_string(), Some(hint.to_string())),
            None if rejected_session => (error_msg.clone(), Some(LOGIN_HINT.to_string())),
            None => (error_msg.clone(), contextual_hint(&error_msg)),
        };

        print_error(&ui_ctx, &message, hint.as_deref().map(hint_text));
        std::process::exit(exit_code_for(&e));
    }
}

/// Log to stderr. `LEARNLOG_LOG` takes an `EnvFilter` directive; `--verbose`
/// turns on debug output for this program only.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("warn,learnlog=debug,learnlog_core=debug")
    } else {
        EnvFilter::try_from_env("LEARNLOG_LOG").unwrap_or_else(|_| EnvFilter::new("error"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Split a "message\nHint: ..." error into its parts.
fn split_hint(error: &str) -> Option<(&str, &str)> {
    let idx = error.find("\nHint:").or_else(|| error.find("\nhint:"))?;
    Some((&error[..idx], &error[idx + 1..]))
}

/// Drop the "Hint:" label; the renderer adds its own.
fn hint_text(hint: &str) -> &str {
    hint.strip_prefix("Hint:")
        .or_else(|| hint.strip_prefix("hint:"))
        .unwrap_or(hint)
        .trim()
}

/// Hints for common errors that do not carry their own.
fn contextual_hint(error: &str) -> Option<String> {
    let error_lower = error.to_lowercase();

    if error_lower.contains("entry") && error_lower.contains("not found") {
        return Some("Hint: Run `learnlog list --all` to see entry IDs.".to_string());
    }
    if error_lower.contains("ambiguous") {
        return Some("Hint: Type more characters of the entry ID.".to_string());
    }
    if error_lower.contains("while offline") {
        return Some(
            "Hint: Run `learnlog retry` once the backend is reachable again.".to_string(),
        );
    }
    if error_lower.contains("timed out") || error_lower.contains("unreachable") {
        return Some("Hint: Run `learnlog status` to check the backend URL.".to_string());
    }
    if error_lower.contains("failed to parse config") {
        return Some("Hint: Fix the file or rewrite it with `learnlog init --force`.".to_string());
    }
    None
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => init::handle_init(ctx, args),
        Some(Commands::Add(args)) => entries::handle_add(ctx, args),
        Some(Commands::Edit(args)) => entries::handle_edit(ctx, args),
        Some(Commands::Delete(args)) => entries::handle_delete(ctx, args),
        Some(Commands::List(args)) => entries::handle_list(ctx, args),
        Some(Commands::Show(args)) => entries::handle_show(ctx, args),
        Some(Commands::Status(args)) => sync::handle_status(ctx, args),
        Some(Commands::Retry) => sync::handle_retry(ctx),
        Some(Commands::Publish(args)) => sync::handle_publish(ctx, args),
        Some(Commands::Login(args)) => auth::handle_login(ctx, args),
        Some(Commands::Register(args)) => auth::handle_register(ctx, args),
        Some(Commands::Logout) => auth::handle_logout(ctx),
        Some(Commands::Whoami(args)) => auth::handle_whoami(ctx, args),
        Some(Commands::Completions(args)) => misc::handle_completions(args),
        None => {
            misc::print_quickstart();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_hint() {
        let (message, hint) =
            split_hint("Config already exists\nHint: Pass --force").expect("has hint");
        assert_eq!(message, "Config already exists");
        assert_eq!(hint, "Hint: Pass --force");
        assert!(split_hint("plain failure").is_none());
        assert_eq!(hint_text(hint), "Pass --force");
        assert_eq!(hint_text("learnlog retry"), "learnlog retry");
    }

    #[test]
    fn test_contextual_hints() {
        assert!(contextual_hint("Entry abc not found")
            .expect("hint")
            .contains("learnlog list"));
        assert!(contextual_hint(
            "Offline: entry 65f1 lives on the backend and cannot be changed while offline"
        )
        .expect("hint")
        .contains("learnlog retry"));
        assert!(contextual_hint(
            "Offline: entry 65f1 is not in the offline snapshot; backend entries are unavailable while offline"
        )
        .expect("hint")
        .contains("learnlog retry"));
        assert!(contextual_hint("something odd").is_none());
    }
}
