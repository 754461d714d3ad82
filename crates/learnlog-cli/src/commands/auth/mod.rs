//! Account commands: login, register, logout, whoami.

mod login;
mod logout;
mod register;
mod whoami;

pub use login::handle_login;
pub use logout::handle_logout;
pub use register::handle_register;
pub use whoami::handle_whoami;

use learnlog_core::auth::AuthResponse;
use learnlog_core::session::Session;
use learnlog_core::LearnlogError;

use crate::app::AppContext;
use crate::errors::CliError;
use crate::helpers::prompt_text;
use crate::ui::{print, receipt, UiContext};

/// Required text argument: flag value, prompt on a terminal, or an input error.
fn require_field(
    value: Option<&String>,
    label: &str,
    flag: &str,
    interactive: bool,
) -> anyhow::Result<String> {
    match value.filter(|v| !v.trim().is_empty()) {
        Some(v) => Ok(v.trim().to_string()),
        None if interactive => Ok(prompt_text(label, None)?.trim().to_string()),
        None => {
            Err(CliError::invalid_input(format!("{} is required (pass {})", label, flag)).into())
        }
    }
}

/// A rejected login is reported without the generic re-login hint.
fn credentials_error(err: LearnlogError) -> anyhow::Error {
    match err {
        LearnlogError::Unauthorized(message) => CliError::AuthFailed {
            message: format!("Authentication failed: {}", message),
            hint: None,
        }
        .into(),
        other => other.into(),
    }
}

/// Persist the session and print the receipt.
fn store_session(
    ctx: &AppContext,
    ui: &UiContext,
    response: AuthResponse,
    title: &str,
) -> anyhow::Result<()> {
    let session = Session::from(response);
    let store = ctx.session_store()?;
    store.save(&session)?;

    if ctx.quiet() {
        return Ok(());
    }
    let backend = ctx.settings()?.remote_url.clone();
    print(
        ui,
        &receipt(
            ui,
            &format!("{} as {}", title, session.user.username),
            &[
                ("Email", session.user.email.as_str()),
                ("Backend", backend.as_str()),
            ],
        ),
    );
    Ok(())
}
