use learnlog_core::auth::AuthClient;

use crate::app::AppContext;
use crate::cli::LoginArgs;
use crate::helpers::prompt_password;
use crate::ui::with_spinner;

use super::{credentials_error, require_field, store_session};

pub fn handle_login(ctx: &AppContext, args: &LoginArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false, None);
    let settings = ctx.settings()?;
    let interactive = ui.is_interactive() && !args.no_input;

    let email = require_field(args.email.as_ref(), "Email", "--email", interactive)?;
    let password = prompt_password(interactive, false)?;

    let client = AuthClient::new(&settings.remote_url, settings.timeout)?;
    let response = with_spinner(&ui, "Logging in", || client.login(&email, &password))
        .map_err(credentials_error)?;

    store_session(ctx, &ui, response, "Logged in")
}
