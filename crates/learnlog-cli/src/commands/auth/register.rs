use learnlog_core::auth::AuthClient;

use crate::app::AppContext;
use crate::cli::RegisterArgs;
use crate::helpers::prompt_password;
use crate::ui::with_spinner;

use super::{credentials_error, require_field, store_session};

pub fn handle_register(ctx: &AppContext, args: &RegisterArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false, None);
    let settings = ctx.settings()?;
    let interactive = ui.is_interactive() && !args.no_input;

    let username = require_field(args.username.as_ref(), "Username", "--username", interactive)?;
    let email = require_field(args.email.as_ref(), "Email", "--email", interactive)?;
    let password = prompt_password(interactive, true)?;

    let client = AuthClient::new(&settings.remote_url, settings.timeout)?;
    let response = with_spinner(&ui, "Creating account", || {
        client.register(&username, &email, &password)
    })
    .map_err(credentials_error)?;

    store_session(ctx, &ui, response, "Registered")
}
