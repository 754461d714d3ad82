use crate::app::{AppContext, LOGIN_HINT};
use crate::cli::WhoamiArgs;
use crate::errors::CliError;
use crate::output::print_json;
use crate::ui::{format_timestamp, kv, print};

pub fn handle_whoami(ctx: &AppContext, args: &WhoamiArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(args.json, None);
    let session = ctx
        .session_store()?
        .load()
        .ok_or_else(|| CliError::auth_failed_with_hint("Not logged in", LOGIN_HINT))?;

    if ui.mode.is_json() {
        return print_json(&serde_json::json!({
            "user": session.user,
            "backend": ctx.settings()?.remote_url,
            "logged_in_at": session.created_at,
        }));
    }

    if ctx.quiet() {
        println!("{}", session.user.username);
        return Ok(());
    }
    print(&ui, &kv(&ui, "User", &session.user.username));
    print(&ui, &kv(&ui, "Email", &session.user.email));
    if let Some(id) = &session.user.id {
        print(&ui, &kv(&ui, "ID", id));
    }
    print(
        &ui,
        &kv(
            &ui,
            "Since",
            &format_timestamp(&session.created_at, ui.timezone, ui.mode.is_pretty()),
        ),
    );
    Ok(())
}
