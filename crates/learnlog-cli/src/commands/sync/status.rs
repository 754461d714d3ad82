use learnlog_core::SyncMode;

use crate::app::{build_journal, AppContext};
use crate::cli::StatusArgs;
use crate::output::print_json;
use crate::ui::{badge, blank_line, header, hint, kv, print, with_spinner, Badge};

pub fn handle_status(ctx: &AppContext, args: &StatusArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(args.json, None);
    let settings = ctx.settings()?;
    let session = ctx.session_store()?.load();

    let mut journal = build_journal(ctx, false)?;
    let authorized = match with_spinner(&ui, "Contacting backend", || journal.fetch_all()) {
        Ok(()) => true,
        Err(e) if e.is_unauthorized() => false,
        Err(e) => return Err(e.into()),
    };
    let mode = journal.mode();
    let local_count = journal.local().count();
    let snapshot = journal.local().path().display().to_string();

    if ui.mode.is_json() {
        let value = serde_json::json!({
            "mode": mode.to_string(),
            "backend": settings.remote_url,
            "authorized": authorized,
            "auth_required": settings.auth_required,
            "snapshot": snapshot,
            "local_entries": local_count,
            "visible_entries": journal.entries().len(),
            "user": session.as_ref().map(|s| &s.user),
        });
        return print_json(&value);
    }

    if ui.mode.is_pretty() && !ctx.quiet() {
        print(&ui, &header(&ui, "status", None));
        blank_line(&ui);
    }

    let state = match (mode, authorized) {
        (SyncMode::Offline, _) => badge(&ui, Badge::Warn, "offline"),
        (SyncMode::Online, false) => badge(&ui, Badge::Err, "online, session rejected"),
        (SyncMode::Online, true) => badge(&ui, Badge::Ok, "online"),
    };
    if ui.mode.is_pretty() {
        print(&ui, &kv(&ui, "Mode", &state));
    } else {
        print(&ui, &kv(&ui, "mode", &mode.to_string()));
        print(&ui, &kv(&ui, "authorized", &authorized.to_string()));
    }
    print(&ui, &kv(&ui, "Backend", &settings.remote_url));
    print(&ui, &kv(&ui, "Snapshot", &snapshot));
    print(&ui, &kv(&ui, "Local entries", &local_count.to_string()));
    let user = match &session {
        Some(s) => format!("{} <{}>", s.user.username, s.user.email),
        None if settings.auth_required => "not logged in (login required)".to_string(),
        None => "not logged in".to_string(),
    };
    print(&ui, &kv(&ui, "User", &user));

    if ctx.quiet() {
        return Ok(());
    }
    let next = if mode == SyncMode::Offline {
        Some("learnlog retry")
    } else if !authorized || (settings.auth_required && session.is_none()) {
        Some("learnlog login")
    } else if local_count > 0 {
        Some("learnlog publish")
    } else {
        None
    };
    if let Some(command) = next {
        blank_line(&ui);
        print(&ui, &hint(&ui, command));
    }
    Ok(())
}
