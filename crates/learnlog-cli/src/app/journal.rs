//! Opening the journal: remote client, offline snapshot, and the initial probe.

use learnlog_core::store::{Entry, EntryId, LocalStore, RemoteStore};
use learnlog_core::{LearnlogError, SyncController, SyncMode};
use tracing::debug;

use crate::errors::CliError;
use crate::ui::{offline_banner, with_spinner, UiContext};

use super::context::AppContext;
use super::resolver::LOGIN_HINT;

pub type Journal = SyncController<RemoteStore, LocalStore>;

/// Build the controller without contacting the backend.
///
/// With `require_session`, a backend configured with `auth = true` needs a
/// stored login.
pub fn build_journal(ctx: &AppContext, require_session: bool) -> anyhow::Result<Journal> {
    let settings = ctx.settings()?;
    let session = ctx.session_store()?.load();

    if require_session && settings.auth_required && session.is_none() {
        return Err(CliError::auth_failed_with_hint(
            format!("Not logged in to {}", settings.remote_url),
            LOGIN_HINT,
        )
        .into());
    }

    debug!(authenticated = session.is_some(), "opening journal");
    let remote = RemoteStore::new(&settings.remote_url, settings.timeout)?
        .with_token(session.map(|s| s.token));
    let local = LocalStore::new(settings.offline_path.clone());
    Ok(SyncController::new(remote, local))
}

/// Build the controller and load the entry list, falling back to the snapshot.
pub fn open_journal(ctx: &AppContext, ui: &UiContext) -> anyhow::Result<Journal> {
    let mut journal = build_journal(ctx, true)?;
    with_spinner(ui, "Contacting backend", || journal.fetch_all())?;
    announce_offline(ctx, ui, &journal, SyncMode::Online);
    Ok(journal)
}

/// Print the offline banner to stderr when the journal went offline since `before`.
pub fn announce_offline(ctx: &AppContext, ui: &UiContext, journal: &Journal, before: SyncMode) {
    if ctx.quiet() || journal.is_online() || before == SyncMode::Offline {
        return;
    }
    eprintln!("{}", offline_banner(ui, journal.remote().base_url()));
}

/// Resolve a full id or unique prefix to the entry it names.
pub fn resolve_entry(journal: &Journal, input: &str) -> anyhow::Result<(EntryId, Entry)> {
    let found = journal
        .resolve_id(input)
        .and_then(|id| journal.find(&id).map(|entry| (id, entry)));
    match found {
        Ok(pair) => Ok(pair),
        Err(LearnlogError::NotFound(_)) => Err(CliError::not_found(
            format!("Entry {} not found", input.trim()),
            "Hint: Run `learnlog list --all` to see entry IDs.",
        )
        .into()),
        Err(e) => Err(e.into()),
    }
}
