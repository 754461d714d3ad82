//! Online/offline sync controller.
//!
//! `SyncController` owns the in-memory entry list and the current
//! [`SyncMode`]. Every operation tries the remote store first while online and
//! falls back to the local snapshot on a connectivity failure. Entries are
//! partitioned by identifier provenance: local entries are only ever touched
//! through the local store, remote entries only through the remote store.

use std::fmt;

use tracing::{debug, info, warn};

use crate::error::{LearnlogError, Result};
use crate::store::{
    sort_by_date_desc, Entry, EntryDraft, EntryId, EntryStore, Provenance, LOCAL_ID_PREFIX,
};

/// Which store the controller tries first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
    #[default]
    Online,
    Offline,
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncMode::Online => write!(f, "online"),
            SyncMode::Offline => write!(f, "offline"),
        }
    }
}

/// Outcome of pushing local entries to the backend.
#[derive(Debug, Default)]
pub struct PublishReport {
    /// `(local id, remote id)` for every entry that made it
    pub published: Vec<(EntryId, EntryId)>,

    /// Local entries still in the snapshot afterwards
    pub remaining: usize,

    /// The failure that stopped the run, if any
    pub error: Option<LearnlogError>,
}

/// Coordinates reads and writes across a remote and a local store.
pub struct SyncController<R: EntryStore, L: EntryStore> {
    remote: R,
    local: L,
    mode: SyncMode,
    entries: Vec<Entry>,
}

impl<R: EntryStore, L: EntryStore> SyncController<R, L> {
    /// Start online with an empty list. Call [`fetch_all`](Self::fetch_all) to probe.
    pub fn new(remote: R, local: L) -> Self {
        Self {
            remote,
            local,
            mode: SyncMode::Online,
            entries: Vec::new(),
        }
    }

    pub fn mode(&self) -> SyncMode {
        self.mode
    }

    pub fn is_online(&self) -> bool {
        self.mode == SyncMode::Online
    }

    /// Current list, newest first.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn local(&self) -> &L {
        &self.local
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    fn set_mode(&mut self, mode: SyncMode) {
        if self.mode != mode {
            info!(from = %self.mode, to = %mode, "sync mode changed");
        }
        self.mode = mode;
    }

    /// Look an entry up by exact id, in the visible list or the snapshot.
    pub fn find(&self, id: &EntryId) -> Result<Entry> {
        if let Some(entry) = self.entries.iter().find(|e| &e.id == id) {
            return Ok(entry.clone());
        }
        if id.is_local() {
            if let Some(entry) = self.local.list()?.into_iter().find(|e| &e.id == id) {
                return Ok(entry);
            }
        }
        Err(LearnlogError::NotFound(format!("Entry {} not found", id)))
    }

    /// Resolve a full id or unique prefix to an id.
    ///
    /// Local entries are searched even while online, when they are not part
    /// of the visible list.
    pub fn resolve_id(&self, input: &str) -> Result<EntryId> {
        let input = input.trim();
        if input.is_empty() {
            return Err(LearnlogError::InvalidInput("Entry id is required".to_string()));
        }

        let mut candidates: Vec<EntryId> = self.entries.iter().map(|e| e.id.clone()).collect();
        if self.is_online() {
            candidates.extend(self.local.list()?.into_iter().map(|e| e.id));
        }

        if let Some(exact) = candidates.iter().find(|id| id.as_str() == input) {
            return Ok(exact.clone());
        }

        let mut matches: Vec<EntryId> = candidates
            .into_iter()
            .filter(|id| id.as_str().starts_with(input))
            .collect();
        matches.dedup();

        match matches.len() {
            // Backend entries are not visible offline, so an unknown
            // non-local id may still name one.
            0 if !self.is_online() && !input.starts_with(LOCAL_ID_PREFIX) => {
                Err(LearnlogError::Offline(format!(
                    "entry {} is not in the offline snapshot; backend entries are unavailable while offline",
                    input
                )))
            }
            0 => Err(LearnlogError::NotFound(format!("Entry {} not found", input))),
            1 => Ok(matches.remove(0)),
            n => Err(LearnlogError::InvalidInput(format!(
                "Id prefix {} is ambiguous ({} matches)",
                input, n
            ))),
        }
    }

    /// Reload the list from the backend, or from the snapshot if it is unreachable.
    ///
    /// # Errors
    ///
    /// `Unauthorized` is returned without touching the mode. Connectivity
    /// failures are absorbed: the controller goes offline and shows the
    /// snapshot.
    pub fn fetch_all(&mut self) -> Result<()> {
        match self.remote.list() {
            Ok(mut entries) => {
                sort_by_date_desc(&mut entries);
                debug!(count = entries.len(), "loaded entries from backend");
                self.entries = entries;
                self.set_mode(SyncMode::Online);
                Ok(())
            }
            Err(e) if e.is_connectivity() => {
                warn!(error = %e, "backend unreachable, using offline snapshot");
                self.set_mode(SyncMode::Offline);
                let mut entries = self.local.list()?;
                sort_by_date_desc(&mut entries);
                self.entries = entries;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Probe the backend again. Returns the resulting mode.
    pub fn retry(&mut self) -> Result<SyncMode> {
        self.fetch_all()?;
        Ok(self.mode)
    }

    /// Create an entry in whichever store the current mode selects.
    pub fn create(&mut self, draft: &EntryDraft) -> Result<Entry> {
        draft.validate()?;

        let created = match self.mode {
            SyncMode::Online => match self.remote.create(draft) {
                Ok(entry) => entry,
                Err(e) if e.is_connectivity() => {
                    warn!(error = %e, "create failed on backend, saving locally");
                    self.set_mode(SyncMode::Offline);
                    self.local.create(draft)?
                }
                Err(e) => return Err(e),
            },
            SyncMode::Offline => self.local.create(draft)?,
        };

        self.fetch_all()?;
        Ok(created)
    }

    /// Update an entry in the store that owns it.
    ///
    /// The list is refreshed whether or not the update succeeded; the update's
    /// own error takes precedence over a refresh error.
    pub fn update(&mut self, id: &EntryId, draft: &EntryDraft) -> Result<Entry> {
        draft.validate()?;

        let outcome = match (id.provenance(), self.mode) {
            (Provenance::Local, _) => self.local.update(id, draft),
            (Provenance::Remote, SyncMode::Online) => {
                let result = self.remote.update(id, draft);
                if let Err(e) = &result {
                    if e.is_connectivity() {
                        warn!(error = %e, "update failed on backend");
                        self.set_mode(SyncMode::Offline);
                    }
                }
                result
            }
            (Provenance::Remote, SyncMode::Offline) => Err(offline_error(id)),
        };

        let refreshed = self.fetch_all();
        let updated = outcome?;
        refreshed?;
        Ok(updated)
    }

    /// Delete an entry, removing it from the list before the store confirms.
    ///
    /// On any failure the list is restored exactly as it was.
    pub fn delete(&mut self, id: &EntryId) -> Result<()> {
        let snapshot = self.entries.clone();
        self.entries.retain(|entry| &entry.id != id);

        let outcome = match (id.provenance(), self.mode) {
            (Provenance::Local, _) => self.local.delete(id),
            (Provenance::Remote, SyncMode::Online) => self.remote.delete(id),
            (Provenance::Remote, SyncMode::Offline) => Err(offline_error(id)),
        };

        if let Err(e) = outcome {
            self.entries = snapshot;
            if e.is_connectivity() {
                warn!(error = %e, "delete failed on backend");
                self.set_mode(SyncMode::Offline);
            }
            return Err(e);
        }
        Ok(())
    }

    /// Recreate local entries on the backend, oldest first.
    ///
    /// Each published entry is removed from the snapshot. The run stops at the
    /// first failure, which is carried in the report.
    pub fn publish_local(&mut self) -> Result<PublishReport> {
        if !self.is_online() {
            return Err(LearnlogError::Offline(
                "backend unreachable, local entries cannot be published".to_string(),
            ));
        }

        // The snapshot is newest-created first.
        let mut pending = self.local.list()?;
        pending.reverse();

        let mut report = PublishReport::default();
        let mut removed = 0;
        for entry in &pending {
            match self.remote.create(&entry.to_draft()) {
                Ok(created) => {
                    debug!(local = %entry.id, remote = %created.id, "published entry");
                    report.published.push((entry.id.clone(), created.id));
                    // Already on the backend: a failed removal stops the run.
                    if let Err(e) = self.local.delete(&entry.id) {
                        warn!(local = %entry.id, error = %e, "published entry is still in the snapshot");
                        report.error = Some(e);
                        break;
                    }
                    removed += 1;
                }
                Err(e) => {
                    if e.is_connectivity() {
                        warn!(error = %e, "publish interrupted");
                        self.set_mode(SyncMode::Offline);
                    }
                    report.error = Some(e);
                    break;
                }
            }
        }
        report.remaining = pending.len() - removed;

        if let Err(e) = self.fetch_all() {
            if report.error.is_none() {
                return Err(e);
            }
        }
        Ok(report)
    }
}

fn offline_error(id: &EntryId) -> LearnlogError {
    LearnlogError::Offline(format!(
        "entry {} lives on the backend and cannot be changed while offline",
        id
    ))
}
