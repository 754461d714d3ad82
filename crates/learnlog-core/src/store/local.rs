//! JSON snapshot store used while the backend is unreachable.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, warn};

use super::traits::EntryStore;
use super::types::{Entry, EntryDraft, EntryId};
use crate::error::{LearnlogError, Result};
use crate::fs::write_atomic;

/// Entry store backed by a single JSON array file.
///
/// Every mutation rewrites the whole file. New entries are prepended, so the
/// file reads newest-created first.
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot. Missing or corrupt files read as empty.
    pub fn load(&self) -> Vec<Entry> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "offline snapshot unreadable, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_slice::<Vec<Entry>>(&data) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "offline snapshot corrupt, treating as empty");
                Vec::new()
            }
        }
    }

    fn save(&self, entries: &[Entry]) -> Result<()> {
        let data = serde_json::to_vec_pretty(entries)?;
        write_atomic(&self.path, &data)?;
        debug!(path = %self.path.display(), count = entries.len(), "offline snapshot written");
        Ok(())
    }

    /// Number of entries currently in the snapshot.
    pub fn count(&self) -> usize {
        self.load().len()
    }
}

impl EntryStore for LocalStore {
    fn list(&self) -> Result<Vec<Entry>> {
        Ok(self.load())
    }

    fn create(&mut self, draft: &EntryDraft) -> Result<Entry> {
        let now = Utc::now();
        let entry = Entry {
            id: EntryId::new_local(),
            title: draft.title.clone(),
            content: draft.content.clone(),
            tags: draft.tags.clone(),
            date: draft.date,
            image: draft.image.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        };

        let mut entries = self.load();
        entries.insert(0, entry.clone());
        self.save(&entries)?;
        Ok(entry)
    }

    fn update(&mut self, id: &EntryId, draft: &EntryDraft) -> Result<Entry> {
        let mut entries = self.load();
        let slot = entries
            .iter_mut()
            .find(|entry| &entry.id == id)
            .ok_or_else(|| LearnlogError::NotFound(format!("Entry {} not found", id)))?;

        slot.title = draft.title.clone();
        slot.content = draft.content.clone();
        slot.tags = draft.tags.clone();
        slot.date = draft.date;
        slot.image = draft.image.clone();
        slot.updated_at = Some(Utc::now());
        let updated = slot.clone();

        self.save(&entries)?;
        Ok(updated)
    }

    fn delete(&mut self, id: &EntryId) -> Result<()> {
        let mut entries = self.load();
        let before = entries.len();
        entries.retain(|entry| &entry.id != id);
        if entries.len() == before {
            debug!(id = %id, "delete of missing local entry ignored");
            return Ok(());
        }
        self.save(&entries)
    }
}
