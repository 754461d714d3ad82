//! Entry store trait definition.
//!
//! The `EntryStore` trait is the seam between the sync controller and the two
//! persistence backends (HTTP backend and JSON snapshot). The controller never
//! knows which concrete store it talks to, which keeps it testable with fakes.

use super::types::{Entry, EntryDraft, EntryId};
use crate::error::Result;

/// CRUD interface shared by the remote and local stores.
pub trait EntryStore {
    /// List all entries. Ordering is not guaranteed; callers sort.
    ///
    /// # Errors
    ///
    /// Remote stores return a connectivity error (`Network`, `Timeout`,
    /// `Server`) or `Unauthorized`. Local stores only fail on I/O.
    fn list(&self) -> Result<Vec<Entry>>;

    /// Create an entry and return it with its store-issued identifier.
    fn create(&mut self, draft: &EntryDraft) -> Result<Entry>;

    /// Replace the editable fields of an existing entry.
    ///
    /// # Errors
    ///
    /// Returns `LearnlogError::NotFound` if the identifier is unknown.
    fn update(&mut self, id: &EntryId, draft: &EntryDraft) -> Result<Entry>;

    /// Delete an entry.
    fn delete(&mut self, id: &EntryId) -> Result<()>;
}
