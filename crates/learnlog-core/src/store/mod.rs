//! Entry model and the two store adapters.

mod local;
mod remote;
mod traits;
mod types;

pub use local::LocalStore;
pub use remote::{RemoteStore, DEFAULT_TIMEOUT_SECS, MAX_TIMEOUT_SECS, MIN_TIMEOUT_SECS};
pub use traits::EntryStore;
pub use types::{
    parse_date, parse_tags, sort_by_date_desc, Entry, EntryDraft, EntryFilter, EntryId,
    Provenance, LOCAL_ID_PREFIX,
};
