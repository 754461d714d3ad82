//! Application-level utilities for the Learnlog CLI.
//!
//! This module provides:
//! - Settings resolution from flags, environment, and the config file
//! - The lazily-initialized application context
//! - Opening the journal with the initial backend probe

mod context;
mod journal;
mod resolver;

pub use context::AppContext;
pub use journal::{announce_offline, build_journal, resolve_entry};
pub use resolver::{expand_tilde, resolve_config_path, validate_remote_url, LOGIN_HINT};
