//! # Learnlog Core
//!
//! Core library for Learnlog - a personal learning journal that keeps working
//! when its backend is unreachable.
//!
//! This crate provides the data model, the two entry stores, and the sync
//! controller that decides which store a read or write goes to, independent
//! of the CLI interface.
//!
//! ## Architecture
//!
//! - **store**: `EntryStore` trait, the HTTP `RemoteStore`, and the JSON
//!   snapshot `LocalStore`
//! - **sync**: `SyncController`, the online/offline state machine
//! - **auth**: login and registration against the backend
//! - **session**: persisted session token and cached user profile

pub mod auth;
pub mod error;
pub mod fs;
mod http;
pub mod session;
pub mod store;
pub mod sync;

pub use error::{LearnlogError, Result};
pub use store::EntryStore;
pub use sync::{SyncController, SyncMode};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
