//! Command handlers, one module per command group.

pub mod auth;
pub mod entries;
pub mod init;
pub mod misc;
pub mod sync;
