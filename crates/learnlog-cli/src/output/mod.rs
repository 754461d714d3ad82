//! Output formatting helpers for the CLI.
//!
//! This module provides formatting utilities for displaying entries
//! in various formats (JSON, table, plain text).

mod json;
mod text;

pub use json::{entries_json, entry_json, print_json};
pub use text::{print_entry, print_entry_list};
