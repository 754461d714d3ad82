//! UI primitives for the Learnlog CLI.
//!
//! This module provides:
//! - **Context**: Environment detection (TTY, width, color, unicode, timezone)
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badge tokens, color palette, spinner frames
//! - **Render**: Tables, headers, receipts, hints, the offline banner
//! - **Progress**: Spinner while waiting on the backend
//! - **Format**: String utilities (truncate, wrap, timestamps)
//!
//! # Usage
//!
//! ```ignore
//! use crate::ui::{UiContext, UiFlags};
//! use crate::ui::render::{header, simple_table, hint};
//!
//! let ctx = UiContext::from_env(UiFlags {
//!     json: args.json,
//!     format: args.format.as_deref(),
//!     no_color: cli.no_color,
//!     ascii: cli.ascii,
//! });
//!
//! if ctx.mode.is_json() {
//!     // Handle JSON output separately
//!     return Ok(());
//! }
//!
//! println!("{}", header(&ctx, "list", None));
//! println!("{}", simple_table(&ctx, &columns, &rows));
//! println!("{}", hint(&ctx, "learnlog show <id>"));
//! ```

mod context;
pub mod format;
mod mode;
pub mod progress;
pub mod render;
pub mod theme;

pub use context::{UiContext, UiFlags};
pub use mode::OutputMode;
pub use theme::Badge;

pub use render::{
    badge, blank_line, divider, header, hint, kv, offline_banner, print, print_error, receipt,
    simple_table, Column,
};

pub use progress::with_spinner;

pub use format::{describe_image, format_entry_date, format_timestamp, single_line, truncate, wrap};
