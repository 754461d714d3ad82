//! Input and parsing helper functions for the CLI.
//!
//! This module provides utilities for:
//! - Entry content, text, and password prompting (`input`)
//! - Date, timezone, and format parsing (`parsing`)
//! - Turning image arguments into storable references (`image`)

mod image;
mod input;
mod parsing;

pub use image::resolve_image;
pub use input::{prompt_password, prompt_text, read_entry_content};
pub use parsing::{collect_tags, parse_date_arg, parse_output_format, parse_timezone, parse_until_arg};
