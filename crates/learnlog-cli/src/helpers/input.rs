//! Input handling: entry content, free-text prompts, and passwords.

use std::io::{self, IsTerminal, Read};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use dialoguer::{theme::ColorfulTheme, Input, Password};
use zeroize::Zeroizing;

use crate::errors::CliError;

/// Read entry content from the flag, piped stdin, or `$EDITOR`.
///
/// Returns `None` when nothing was supplied and no editor could be opened
/// (`--no-input` on a terminal, or an empty pipe).
pub fn read_entry_content(
    no_input: bool,
    content: Option<String>,
    editor_override: Option<&str>,
    initial: Option<&str>,
) -> anyhow::Result<Option<String>> {
    if let Some(value) = content {
        if value.trim().is_empty() {
            return Err(CliError::invalid_input("--content cannot be empty").into());
        }
        return Ok(Some(value));
    }

    if !io::stdin().is_terminal() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
        let trimmed = buffer.trim_end();
        if trimmed.trim().is_empty() {
            return Ok(None);
        }
        return Ok(Some(trimmed.to_string()));
    }

    if no_input {
        return Ok(None);
    }

    compose_in_editor(editor_override, initial).map(Some)
}

fn compose_in_editor(editor_override: Option<&str>, initial: Option<&str>) -> anyhow::Result<String> {
    let editor = editor_override
        .map(|value| value.to_string())
        .or_else(|| std::env::var("VISUAL").ok())
        .or_else(|| std::env::var("EDITOR").ok())
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            CliError::invalid_input(
                "No editor configured\nHint: Pass --content, pipe text on stdin, or set $EDITOR.",
            )
        })?;

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| anyhow::anyhow!("System time error: {}", e))?
        .as_nanos();
    let path = std::env::temp_dir().join(format!(
        "learnlog_entry_{}_{}.md",
        std::process::id(),
        nanos
    ));
    std::fs::write(&path, initial.unwrap_or(""))
        .map_err(|e| anyhow::anyhow!("Failed to create temp file: {}", e))?;

    // Editors like `code --wait` carry their own arguments.
    let mut parts = editor.split_whitespace();
    let program = parts.next().unwrap_or("vi");
    let status = Command::new(program)
        .args(parts)
        .arg(&path)
        .status()
        .map_err(|e| anyhow::anyhow!("Failed to launch editor {}: {}", program, e));

    let contents = std::fs::read_to_string(&path);
    let _ = std::fs::remove_file(&path);

    if !status?.success() {
        return Err(anyhow::anyhow!("Editor exited with failure"));
    }
    let contents = contents.map_err(|e| anyhow::anyhow!("Failed to read temp file: {}", e))?;

    let trimmed = contents.trim_end();
    if trimmed.trim().is_empty() {
        return Err(CliError::invalid_input("Entry content is empty").into());
    }
    Ok(trimmed.to_string())
}

/// Prompt for a line of text on a terminal.
pub fn prompt_text(label: &str, default: Option<&str>) -> anyhow::Result<String> {
    let theme = ColorfulTheme::default();
    let mut input = Input::<String>::with_theme(&theme).with_prompt(label);
    if let Some(value) = default {
        input = input.default(value.to_string());
    }
    input
        .interact_text()
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", label.to_lowercase(), e))
}

/// Read a password from LEARNLOG_PASSWORD, or prompt for it.
pub fn prompt_password(interactive: bool, confirm: bool) -> anyhow::Result<Zeroizing<String>> {
    if let Ok(value) = std::env::var("LEARNLOG_PASSWORD") {
        if !value.is_empty() {
            return Ok(Zeroizing::new(value));
        }
    }
    if !interactive {
        return Err(CliError::invalid_input(
            "No password provided and no TTY available. Set LEARNLOG_PASSWORD.",
        )
        .into());
    }

    let mut prompt = Password::new().with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
    }
    prompt
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}
