//! Settings resolution: flags and environment, then config file, then defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono_tz::Tz;
use tracing::debug;

use crate::cli::Cli;
use crate::config::{
    default_config_path, default_offline_path, read_config_or_default, session_path_for,
};
use crate::errors::CliError;
use crate::helpers::parse_timezone;

/// Everything a command needs to reach the backend and the snapshot.
#[derive(Debug, Clone)]
pub struct Settings {
    pub remote_url: String,
    pub timeout: Duration,
    pub auth_required: bool,
    pub offline_path: PathBuf,
    pub session_path: PathBuf,
    pub timezone: Option<Tz>,
    pub editor: Option<String>,
}

/// Resolve the config file path, checking LEARNLOG_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("LEARNLOG_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

pub fn resolve_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let config_path = resolve_config_path()?;
    let config = read_config_or_default(&config_path)?;

    let remote_url = cli
        .url
        .clone()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| config.remote.url.clone());
    validate_remote_url(&remote_url)?;

    let offline_path = match cli
        .offline_path
        .clone()
        .filter(|value| !value.trim().is_empty())
        .or_else(|| config.local.path.clone())
    {
        Some(value) => expand_tilde(&value),
        None => default_offline_path()?,
    };

    let timezone = match config.ui.timezone.as_deref() {
        Some(value) => parse_timezone(value)?,
        None => None,
    };

    debug!(
        config = %config_path.display(),
        url = %remote_url,
        snapshot = %offline_path.display(),
        "resolved settings"
    );
    let session_path = session_path_for(&offline_path);
    Ok(Settings {
        remote_url,
        timeout: config.remote.timeout(),
        auth_required: config.remote.auth,
        offline_path,
        session_path,
        timezone,
        editor: config.ui.editor.clone(),
    })
}

pub fn validate_remote_url(value: &str) -> anyhow::Result<()> {
    let trimmed = value.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        return Ok(());
    }
    Err(CliError::invalid_input(format!(
        "Invalid backend URL: {}\nHint: Use a full URL such as http://localhost:5000",
        value
    ))
    .into())
}

/// Expand a leading `~/` using HOME.
pub fn expand_tilde(value: &str) -> PathBuf {
    if let Some(rest) = value.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return Path::new(&home).join(rest);
        }
    }
    PathBuf::from(value)
}

pub const LOGIN_HINT: &str =
    "Hint: Run `learnlog login` (or `learnlog register` to create an account).";
