use std::path::{Path, PathBuf};
use std::time::Duration;

use learnlog_core::fs::write_atomic;
use learnlog_core::store::{DEFAULT_TIMEOUT_SECS, MAX_TIMEOUT_SECS, MIN_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_REMOTE_URL;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LearnlogConfig {
    #[serde(default)]
    pub remote: RemoteSection,
    #[serde(default)]
    pub local: LocalSection,
    #[serde(default)]
    pub ui: UiSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteSection {
    #[serde(default = "default_remote_url")]
    pub url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Require a login session for entry commands
    #[serde(default)]
    pub auth: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalSection {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiSection {
    pub timezone: Option<String>,
    pub editor: Option<String>,
}

impl Default for RemoteSection {
    fn default() -> Self {
        Self {
            url: default_remote_url(),
            timeout_seconds: default_timeout_seconds(),
            auth: false,
        }
    }
}

impl RemoteSection {
    /// Request timeout, clamped to the range the client accepts.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(clamp_timeout(self.timeout_seconds))
    }
}

pub fn clamp_timeout(seconds: u64) -> u64 {
    seconds.clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS)
}

fn default_remote_url() -> String {
    DEFAULT_REMOTE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_offline_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("offline.json"))
}

/// The session file sits next to the offline snapshot.
pub fn session_path_for(offline_path: &Path) -> PathBuf {
    offline_path
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join("session.json")
}

pub fn read_config(path: &Path) -> anyhow::Result<LearnlogConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

/// Read the config if present; a missing file yields defaults.
pub fn read_config_or_default(path: &Path) -> anyhow::Result<LearnlogConfig> {
    if path.exists() {
        read_config(path)
    } else {
        Ok(LearnlogConfig::default())
    }
}

pub fn write_config(path: &Path, config: &LearnlogConfig) -> anyhow::Result<()> {
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    write_atomic(path, contents.as_bytes())
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("learnlog"));
        }
    }
    Ok(home_dir()?.join(".config").join("learnlog"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("learnlog"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("learnlog"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [remote]
            url = "https://log.example.com"
            timeout_seconds = 7
            auth = true

            [local]
            path = "/tmp/offline.json"

            [ui]
            timezone = "UTC"
            editor = "vim"
        "#;
        let config: LearnlogConfig = toml::from_str(toml).expect("parse config");
        assert_eq!(config.remote.url, "https://log.example.com");
        assert_eq!(config.remote.timeout(), Duration::from_secs(7));
        assert!(config.remote.auth);
        assert_eq!(config.local.path.as_deref(), Some("/tmp/offline.json"));
        assert_eq!(config.ui.timezone.as_deref(), Some("UTC"));
        assert_eq!(config.ui.editor.as_deref(), Some("vim"));
    }

    #[test]
    fn test_sections_are_optional() {
        let config: LearnlogConfig = toml::from_str("[ui]\neditor = \"nano\"\n").expect("parse");
        assert_eq!(config.remote.url, DEFAULT_REMOTE_URL);
        assert_eq!(config.remote.timeout_seconds, DEFAULT_TIMEOUT_SECS);
        assert!(!config.remote.auth);
        assert!(config.local.path.is_none());
    }

    #[test]
    fn test_timeout_is_clamped() {
        let mut remote = RemoteSection::default();
        remote.timeout_seconds = 1;
        assert_eq!(remote.timeout(), Duration::from_secs(3));
        remote.timeout_seconds = 60;
        assert_eq!(remote.timeout(), Duration::from_secs(8));
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("learnlog").join("config.toml");
        let mut config = LearnlogConfig::default();
        config.remote.auth = true;
        write_config(&path, &config).expect("write");
        let loaded = read_config(&path).expect("read");
        assert!(loaded.remote.auth);
        assert!(read_config_or_default(&dir.path().join("missing.toml")).is_ok());
    }

    #[test]
    fn test_xdg_paths_use_env() {
        let _guard = ENV_LOCK.lock().expect("env lock");
        std::env::set_var("XDG_CONFIG_HOME", "/tmp/learnlog-config-test");
        std::env::set_var("XDG_DATA_HOME", "/tmp/learnlog-data-test");

        assert_eq!(
            xdg_config_dir().expect("config dir"),
            PathBuf::from("/tmp/learnlog-config-test").join("learnlog")
        );
        let snapshot = default_offline_path().expect("offline path");
        assert_eq!(
            session_path_for(&snapshot),
            PathBuf::from("/tmp/learnlog-data-test")
                .join("learnlog")
                .join("session.json")
        );
    }

    #[test]
    fn test_session_follows_custom_snapshot() {
        assert_eq!(
            session_path_for(Path::new("/srv/notes/offline.json")),
            PathBuf::from("/srv/notes/session.json")
        );
        assert_eq!(
            session_path_for(Path::new("offline.json")),
            PathBuf::from("session.json")
        );
    }
}
