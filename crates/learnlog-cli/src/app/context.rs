//! Application context for the Learnlog CLI.
//!
//! Bundles CLI arguments with lazily-resolved settings so handlers do not
//! re-read the config file.

use once_cell::unsync::OnceCell;

use learnlog_core::session::SessionStore;

use crate::cli::Cli;
use crate::ui::{UiContext, UiFlags};

use super::journal::{open_journal, Journal};
use super::resolver::{resolve_settings, Settings};

pub struct AppContext<'a> {
    cli: &'a Cli,
    settings: OnceCell<Settings>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            settings: OnceCell::new(),
        }
    }

    pub fn cli(&self) -> &Cli {
        self.cli
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Resolved settings, loaded on first use.
    pub fn settings(&self) -> anyhow::Result<&Settings> {
        self.settings.get_or_try_init(|| resolve_settings(self.cli))
    }

    /// Build a UI context for output formatting.
    ///
    /// Settings errors are ignored here so that error reporting in `main`
    /// still works when the config itself is broken.
    pub fn ui_context(&self, json: bool, format: Option<&str>) -> UiContext {
        let timezone = self.settings().ok().and_then(|s| s.timezone);
        let flags = UiFlags {
            json,
            format,
            no_color: self.cli.no_color,
            ascii: self.cli.ascii,
        };
        UiContext::from_env(flags).with_timezone(timezone)
    }

    pub fn session_store(&self) -> anyhow::Result<SessionStore> {
        Ok(SessionStore::new(self.settings()?.session_path.clone()))
    }

    pub fn editor(&self) -> anyhow::Result<Option<&str>> {
        Ok(self.settings()?.editor.as_deref())
    }

    /// Open the journal and probe the backend.
    pub fn open_journal(&self, ui: &UiContext) -> anyhow::Result<Journal> {
        open_journal(self, ui)
    }
}
