//! Persisted session: the bearer token and the cached user profile.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::auth::{AuthResponse, UserProfile};
use crate::error::Result;
use crate::fs::{set_private_permissions, write_atomic};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
    pub created_at: DateTime<Utc>,
}

impl From<AuthResponse> for Session {
    fn from(response: AuthResponse) -> Self {
        Self {
            token: response.token,
            user: response.user,
            created_at: Utc::now(),
        }
    }
}

/// Reads and writes `session.json`.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the current session, if any. A damaged file counts as logged out.
    pub fn load(&self) -> Option<Session> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "session file unreadable");
                return None;
            }
        };
        match serde_json::from_slice(&data) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "session file corrupt");
                None
            }
        }
    }

    /// Persist the session with owner-only permissions.
    pub fn save(&self, session: &Session) -> Result<()> {
        let data = serde_json::to_vec_pretty(session)?;
        write_atomic(&self.path, &data)?;
        set_private_permissions(&self.path)?;
        debug!(path = %self.path.display(), user = %session.user.username, "session saved");
        Ok(())
    }

    /// Remove the session file. Returns whether a session existed.
    pub fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
