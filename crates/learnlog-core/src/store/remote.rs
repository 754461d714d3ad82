//! HTTP entry store talking to the learning-log backend.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use tracing::debug;

use super::traits::EntryStore;
use super::types::{Entry, EntryDraft, EntryId};
use crate::error::{LearnlogError, Result};
use crate::http::{build_client, check_status, classify_transport, decode_json, normalize_base_url};

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
/// Lowest accepted timeout in seconds.
pub const MIN_TIMEOUT_SECS: u64 = 3;
/// Highest accepted timeout in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 8;

/// Entry store backed by the REST endpoints under `/api/logs`.
#[derive(Debug, Clone)]
pub struct RemoteStore {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl RemoteStore {
    /// Build a store for `base_url`. The timeout is clamped to the accepted range.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let secs = timeout
            .as_secs()
            .clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS);
        Ok(Self {
            client: build_client(Duration::from_secs(secs))?,
            base_url: normalize_base_url(base_url),
            token: None,
        })
    }

    /// Attach a bearer token to every request.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/api/logs", self.base_url)
    }

    fn entry_url(&self, id: &EntryId) -> String {
        format!("{}/api/logs/{}", self.base_url, id)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn ensure_remote(id: &EntryId) -> Result<()> {
        if id.is_local() {
            return Err(LearnlogError::InvalidInput(format!(
                "Local entry {} cannot be sent to the backend",
                id
            )));
        }
        Ok(())
    }
}

impl EntryStore for RemoteStore {
    fn list(&self) -> Result<Vec<Entry>> {
        let url = self.collection_url();
        debug!(%url, "GET entries");
        let response = self
            .authorize(self.client.get(&url))
            .send()
            .map_err(classify_transport)?;
        decode_json(check_status(response)?)
    }

    fn create(&mut self, draft: &EntryDraft) -> Result<Entry> {
        let url = self.collection_url();
        debug!(%url, title = %draft.title, "POST entry");
        let response = self
            .authorize(self.client.post(&url))
            .json(draft)
            .send()
            .map_err(classify_transport)?;
        decode_json(check_status(response)?)
    }

    fn update(&mut self, id: &EntryId, draft: &EntryDraft) -> Result<Entry> {
        Self::ensure_remote(id)?;
        let url = self.entry_url(id);
        debug!(%url, "PUT entry");
        let response = self
            .authorize(self.client.put(&url))
            .json(draft)
            .send()
            .map_err(classify_transport)?;
        decode_json(check_status(response)?)
    }

    fn delete(&mut self, id: &EntryId) -> Result<()> {
        Self::ensure_remote(id)?;
        let url = self.entry_url(id);
        debug!(%url, "DELETE entry");
        let response = self
            .authorize(self.client.delete(&url))
            .send()
            .map_err(classify_transport)?;
        check_status(response)?;
        Ok(())
    }
}
