//! Core data types shared by both stores.
//!
//! Field names on the wire follow the backend's JSON (`_id`, `createdAt`,
//! `updatedAt`); the local snapshot uses the same encoding so an entry reads
//! identically from either store.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::{LearnlogError, Result};

/// Prefix that marks an identifier as issued by the local store.
pub const LOCAL_ID_PREFIX: &str = "local-";

/// Which store owns an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Local,
    Remote,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Local => write!(f, "local"),
            Provenance::Remote => write!(f, "remote"),
        }
    }
}

/// Entry identifier, either remote-issued or `local-<uuid v7>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generate a fresh time-ordered local identifier.
    pub fn new_local() -> Self {
        Self(format!("{}{}", LOCAL_ID_PREFIX, Uuid::now_v7()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn provenance(&self) -> Provenance {
        if self.0.starts_with(LOCAL_ID_PREFIX) {
            Provenance::Local
        } else {
            Provenance::Remote
        }
    }

    pub fn is_local(&self) -> bool {
        self.provenance() == Provenance::Local
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A journal entry as stored by either backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = "_id")]
    pub id: EntryId,

    pub title: String,

    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(deserialize_with = "deserialize_date")]
    pub date: DateTime<Utc>,

    /// URL or `data:` URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entry {
    pub fn provenance(&self) -> Provenance {
        self.id.provenance()
    }

    /// Rebuild the editable fields of this entry as a draft.
    pub fn to_draft(&self) -> EntryDraft {
        EntryDraft {
            title: self.title.clone(),
            content: self.content.clone(),
            tags: self.tags.clone(),
            date: self.date,
            image: self.image.clone(),
        }
    }
}

/// Payload for creating or replacing an entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryDraft {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl EntryDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tags: Vec::new(),
            date,
            image: None,
        }
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Set tags from the comma separated form used by the entry form.
    pub fn with_tag_list(mut self, raw: &str) -> Self {
        self.tags = parse_tags(raw);
        self
    }

    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = image;
        self
    }

    /// Check the fields the backend schema requires.
    ///
    /// # Errors
    ///
    /// Returns `LearnlogError::Validation` if the title or content is blank,
    /// a tag is blank, or the image is neither an http(s) URL nor a data URI.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(LearnlogError::Validation("title is required".to_string()));
        }
        if self.content.trim().is_empty() {
            return Err(LearnlogError::Validation(
                "content is required".to_string(),
            ));
        }
        if self.tags.iter().any(|tag| tag.trim().is_empty()) {
            return Err(LearnlogError::Validation(
                "tags cannot be empty".to_string(),
            ));
        }
        if let Some(image) = &self.image {
            let ok = image.starts_with("http://")
                || image.starts_with("https://")
                || image.starts_with("data:");
            if !ok {
                return Err(LearnlogError::Validation(format!(
                    "image must be an http(s) URL or a data URI, got \"{}\"",
                    image
                )));
            }
        }
        Ok(())
    }
}

/// Split a comma separated tag string, trimming and dropping empty pieces.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

/// Parse an entry date (RFC 3339 or `YYYY-MM-DD`, midnight UTC).
pub fn parse_date(value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        let naive = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| LearnlogError::InvalidInput(format!("Invalid date value: {}", value)))?;
        return Ok(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc));
    }

    Err(LearnlogError::InvalidInput(format!(
        "Invalid date (expected ISO-8601 or YYYY-MM-DD): {}",
        value
    )))
}

fn deserialize_date<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(serde::de::Error::custom)
}

/// Sort newest first by entry date. Equal dates keep their relative order.
pub fn sort_by_date_desc(entries: &mut [Entry]) {
    entries.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Filter for browsing the in-memory entry list.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    /// Only entries carrying this tag (case-insensitive)
    pub tag: Option<String>,

    /// Start date (inclusive)
    pub since: Option<DateTime<Utc>>,

    /// End date (inclusive)
    pub until: Option<DateTime<Utc>>,

    /// Maximum number of results
    pub limit: Option<usize>,
}

impl EntryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn since(mut self, date: DateTime<Utc>) -> Self {
        self.since = Some(date);
        self
    }

    pub fn until(mut self, date: DateTime<Utc>) -> Self {
        self.until = Some(date);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        if let Some(tag) = &self.tag {
            if !entry.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
                return false;
            }
        }
        if let Some(since) = self.since {
            if entry.date < since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if entry.date > until {
                return false;
            }
        }
        true
    }

    /// Apply the filter to an already sorted list, preserving order.
    pub fn apply<'a>(&self, entries: &'a [Entry]) -> Vec<&'a Entry> {
        let matching = entries.iter().filter(|entry| self.matches(entry));
        match self.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, date: &str, tags: &[&str]) -> Entry {
        Entry {
            id: EntryId::new(id),
            title: format!("title {}", id),
            content: "body".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            date: parse_date(date).unwrap(),
            image: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_parse_tags_drops_empty_pieces() {
        assert_eq!(parse_tags(""), Vec::<String>::new());
        assert_eq!(parse_tags("  ,  ,"), Vec::<String>::new());
        assert_eq!(parse_tags("rust, tokio ,,serde"), vec!["rust", "tokio", "serde"]);
    }

    #[test]
    fn test_local_id_provenance() {
        let id = EntryId::new_local();
        assert!(id.as_str().starts_with(LOCAL_ID_PREFIX));
        assert_eq!(id.provenance(), Provenance::Local);
        assert_ne!(id, EntryId::new_local());

        let remote = EntryId::new("65a1f0c2e4b0a1b2c3d4e5f6");
        assert_eq!(remote.provenance(), Provenance::Remote);
    }

    #[test]
    fn test_entry_decodes_backend_document() {
        let json = r#"{
            "_id": "65a1f0c2e4b0a1b2c3d4e5f6",
            "title": "Borrow checker",
            "content": "Lifetimes finally clicked",
            "tags": ["rust"],
            "date": "2024-01-15T00:00:00.000Z",
            "createdAt": "2024-01-15T08:30:00.000Z",
            "updatedAt": "2024-01-15T08:30:00.000Z",
            "__v": 0
        }"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id.as_str(), "65a1f0c2e4b0a1b2c3d4e5f6");
        assert_eq!(entry.provenance(), Provenance::Remote);
        assert_eq!(entry.date, parse_date("2024-01-15").unwrap());
        assert!(entry.created_at.is_some());
        assert!(entry.image.is_none());
    }

    #[test]
    fn test_entry_accepts_plain_date() {
        let json = r#"{"_id":"local-1","title":"t","content":"c","tags":[],"date":"2024-03-01"}"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.date, parse_date("2024-03-01T00:00:00Z").unwrap());
    }

    #[test]
    fn test_draft_validation() {
        let date = parse_date("2024-01-01").unwrap();
        assert!(EntryDraft::new("A", "body", date).validate().is_ok());
        assert!(matches!(
            EntryDraft::new("  ", "body", date).validate(),
            Err(LearnlogError::Validation(_))
        ));
        assert!(matches!(
            EntryDraft::new("A", "", date).validate(),
            Err(LearnlogError::Validation(_))
        ));
        let bad_image = EntryDraft::new("A", "body", date).with_image(Some("C:/pic.png".into()));
        assert!(bad_image.validate().is_err());
        let data_uri = EntryDraft::new("A", "body", date)
            .with_image(Some("data:image/png;base64,AAAA".into()));
        assert!(data_uri.validate().is_ok());
    }

    #[test]
    fn test_draft_payload_omits_missing_image() {
        let draft = EntryDraft::new("A", "body", parse_date("2024-01-01").unwrap())
            .with_tag_list("x, y");
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["tags"], serde_json::json!(["x", "y"]));
        assert!(value.get("image").is_none());
        assert!(value.get("_id").is_none());
    }

    #[test]
    fn test_sort_by_date_desc_is_stable() {
        let mut entries = vec![
            entry("a", "2024-01-01", &[]),
            entry("b", "2024-03-01", &[]),
            entry("c", "2024-01-01", &[]),
        ];
        sort_by_date_desc(&mut entries);
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_filter_tag_range_and_limit() {
        let entries = vec![
            entry("a", "2024-03-01", &["Rust"]),
            entry("b", "2024-02-01", &["go"]),
            entry("c", "2024-01-01", &["rust"]),
        ];

        let by_tag = EntryFilter::new().tag("rust").apply(&entries);
        assert_eq!(by_tag.len(), 2);

        let since = EntryFilter::new()
            .since(parse_date("2024-02-01").unwrap())
            .apply(&entries);
        assert_eq!(since.len(), 2);

        let limited = EntryFilter::new().limit(1).apply(&entries);
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].id.as_str(), "a");
    }
}
