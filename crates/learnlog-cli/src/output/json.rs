//! JSON output formatting for entries.

use serde::Serialize;

use learnlog_core::store::Entry;

/// Convert an entry to JSON for output.
pub fn entry_json(entry: &Entry) -> serde_json::Value {
    serde_json::json!({
        "id": entry.id,
        "provenance": entry.provenance().to_string(),
        "title": entry.title,
        "content": entry.content,
        "tags": entry.tags,
        "date": entry.date,
        "image": entry.image,
        "created_at": entry.created_at,
        "updated_at": entry.updated_at,
    })
}

/// Convert multiple entries to a JSON array for output.
pub fn entries_json(entries: &[&Entry]) -> Vec<serde_json::Value> {
    entries.iter().map(|entry| entry_json(entry)).collect()
}

/// Pretty-print any serializable value to stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use learnlog_core::store::EntryId;

    fn entry(id: &str) -> Entry {
        Entry {
            id: EntryId::new(id),
            title: "Borrowing".to_string(),
            content: "Shared xor mutable".to_string(),
            tags: vec!["rust".to_string()],
            date: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            image: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_entry_json_marks_provenance() {
        let remote = entry_json(&entry("65f1c0ffee"));
        assert_eq!(remote["id"], "65f1c0ffee");
        assert_eq!(remote["provenance"], "remote");
        assert_eq!(remote["date"], "2024-03-01T00:00:00Z");
        assert!(remote["image"].is_null());

        let local = entry_json(&entry("local-0191"));
        assert_eq!(local["provenance"], "local");
    }
}
