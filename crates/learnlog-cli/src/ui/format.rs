//! String formatting utilities for UI rendering.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Truncate a string to max length, adding ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let truncated: String = s.chars().take(max_len - 3).collect();
    format!("{}...", truncated)
}

/// Wrap text to a given width, preserving newlines.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        for word in paragraph.split_whitespace() {
            if current_line.is_empty() {
                current_line = word.to_string();
            } else if current_line.chars().count() + 1 + word.chars().count() <= width {
                current_line.push(' ');
                current_line.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current_line));
                current_line = word.to_string();
            }
        }
        if !current_line.is_empty() {
            lines.push(current_line);
        }
    }

    lines
}

/// Replace newlines with spaces for single-line output.
pub fn single_line(s: &str) -> String {
    s.replace('\n', " ").replace('\r', "")
}

/// Entry dates are calendar days stored at midnight UTC.
pub fn format_entry_date(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d").to_string()
}

/// Format a timestamp for display.
///
/// Pretty output uses the configured timezone; plain output stays RFC 3339 UTC.
pub fn format_timestamp(dt: &DateTime<Utc>, timezone: Option<Tz>, pretty: bool) -> String {
    if !pretty {
        return dt.to_rfc3339();
    }
    match timezone {
        Some(tz) => dt.with_timezone(&tz).format("%Y-%m-%d %H:%M %Z").to_string(),
        None => dt.format("%Y-%m-%d %H:%M UTC").to_string(),
    }
}

/// Describe a data URI without dumping its payload.
pub fn describe_image(image: &str) -> String {
    match image.strip_prefix("data:") {
        Some(rest) => {
            let mime = rest.split(';').next().unwrap_or("unknown");
            format!("embedded {} ({} bytes encoded)", mime, image.len())
        }
        None => image.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello", 5), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("hello", 2), "he");
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("hello world foo bar", 10), vec!["hello", "world foo", "bar"]);
        assert_eq!(wrap("hello\n\nworld", 20), vec!["hello", "", "world"]);
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("hello\r\nworld"), "hello world");
    }

    #[test]
    fn test_format_timestamp() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap();
        assert_eq!(format_timestamp(&dt, None, true), "2024-01-15 08:30 UTC");
        assert_eq!(format_timestamp(&dt, None, false), "2024-01-15T08:30:00+00:00");
        assert_eq!(
            format_timestamp(&dt, Some(chrono_tz::Asia::Tokyo), true),
            "2024-01-15 17:30 JST"
        );
        assert_eq!(format_entry_date(&dt), "2024-01-15");
    }

    #[test]
    fn test_describe_image() {
        assert_eq!(
            describe_image("https://example.com/a.png"),
            "https://example.com/a.png"
        );
        let described = describe_image("data:image/png;base64,AAAA");
        assert!(described.starts_with("embedded image/png"));
    }
}
