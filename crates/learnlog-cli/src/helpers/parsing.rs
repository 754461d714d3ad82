//! Parsing helpers for dates, tags, timezones, and output format.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use learnlog_core::store::{parse_date, parse_tags};

use crate::errors::CliError;

/// Parse a date argument (YYYY-MM-DD or ISO-8601), naming the flag on failure.
pub fn parse_date_arg(flag: &str, value: &str) -> anyhow::Result<DateTime<Utc>> {
    parse_date(value).map_err(|_| {
        CliError::invalid_input(format!(
            "Invalid {} (expected YYYY-MM-DD or ISO-8601): {}",
            flag, value
        ))
        .into()
    })
}

/// Parse an inclusive upper bound. A bare date covers that whole day.
pub fn parse_until_arg(flag: &str, value: &str) -> anyhow::Result<DateTime<Utc>> {
    match NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
        Ok(day) => day
            .and_hms_nano_opt(23, 59, 59, 999_999_999)
            .map(|end| end.and_utc())
            .ok_or_else(|| CliError::invalid_input(format!("Invalid {}: {}", flag, value)).into()),
        Err(_) => parse_date_arg(flag, value),
    }
}

/// Flatten repeated `--tag` values, splitting on commas and dropping duplicates.
pub fn collect_tags(values: &[String]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for value in values {
        for tag in parse_tags(value) {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
    }
    tags
}

/// Parse an IANA timezone name. Empty or `auto` means UTC display.
pub fn parse_timezone(value: &str) -> anyhow::Result<Option<Tz>> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("auto") {
        return Ok(None);
    }

    trimmed
        .parse::<Tz>()
        .map(Some)
        .map_err(|_| CliError::invalid_input(format!("Invalid timezone: {}", trimmed)).into())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Plain,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Plain => "plain",
        }
    }
}

/// Parse output format string.
pub fn parse_output_format(value: Option<&str>) -> anyhow::Result<Option<OutputFormat>> {
    match value {
        None => Ok(None),
        Some("table") => Ok(Some(OutputFormat::Table)),
        Some("plain") => Ok(Some(OutputFormat::Plain)),
        Some(other) => Err(CliError::invalid_input(format!(
            "Unsupported format: {} (use table or plain)",
            other
        ))
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_tags_splits_and_dedups() {
        let values = vec!["rust, cli".to_string(), "rust".to_string(), " ".to_string()];
        assert_eq!(collect_tags(&values), vec!["rust", "cli"]);
    }

    #[test]
    fn test_parse_date_arg_names_the_flag() {
        let err = parse_date_arg("--since", "yesterday").unwrap_err();
        assert!(err.to_string().contains("--since"));
        assert!(parse_date_arg("--date", "2024-03-01").is_ok());
    }

    #[test]
    fn test_until_date_covers_whole_day() {
        let end = parse_until_arg("--until", "2024-03-01").expect("date");
        assert_eq!(end.to_rfc3339(), "2024-03-01T23:59:59.999999999+00:00");
        assert!(parse_date_arg("--date", "2024-03-01T18:30:00Z").expect("ts") <= end);

        let exact = parse_until_arg("--until", "2024-03-01T12:00:00Z").expect("ts");
        assert_eq!(exact.to_rfc3339(), "2024-03-01T12:00:00+00:00");
        assert!(parse_until_arg("--until", "tomorrow").is_err());
    }

    #[test]
    fn test_parse_timezone() {
        assert_eq!(parse_timezone("auto").expect("auto"), None);
        assert_eq!(
            parse_timezone("Europe/Berlin").expect("berlin"),
            Some(chrono_tz::Europe::Berlin)
        );
        assert!(parse_timezone("Mars/Olympus").is_err());
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format(None).expect("none"), None);
        assert_eq!(
            parse_output_format(Some("plain")).expect("plain"),
            Some(OutputFormat::Plain)
        );
        assert!(parse_output_format(Some("csv")).is_err());
    }
}
