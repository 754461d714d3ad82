//! Shared plumbing for the blocking HTTP clients.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{LearnlogError, Result};

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

pub(crate) fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .user_agent(concat!("learnlog/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| LearnlogError::Other(format!("Failed to build HTTP client: {}", e)))
}

/// Strip trailing slashes so paths can be appended with `/api/...`.
pub(crate) fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Map a transport-level failure onto the connectivity taxonomy.
pub(crate) fn classify_transport(err: reqwest::Error) -> LearnlogError {
    if err.is_timeout() {
        LearnlogError::Timeout(err.to_string())
    } else if err.is_decode() {
        LearnlogError::Server(format!("Malformed response: {}", err))
    } else {
        LearnlogError::Network(err.to_string())
    }
}

/// Turn a non-2xx response into the matching error variant.
pub(crate) fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    let message = error_message(status, &body);

    Err(match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            LearnlogError::Validation(message)
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LearnlogError::Unauthorized(message),
        StatusCode::NOT_FOUND => LearnlogError::NotFound(message),
        _ => LearnlogError::Server(message),
    })
}

/// Decode a JSON body. Undecodable bodies count as a server failure.
pub(crate) fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text().map_err(classify_transport)?;
    serde_json::from_str(&body)
        .map_err(|e| LearnlogError::Server(format!("Malformed response: {}", e)))
}

fn error_message(status: StatusCode, body: &str) -> String {
    let parsed = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .filter(|m| !m.trim().is_empty());

    match parsed {
        Some(message) => message,
        None if !body.trim().is_empty() && body.len() <= 200 => {
            format!("HTTP {}: {}", status.as_u16(), body.trim())
        }
        None => format!("HTTP {}", status.as_u16()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("http://host:5000/"), "http://host:5000");
        assert_eq!(normalize_base_url(" http://host "), "http://host");
    }

    #[test]
    fn test_error_message_prefers_backend_message() {
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, r#"{"message":"Title is required"}"#),
            "Title is required"
        );
        assert_eq!(
            error_message(StatusCode::UNAUTHORIZED, r#"{"error":"Invalid token"}"#),
            "Invalid token"
        );
        assert_eq!(error_message(StatusCode::INTERNAL_SERVER_ERROR, ""), "HTTP 500");
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "upstream down"),
            "HTTP 502: upstream down"
        );
    }
}
