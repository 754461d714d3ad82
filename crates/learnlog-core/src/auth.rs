//! Login and registration against the backend's `/api/auth` endpoints.
//!
//! The backend issues the token; this module only posts credentials and
//! decodes the `{token, user}` response. Persisting the result is the job of
//! [`crate::session::SessionStore`].

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LearnlogError, Result};
use crate::http::{build_client, check_status, classify_transport, decode_json, normalize_base_url};

/// Cached profile of the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub email: String,
}

/// Successful login or registration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

/// Client for the authentication endpoints.
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
}

impl AuthClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: normalize_base_url(base_url),
        })
    }

    /// Exchange email and password for a session token.
    ///
    /// # Errors
    ///
    /// `Unauthorized` or `Validation` carry the backend's message for bad
    /// credentials; connectivity failures map to `Network`/`Timeout`/`Server`.
    pub fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        require("email", email)?;
        require("password", password)?;
        let body = LoginRequest { email, password };
        self.post("login", &body)
    }

    /// Create an account and return its first session token.
    pub fn register(&self, username: &str, email: &str, password: &str) -> Result<AuthResponse> {
        require("username", username)?;
        require("email", email)?;
        require("password", password)?;
        let body = RegisterRequest {
            username,
            email,
            password,
        };
        self.post("register", &body)
    }

    fn post<B: Serialize>(&self, action: &str, body: &B) -> Result<AuthResponse> {
        let url = format!("{}/api/auth/{}", self.base_url, action);
        debug!(%url, "POST auth");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .map_err(classify_transport)?;
        decode_json(check_status(response)?)
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LearnlogError::Validation(format!("{} is required", field)));
    }
    Ok(())
}
