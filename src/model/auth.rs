/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use chrono::{DateTime, Utc};
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};

/// Access and refresh token as held by the token store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokenPair {
    /// Bearer token attached to requests
    pub access_token: String,
    /// Token exchanged for a new access token
    pub refresh_token: Option<String>,
    /// When the pair was stored
    pub issued_at: DateTime<Utc>,
    /// Local expiry of the access token
    pub expires_at: DateTime<Utc>,
}

impl AuthTokenPair {
    /// Returns true once the local expiry has passed
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Credentials posted to the login endpoint
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// Account e-mail
    pub email: String,
    /// Account password
    pub password: String,
}

impl LoginRequest {
    /// Creates login credentials
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Token material returned by login, registration and refresh
///
/// Servers disagree on field names, so the common spellings are accepted.
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthTokens {
    /// Access token
    #[serde(alias = "token", alias = "accessToken")]
    pub access_token: String,
    /// Refresh token, if the server issued one
    #[serde(default, alias = "refreshToken")]
    pub refresh_token: Option<String>,
    /// Server-declared lifetime in seconds
    #[serde(default, alias = "expiresIn")]
    pub expires_in: Option<i64>,
}
