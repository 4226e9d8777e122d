/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Normalized error type for every dispatched request
//!
//! All transport, HTTP and serialization failures leave the dispatcher as an
//! [`ApiError`]. The mapping table is:
//!
//! | failure                         | kind            | message                    | status   |
//! |---------------------------------|-----------------|----------------------------|----------|
//! | timer fired before the response | `Timeout`       | `Request timeout`          | 408      |
//! | connectivity failure            | `Network`       | `Network error`            | 0        |
//! | non-success response            | `Http`          | `HTTP {status}: {text}`    | status   |
//! | caller cancelled the call       | `Cancelled`     | `Request cancelled`        | none     |
//! | malformed JSON either direction | `Serialization` | `Serialization error: ..`  | none     |

use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Classification of a normalized failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ApiErrorKind {
    /// The per-call timer elapsed before the response settled
    Timeout,
    /// The transport could not reach the server
    Network,
    /// The server answered with a non-success status
    Http,
    /// The caller cancelled the call through its cancellation token
    Cancelled,
    /// A request or response body could not be (de)serialized
    Serialization,
    /// Invalid client configuration (URL, header name or value)
    Config,
    /// Local file system failure (downloads, file-backed token store)
    Io,
    /// An operation needed stored credentials that are absent
    Unauthenticated,
}

/// Uniform error shape returned by the dispatcher
#[derive(Debug, Clone, Error, Serialize)]
#[error("{message}")]
pub struct ApiError {
    /// Failure classification
    pub kind: ApiErrorKind,
    /// Human readable message
    pub message: String,
    /// HTTP-like status code, when one applies
    pub status: Option<u16>,
    /// Decoded body of a failed response, when one could be read
    pub data: Option<Value>,
}

impl ApiError {
    fn new(kind: ApiErrorKind, message: impl Into<String>, status: Option<u16>) -> Self {
        Self {
            kind,
            message: message.into(),
            status,
            data: None,
        }
    }

    /// The timer fired first
    #[must_use]
    pub fn timeout() -> Self {
        Self::new(
            ApiErrorKind::Timeout,
            "Request timeout",
            Some(StatusCode::REQUEST_TIMEOUT.as_u16()),
        )
    }

    /// The transport failed to connect or the connection dropped
    #[must_use]
    pub fn network() -> Self {
        Self::new(ApiErrorKind::Network, "Network error", Some(0))
    }

    /// A non-success response, carrying the decoded failure body if any
    #[must_use]
    pub fn http(status: StatusCode, data: Option<Value>) -> Self {
        let status_text = status.canonical_reason().unwrap_or("");
        Self {
            kind: ApiErrorKind::Http,
            message: format!("HTTP {}: {}", status.as_u16(), status_text),
            status: Some(status.as_u16()),
            data,
        }
    }

    /// The caller cancelled the call before it settled
    #[must_use]
    pub fn cancelled() -> Self {
        Self::new(ApiErrorKind::Cancelled, "Request cancelled", None)
    }

    /// A body could not be encoded or decoded
    pub fn serialization(detail: impl std::fmt::Display) -> Self {
        Self::new(
            ApiErrorKind::Serialization,
            format!("Serialization error: {detail}"),
            None,
        )
    }

    /// Invalid client configuration
    pub fn config(detail: impl std::fmt::Display) -> Self {
        Self::new(
            ApiErrorKind::Config,
            format!("Configuration error: {detail}"),
            None,
        )
    }

    /// A credential-dependent operation found no stored token
    pub fn unauthenticated(detail: impl std::fmt::Display) -> Self {
        Self::new(
            ApiErrorKind::Unauthenticated,
            format!("Not authenticated: {detail}"),
            None,
        )
    }

    /// Returns true when the call timed out
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        self.kind == ApiErrorKind::Timeout
    }

    /// Returns true when the server answered with the given status
    #[must_use]
    pub fn has_status(&self, status: StatusCode) -> bool {
        self.status == Some(status.as_u16())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout()
        } else if err.is_decode() {
            Self::serialization(err)
        } else if err.is_builder() {
            Self::config(err)
        } else if let Some(status) = err.status() {
            Self::http(status, None)
        } else {
            debug!("Transport failure: {err}");
            Self::network()
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err)
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        Self::new(ApiErrorKind::Io, format!("I/O error: {err}"), None)
    }
}

impl From<reqwest::header::InvalidHeaderName> for ApiError {
    fn from(err: reqwest::header::InvalidHeaderName) -> Self {
        Self::config(err)
    }
}

impl From<reqwest::header::InvalidHeaderValue> for ApiError {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        Self::config(err)
    }
}
