/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Per-request configuration and its merge rules
//!
//! A dispatch resolves its configuration in layers: instance defaults, then
//! the per-call overrides, then whatever the payload kind requires. Each layer
//! is a [`RequestConfig`] and [`RequestConfig::merge`] folds them together.

use crate::constants::{CONTENT_TYPE_JSON, DEFAULT_TIMEOUT, DEFAULT_WITH_CREDENTIALS};
use crate::error::ApiError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Headers, timeout and credentials policy for one request
///
/// Header names are stored lower-cased so that merging is case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Header name to value
    pub headers: BTreeMap<String, String>,
    /// Header names removed from the final set after merging
    pub omit_headers: Vec<String>,
    /// Time allowed for the whole call, including reading the body
    pub timeout: Option<Duration>,
    /// Whether stored session artifacts are sent along as cookies
    pub with_credentials: Option<bool>,
}

impl RequestConfig {
    /// Creates an empty override layer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Instance defaults: JSON content type, 30s timeout, credentials included
    #[must_use]
    pub fn defaults() -> Self {
        Self::new()
            .with_header(reqwest::header::CONTENT_TYPE.as_str(), CONTENT_TYPE_JSON)
            .with_timeout(DEFAULT_TIMEOUT)
            .with_credentials(DEFAULT_WITH_CREDENTIALS)
    }

    /// Sets a header, cancelling any earlier omission of the same name
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    /// Marks a header for removal from the final set
    #[must_use]
    pub fn without_header(mut self, name: &str) -> Self {
        self.omit_header(name);
        self
    }

    /// Sets the timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the timeout in milliseconds
    #[must_use]
    pub fn with_timeout_ms(self, millis: u64) -> Self {
        self.with_timeout(Duration::from_millis(millis))
    }

    /// Sets the credentials-inclusion flag
    #[must_use]
    pub fn with_credentials(mut self, include: bool) -> Self {
        self.with_credentials = Some(include);
        self
    }

    /// In-place variant of [`RequestConfig::with_header`]
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        let name = name.to_ascii_lowercase();
        self.omit_headers.retain(|omitted| *omitted != name);
        self.headers.insert(name, value.into());
    }

    /// In-place variant of [`RequestConfig::without_header`]
    pub fn omit_header(&mut self, name: &str) {
        let name = name.to_ascii_lowercase();
        self.headers.remove(&name);
        if !self.omit_headers.contains(&name) {
            self.omit_headers.push(name);
        }
    }

    /// Folds `overrides` on top of `self`
    ///
    /// Headers merge key by key with the override winning; names the override
    /// omits are dropped. Timeout and credentials are last-write-wins.
    #[must_use]
    pub fn merge(&self, overrides: &RequestConfig) -> RequestConfig {
        let mut merged = self.clone();
        for (name, value) in &overrides.headers {
            merged.set_header(name, value.clone());
        }
        for name in &overrides.omit_headers {
            merged.omit_header(name);
        }
        merged.timeout = overrides.timeout.or(self.timeout);
        merged.with_credentials = overrides.with_credentials.or(self.with_credentials);
        merged
    }

    /// Value of a header after omissions, looked up case-insensitively
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Effective timeout, falling back to the 30s default
    #[must_use]
    pub fn effective_timeout(&self) -> Duration {
        self.timeout.unwrap_or(DEFAULT_TIMEOUT)
    }

    /// Effective credentials flag, falling back to `true`
    #[must_use]
    pub fn includes_credentials(&self) -> bool {
        self.with_credentials.unwrap_or(DEFAULT_WITH_CREDENTIALS)
    }

    /// Builds the transport header map, validating names and values
    pub fn header_map(&self) -> Result<HeaderMap, ApiError> {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            if self.omit_headers.contains(name) {
                continue;
            }
            map.insert(
                HeaderName::from_bytes(name.as_bytes())?,
                HeaderValue::from_str(value)?,
            );
        }
        Ok(map)
    }
}
