/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS, DEFAULT_WITH_CREDENTIALS, TOKEN_TTL_DAYS,
};
use crate::error::ApiError;
use crate::model::http::RequestConfig;
use crate::session::expiry::ExpiryPolicy;
use crate::session::store::AuthTokenStore;
use crate::utils::config::{get_env_or_default, get_env_or_none};
use dotenv::dotenv;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Main configuration for the portal API client
pub struct Config {
    /// REST API configuration
    pub rest_api: RestApiConfig,
    /// Token persistence and expiry
    pub auth: AuthConfig,
    /// Where downloads are saved
    pub download: DownloadConfig,
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Configuration for the REST API
pub struct RestApiConfig {
    /// Base URL every endpoint is joined to
    pub base_url: String,
    /// Default timeout in milliseconds for each request
    pub timeout_ms: u64,
    /// Whether stored session artifacts are sent as cookies by default
    pub with_credentials: bool,
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Configuration for the token store
pub struct AuthConfig {
    /// JSON file the tokens persist to; in-memory when `None`
    pub token_store_path: Option<String>,
    /// Local token lifetime in days
    pub token_ttl_days: i64,
    /// Use a JWT `exp` claim when present instead of the fixed lifetime
    pub expiry_from_claims: bool,
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Configuration for downloads
pub struct DownloadConfig {
    /// Directory downloaded files are written to
    pub dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Creates a configuration from the environment and an optional `.env` file
    ///
    /// | variable                      | default                      |
    /// |-------------------------------|------------------------------|
    /// | `PORTAL_API_BASE_URL`         | `http://localhost:8000/api`  |
    /// | `PORTAL_API_TIMEOUT_MS`       | `30000`                      |
    /// | `PORTAL_API_WITH_CREDENTIALS` | `true`                       |
    /// | `PORTAL_TOKEN_STORE_PATH`     | unset (in memory)            |
    /// | `PORTAL_TOKEN_TTL_DAYS`       | `7`                          |
    /// | `PORTAL_TOKEN_EXPIRY_CLAIMS`  | `false`                      |
    /// | `PORTAL_DOWNLOAD_DIR`         | `downloads`                  |
    pub fn new() -> Self {
        match dotenv() {
            Ok(_) => debug!("Successfully loaded .env file"),
            Err(e) => debug!("Failed to load .env file: {e}"),
        }

        let base_url = get_env_or_default("PORTAL_API_BASE_URL", String::from(DEFAULT_BASE_URL));
        let token_ttl_days = get_env_or_default("PORTAL_TOKEN_TTL_DAYS", TOKEN_TTL_DAYS);
        if token_ttl_days <= 0 {
            warn!("PORTAL_TOKEN_TTL_DAYS must be positive, got {token_ttl_days}");
        }

        Config {
            rest_api: RestApiConfig {
                base_url: normalize_base_url(&base_url),
                timeout_ms: get_env_or_default("PORTAL_API_TIMEOUT_MS", DEFAULT_TIMEOUT_MS),
                with_credentials: get_env_or_default(
                    "PORTAL_API_WITH_CREDENTIALS",
                    DEFAULT_WITH_CREDENTIALS,
                ),
            },
            auth: AuthConfig {
                token_store_path: get_env_or_none("PORTAL_TOKEN_STORE_PATH"),
                token_ttl_days: token_ttl_days.max(1),
                expiry_from_claims: get_env_or_default("PORTAL_TOKEN_EXPIRY_CLAIMS", false),
            },
            download: DownloadConfig {
                dir: get_env_or_default("PORTAL_DOWNLOAD_DIR", String::from("downloads")),
            },
        }
    }

    /// Environment configuration pointed at another base URL
    #[must_use]
    pub fn with_base_url(base_url: &str) -> Self {
        let mut config = Self::new();
        config.rest_api.base_url = normalize_base_url(base_url);
        config
    }

    /// Instance-level request defaults
    #[must_use]
    pub fn request_defaults(&self) -> RequestConfig {
        RequestConfig::defaults()
            .with_timeout(Duration::from_millis(self.rest_api.timeout_ms))
            .with_credentials(self.rest_api.with_credentials)
    }

    /// Local token expiry policy
    #[must_use]
    pub fn expiry_policy(&self) -> ExpiryPolicy {
        let window = chrono::TimeDelta::try_days(self.auth.token_ttl_days).unwrap_or_else(|| {
            warn!(
                "Token lifetime of {} days is out of range, using {TOKEN_TTL_DAYS}",
                self.auth.token_ttl_days
            );
            chrono::TimeDelta::days(TOKEN_TTL_DAYS)
        });
        if self.auth.expiry_from_claims {
            ExpiryPolicy::FromClaims { fallback: window }
        } else {
            ExpiryPolicy::Fixed(window)
        }
    }

    /// Builds the token store described by this configuration
    pub fn token_store(&self) -> Result<AuthTokenStore, ApiError> {
        let store = match &self.auth.token_store_path {
            Some(path) => AuthTokenStore::file(path)?,
            None => AuthTokenStore::in_memory(),
        };
        Ok(store.with_policy(self.expiry_policy()))
    }

    /// Download directory as a path
    #[must_use]
    pub fn download_dir(&self) -> PathBuf {
        PathBuf::from(&self.download.dir)
    }
}

/// Trims whitespace and any trailing slashes from a base URL
#[must_use]
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}
