/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Token store for access/refresh tokens and external session artifacts
//!
//! Tokens are created on login or registration, replaced only by explicit set
//! calls and destroyed only by [`AuthTokenStore::purge_auth`]. The dispatcher
//! looks the access token up on every call, so a long-lived client never
//! sends a stale credential.

use crate::constants::{ACCESS_TOKEN_KEY, EXTERNAL_SESSION_KEYS, REFRESH_TOKEN_KEY};
use crate::error::ApiError;
use crate::model::auth::AuthTokenPair;
use crate::session::expiry::ExpiryPolicy;
use chrono::{DateTime, Duration, Utc};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One stored value with its local expiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
    /// Token or artifact value
    pub value: String,
    /// When the value was stored
    pub issued_at: DateTime<Utc>,
    /// When lookups stop reporting the value
    pub expires_at: DateTime<Utc>,
}

impl StoredToken {
    /// Returns true once the local expiry has passed
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Persistence backend behind [`AuthTokenStore`]
pub trait TokenBackend: Send + Sync + Debug {
    /// Raw lookup, expired entries included
    fn get(&self, key: &str) -> Option<StoredToken>;

    /// Inserts or replaces one entry
    fn set(&self, key: &str, token: StoredToken) -> Result<(), ApiError>;

    /// Removes all listed keys in one step; missing keys are ignored
    fn remove_all(&self, keys: &[&str]) -> Result<(), ApiError>;

    /// Snapshot of all entries
    fn entries(&self) -> Vec<(String, StoredToken)>;
}

/// Process-local backend
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<BTreeMap<String, StoredToken>>,
}

impl TokenBackend for MemoryBackend {
    fn get(&self, key: &str) -> Option<StoredToken> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, token: StoredToken) -> Result<(), ApiError> {
        self.entries.write().insert(key.to_string(), token);
        Ok(())
    }

    fn remove_all(&self, keys: &[&str]) -> Result<(), ApiError> {
        let mut entries = self.entries.write();
        for key in keys {
            entries.remove(*key);
        }
        Ok(())
    }

    fn entries(&self) -> Vec<(String, StoredToken)> {
        self.entries
            .read()
            .iter()
            .map(|(key, token)| (key.clone(), token.clone()))
            .collect()
    }
}

/// JSON file backend surviving process restarts
///
/// Every mutation rewrites the whole file through a temporary file in the same
/// directory followed by a rename, so readers never observe a partial write.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, StoredToken>>,
}

impl FileBackend {
    /// Opens the store at `path`, starting empty when the file does not exist
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ApiError> {
        let path = path.into();
        let entries = match std::fs::read(&path) {
            Ok(raw) if raw.is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_slice(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!("Opened token file {} with {} entries", path.display(), entries.len());
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Location of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, StoredToken>) -> Result<(), ApiError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&serde_json::to_vec_pretty(entries)?)?;
        tmp.persist(&self.path).map_err(|e| ApiError::from(e.error))?;
        Ok(())
    }
}

impl TokenBackend for FileBackend {
    fn get(&self, key: &str) -> Option<StoredToken> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, token: StoredToken) -> Result<(), ApiError> {
        let mut entries = self.entries.lock();
        let mut next = entries.clone();
        next.insert(key.to_string(), token);
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }

    fn remove_all(&self, keys: &[&str]) -> Result<(), ApiError> {
        let mut entries = self.entries.lock();
        if !keys.iter().any(|key| entries.contains_key(*key)) {
            return Ok(());
        }
        let mut next = entries.clone();
        for key in keys {
            next.remove(*key);
        }
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }

    fn entries(&self) -> Vec<(String, StoredToken)> {
        self.entries
            .lock()
            .iter()
            .map(|(key, token)| (key.clone(), token.clone()))
            .collect()
    }
}

/// Access/refresh token store with a local expiry policy
#[derive(Debug, Clone)]
pub struct AuthTokenStore {
    backend: Arc<dyn TokenBackend>,
    policy: ExpiryPolicy,
}

impl Default for AuthTokenStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl AuthTokenStore {
    /// Store over any backend
    pub fn new(backend: Arc<dyn TokenBackend>, policy: ExpiryPolicy) -> Self {
        Self { backend, policy }
    }

    /// In-memory store with the default 7-day policy
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::default()), ExpiryPolicy::default())
    }

    /// File-backed store with the default 7-day policy
    pub fn file(path: impl Into<PathBuf>) -> Result<Self, ApiError> {
        Ok(Self::new(
            Arc::new(FileBackend::open(path)?),
            ExpiryPolicy::default(),
        ))
    }

    /// Replaces the expiry policy
    #[must_use]
    pub fn with_policy(mut self, policy: ExpiryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Active expiry policy
    #[must_use]
    pub fn policy(&self) -> ExpiryPolicy {
        self.policy
    }

    fn store(
        &self,
        key: &str,
        value: &str,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<(), ApiError> {
        self.backend.set(
            key,
            StoredToken {
                value: value.to_string(),
                issued_at,
                expires_at,
            },
        )
    }

    fn store_with_policy(&self, key: &str, value: &str) -> Result<(), ApiError> {
        let now = Utc::now();
        self.store(key, value, now, self.policy.expires_at(value, now))
    }

    fn lookup(&self, key: &str) -> Option<String> {
        self.backend
            .get(key)
            .filter(|token| !token.is_expired() && !token.value.is_empty())
            .map(|token| token.value)
    }

    /// Stores the access token with expiry per policy
    pub fn set_access_token(&self, token: &str) -> Result<(), ApiError> {
        self.store_with_policy(ACCESS_TOKEN_KEY, token)
    }

    /// Stores the access token with a server-supplied lifetime
    ///
    /// A lifetime that does not fit the calendar falls back to the policy.
    pub fn set_access_token_with_ttl(&self, token: &str, ttl: Duration) -> Result<(), ApiError> {
        let now = Utc::now();
        let expires_at = match now.checked_add_signed(ttl) {
            Some(expires_at) => expires_at,
            None => {
                warn!("Token lifetime of {}s is out of range, using policy expiry", ttl.num_seconds());
                self.policy.expires_at(token, now)
            }
        };
        self.store(ACCESS_TOKEN_KEY, token, now, expires_at)
    }

    /// Stores the refresh token with expiry per policy
    pub fn set_refresh_token(&self, token: &str) -> Result<(), ApiError> {
        self.store_with_policy(REFRESH_TOKEN_KEY, token)
    }

    /// Stores an artifact owned by the external auth middleware
    pub fn set_session_artifact(&self, name: &str, value: &str) -> Result<(), ApiError> {
        self.store_with_policy(name, value)
    }

    /// Current access token, `None` when absent, empty or expired
    #[must_use]
    pub fn get_access_token(&self) -> Option<String> {
        self.lookup(ACCESS_TOKEN_KEY)
    }

    /// Current refresh token, `None` when absent, empty or expired
    #[must_use]
    pub fn get_refresh_token(&self) -> Option<String> {
        self.lookup(REFRESH_TOKEN_KEY)
    }

    /// Both tokens with their metadata, if an unexpired access token exists
    #[must_use]
    pub fn token_pair(&self) -> Option<AuthTokenPair> {
        let access = self
            .backend
            .get(ACCESS_TOKEN_KEY)
            .filter(|token| !token.is_expired())?;
        Some(AuthTokenPair {
            access_token: access.value,
            refresh_token: self.get_refresh_token(),
            issued_at: access.issued_at,
            expires_at: access.expires_at,
        })
    }

    /// Drops only the access token, keeping the refresh token and artifacts
    pub fn clear_access_token(&self) -> Result<(), ApiError> {
        self.backend.remove_all(&[ACCESS_TOKEN_KEY])
    }

    /// Removes the tokens and every external session artifact in one step
    ///
    /// Safe to call when nothing is stored.
    pub fn purge_auth(&self) -> Result<(), ApiError> {
        let mut keys = vec![ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY];
        keys.extend(EXTERNAL_SESSION_KEYS);
        self.backend.remove_all(&keys)?;
        info!("Auth state purged");
        Ok(())
    }

    /// Unexpired artifacts rendered as a `cookie` header value
    #[must_use]
    pub fn cookie_header(&self) -> Option<String> {
        let cookies: Vec<String> = self
            .backend
            .entries()
            .into_iter()
            .filter(|(_, token)| !token.is_expired() && !token.value.is_empty())
            .map(|(key, token)| format!("{key}={}", token.value))
            .collect();
        if cookies.is_empty() {
            None
        } else {
            Some(cookies.join("; "))
        }
    }
}
