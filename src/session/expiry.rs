/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Local expiry policy for stored tokens
//!
//! Expiry only decides whether a lookup reports a token; it never deletes
//! anything from the store.

use crate::constants::TOKEN_TTL_DAYS;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use tracing::debug;

/// How the local expiry of a stored token is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryPolicy {
    /// Issuance time plus a fixed window
    Fixed(Duration),
    /// The token's own `exp` claim when it is a JWT, else issuance plus `fallback`
    FromClaims {
        /// Window used for opaque tokens or tokens without `exp`
        fallback: Duration,
    },
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self::Fixed(Duration::days(TOKEN_TTL_DAYS))
    }
}

impl ExpiryPolicy {
    /// Expiry of `token` stored at `now`
    #[must_use]
    pub fn expires_at(&self, token: &str, now: DateTime<Utc>) -> DateTime<Utc> {
        let after = |window: &Duration| {
            now.checked_add_signed(*window)
                .unwrap_or_else(|| now + Duration::days(TOKEN_TTL_DAYS))
        };
        match self {
            Self::Fixed(window) => after(window),
            Self::FromClaims { fallback } => jwt_expiry(token).unwrap_or_else(|| after(fallback)),
        }
    }
}

/// Reads the `exp` claim of a JWT without verifying its signature
#[must_use]
pub fn jwt_expiry(token: &str) -> Option<DateTime<Utc>> {
    let mut segments = token.split('.');
    let (_header, claims, _signature) = (segments.next()?, segments.next()?, segments.next()?);
    let decoded = URL_SAFE_NO_PAD.decode(claims.trim_end_matches('=')).ok()?;
    let claims: Value = serde_json::from_slice(&decoded).ok()?;
    let exp = claims.get("exp")?.as_i64()?;
    let expiry = DateTime::from_timestamp(exp, 0);
    if expiry.is_none() {
        debug!("Ignoring out-of-range exp claim {}", exp);
    }
    expiry
}
