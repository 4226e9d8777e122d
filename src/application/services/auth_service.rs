/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use crate::application::interfaces::auth::AuthService;
use crate::application::services::base::ServiceBase;
use crate::error::ApiError;
use crate::model::auth::{AuthTokenPair, AuthTokens, LoginRequest};
use crate::model::payload::Payload;
use crate::model::responses::ApiResponse;
use crate::transport::dispatcher::RequestExecutor;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Envelope keys servers wrap token material in
const TOKEN_ENVELOPES: [&str; 2] = ["data", "tokens"];

/// Implementation of the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceImpl {
    base: ServiceBase,
}

impl AuthServiceImpl {
    /// Resource path every call is rooted at
    pub const PATH: &'static str = "/auth";

    /// Creates a new instance of the auth service
    pub fn new(executor: Arc<dyn RequestExecutor>) -> Self {
        Self {
            base: ServiceBase::new(executor, Self::PATH),
        }
    }

    /// Stores the tokens carried by an auth response and returns the stored pair
    fn store_tokens(&self, body: &Value) -> Result<AuthTokenPair, ApiError> {
        let tokens = extract_tokens(body)
            .ok_or_else(|| ApiError::serialization("no access token in auth response"))?;
        let store = self.base.tokens();

        let ttl = tokens.expires_in.filter(|secs| *secs > 0).and_then(|secs| {
            let ttl = chrono::TimeDelta::try_seconds(secs);
            if ttl.is_none() {
                warn!("Ignoring out-of-range expires_in of {secs}s");
            }
            ttl
        });
        match ttl {
            Some(ttl) => store.set_access_token_with_ttl(&tokens.access_token, ttl)?,
            None => store.set_access_token(&tokens.access_token)?,
        }
        if let Some(refresh) = tokens.refresh_token.as_deref().filter(|t| !t.is_empty()) {
            store.set_refresh_token(refresh)?;
        }

        store
            .token_pair()
            .ok_or_else(|| ApiError::unauthenticated("issued token is already expired"))
    }
}

/// Finds token material at the top level or inside a known envelope
fn extract_tokens(body: &Value) -> Option<AuthTokens> {
    let from = |value: &Value| {
        serde_json::from_value::<AuthTokens>(value.clone())
            .ok()
            .filter(|tokens| !tokens.access_token.is_empty())
    };
    from(body).or_else(|| {
        TOKEN_ENVELOPES
            .iter()
            .filter_map(|key| body.get(key))
            .find_map(from)
    })
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn login(&self, credentials: &LoginRequest) -> Result<AuthTokenPair, ApiError> {
        info!("Logging in as {}", credentials.email);
        let response: ApiResponse<Value> = self.base.post("login", credentials, None).await?;
        let pair = self.store_tokens(&response.data)?;
        debug!("Access token valid until {}", pair.expires_at);
        Ok(pair)
    }

    async fn register(&self, registration: &Value) -> Result<AuthTokenPair, ApiError> {
        info!("Registering a new account");
        let response: ApiResponse<Value> = self.base.post("register", registration, None).await?;
        self.store_tokens(&response.data)
    }

    async fn refresh(&self) -> Result<AuthTokenPair, ApiError> {
        let refresh_token = self
            .base
            .tokens()
            .get_refresh_token()
            .ok_or_else(|| ApiError::unauthenticated("no refresh token stored"))?;
        debug!("Refreshing access token");
        let body = json!({ "refreshToken": refresh_token });
        let response: ApiResponse<Value> = self.base.post("refresh", &body, None).await?;
        self.store_tokens(&response.data)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        if let Err(e) = self
            .base
            .send(Method::POST, "logout", Payload::Empty, None)
            .await
        {
            warn!("Logout request failed, purging local state anyway: {e}");
        }
        self.base.tokens().purge_auth()
    }

    async fn session(&self) -> Result<ApiResponse<Value>, ApiError> {
        self.base.get("me", None).await
    }

    fn is_authenticated(&self) -> bool {
        self.base.tokens().get_access_token().is_some()
    }
}
