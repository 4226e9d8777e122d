use crate::error::ApiError;
use crate::model::auth::{AuthTokenPair, LoginRequest};
use crate::model::responses::ApiResponse;
use async_trait::async_trait;
use serde_json::Value;

/// Interface for the authentication service
///
/// Login and registration are the only places tokens are created; logout is
/// the only place they are destroyed.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchanges credentials for tokens and stores them
    async fn login(&self, credentials: &LoginRequest) -> Result<AuthTokenPair, ApiError>;

    /// Creates an account and stores the tokens issued with it
    async fn register(&self, registration: &Value) -> Result<AuthTokenPair, ApiError>;

    /// Exchanges the stored refresh token for a new access token
    async fn refresh(&self) -> Result<AuthTokenPair, ApiError>;

    /// Notifies the server and purges every local auth artifact
    ///
    /// Local state is purged even when the server call fails.
    async fn logout(&self) -> Result<(), ApiError>;

    /// The authenticated user's session as reported by the server
    async fn session(&self) -> Result<ApiResponse<Value>, ApiError>;

    /// Returns true when an unexpired access token is stored
    fn is_authenticated(&self) -> bool;
}
