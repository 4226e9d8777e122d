use crate::application::services::base::ServiceBase;
use crate::error::ApiError;
use crate::model::payload::UploadFile;
use crate::model::responses::ApiResponse;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;

/// CRUD operations over one REST resource
///
/// Implementors only provide [`ResourceService::base`]; every verb delegates to
/// the shared dispatcher through it.
#[async_trait]
pub trait ResourceService: Send + Sync {
    /// Shared request plumbing rooted at the resource path
    fn base(&self) -> &ServiceBase;

    /// Lists the collection
    async fn list(&self) -> Result<ApiResponse<Value>, ApiError> {
        self.base().get("", None).await
    }

    /// Fetches one item
    async fn find(&self, id: &str) -> Result<ApiResponse<Value>, ApiError> {
        self.base().get(id, None).await
    }

    /// Creates an item
    async fn create(&self, body: &Value) -> Result<ApiResponse<Value>, ApiError> {
        self.base().post("", body, None).await
    }

    /// Replaces an item
    async fn update(&self, id: &str, body: &Value) -> Result<ApiResponse<Value>, ApiError> {
        self.base().put(id, body, None).await
    }

    /// Partially updates an item
    async fn patch(&self, id: &str, body: &Value) -> Result<ApiResponse<Value>, ApiError> {
        self.base().patch(id, body, None).await
    }

    /// Deletes an item
    async fn remove(&self, id: &str) -> Result<ApiResponse<Value>, ApiError> {
        self.base().delete(id, None).await
    }
}

/// Job postings
#[async_trait]
pub trait JobService: ResourceService {
    /// Applies to a job with a resume and optional cover fields
    async fn apply(
        &self,
        job_id: &str,
        resume: UploadFile,
        fields: Option<&BTreeMap<String, String>>,
    ) -> Result<ApiResponse<Value>, ApiError>;
}

/// User accounts
#[async_trait]
pub trait UserService: ResourceService {
    /// The user owning the stored access token
    async fn me(&self) -> Result<ApiResponse<Value>, ApiError>;
}

/// Public profiles
#[async_trait]
pub trait ProfileService: ResourceService {
    /// Replaces the profile picture of `profile_id`
    async fn upload_avatar(
        &self,
        profile_id: &str,
        image: UploadFile,
    ) -> Result<ApiResponse<Value>, ApiError>;
}
