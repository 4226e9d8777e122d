use crate::error::ApiError;
use crate::model::payload::UploadFile;
use crate::model::responses::ApiResponse;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Interface for media uploads and downloads
#[async_trait]
pub trait MediaService: Send + Sync {
    /// Uploads one file under `field` (default `"file"`) with optional scalar fields
    async fn upload(
        &self,
        file: UploadFile,
        field: Option<&str>,
        extra: Option<&BTreeMap<String, String>>,
    ) -> Result<ApiResponse<Value>, ApiError>;

    /// Uploads several files as `"<field>[<i>]"` parts
    async fn upload_many(
        &self,
        files: Vec<UploadFile>,
        field: Option<&str>,
    ) -> Result<ApiResponse<Value>, ApiError>;

    /// Saves media `id` into the download directory
    async fn download(&self, id: &str, filename: Option<&str>) -> Result<PathBuf, ApiError>;
}
