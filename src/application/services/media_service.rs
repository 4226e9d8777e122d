/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use crate::application::interfaces::media::MediaService;
use crate::application::services::base::ServiceBase;
use crate::error::ApiError;
use crate::model::payload::UploadFile;
use crate::model::responses::ApiResponse;
use crate::transport::dispatcher::RequestExecutor;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Implementation of the media service
#[derive(Debug, Clone)]
pub struct MediaServiceImpl {
    base: ServiceBase,
}

impl MediaServiceImpl {
    /// Resource path every call is rooted at
    pub const PATH: &'static str = "/media";

    /// Creates a new instance of the media service
    pub fn new(executor: Arc<dyn RequestExecutor>) -> Self {
        Self {
            base: ServiceBase::new(executor, Self::PATH),
        }
    }
}

#[async_trait]
impl MediaService for MediaServiceImpl {
    async fn upload(
        &self,
        file: UploadFile,
        field: Option<&str>,
        extra: Option<&BTreeMap<String, String>>,
    ) -> Result<ApiResponse<Value>, ApiError> {
        info!("Uploading {} ({} bytes)", file.file_name, file.bytes.len());
        self.base.upload_file("", file, field, extra, None).await
    }

    async fn upload_many(
        &self,
        files: Vec<UploadFile>,
        field: Option<&str>,
    ) -> Result<ApiResponse<Value>, ApiError> {
        info!("Uploading {} files", files.len());
        self.base.upload_files("batch", files, field, None).await
    }

    async fn download(&self, id: &str, filename: Option<&str>) -> Result<PathBuf, ApiError> {
        let path = self
            .base
            .download(&format!("{id}/download"), filename, None)
            .await?;
        debug!("Media {id} saved to {}", path.display());
        Ok(path)
    }
}
