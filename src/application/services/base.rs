/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use crate::error::ApiError;
use crate::model::http::RequestConfig;
use crate::model::payload::{Payload, UploadFile};
use crate::model::requests::ApiRequest;
use crate::model::responses::{ApiResponse, ResponseBody};
use crate::session::store::AuthTokenStore;
use crate::transport::codec::{multi_file_form, single_file_form};
use crate::transport::dispatcher::RequestExecutor;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Typed verb helpers rooted at one resource path
///
/// Every concrete service owns one of these; it knows nothing about the
/// resource beyond its path and forwards each call to the executor.
#[derive(Clone)]
pub struct ServiceBase {
    executor: Arc<dyn RequestExecutor>,
    base_path: String,
}

impl ServiceBase {
    /// Creates helpers for `base_path`, normalized to one leading slash
    pub fn new(executor: Arc<dyn RequestExecutor>, base_path: &str) -> Self {
        let trimmed = base_path.trim().trim_matches('/');
        Self {
            executor,
            base_path: format!("/{trimmed}"),
        }
    }

    /// The executor every call goes through
    #[must_use]
    pub fn executor(&self) -> &Arc<dyn RequestExecutor> {
        &self.executor
    }

    /// Token store shared with the executor
    #[must_use]
    pub fn tokens(&self) -> &AuthTokenStore {
        self.executor.token_store()
    }

    /// Resource path, e.g. `/jobs`
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Endpoint for `suffix` below the resource path
    #[must_use]
    pub fn path(&self, suffix: &str) -> String {
        let suffix = suffix.trim().trim_start_matches('/');
        match (self.base_path.as_str(), suffix) {
            (base, "") => base.to_string(),
            ("/", suffix) => format!("/{suffix}"),
            (base, suffix) => format!("{base}/{suffix}"),
        }
    }

    /// Dispatches a raw request below the resource path
    pub async fn send(
        &self,
        method: Method,
        suffix: &str,
        payload: Payload,
        config: Option<RequestConfig>,
    ) -> Result<ApiResponse<ResponseBody>, ApiError> {
        self.executor
            .execute(
                ApiRequest::new(method, self.path(suffix))
                    .with_payload(payload)
                    .with_config(config),
            )
            .await
    }

    /// GET and deserialize
    pub async fn get<T: DeserializeOwned>(
        &self,
        suffix: &str,
        config: Option<RequestConfig>,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.send(Method::GET, suffix, Payload::Empty, config)
            .await?
            .into_typed()
    }

    /// POST a JSON body and deserialize
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        suffix: &str,
        body: &B,
        config: Option<RequestConfig>,
    ) -> Result<ApiResponse<T>, ApiError> {
        let payload = Payload::json(body)?;
        self.send(Method::POST, suffix, payload, config)
            .await?
            .into_typed()
    }

    /// PUT a JSON body and deserialize
    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        suffix: &str,
        body: &B,
        config: Option<RequestConfig>,
    ) -> Result<ApiResponse<T>, ApiError> {
        let payload = Payload::json(body)?;
        self.send(Method::PUT, suffix, payload, config)
            .await?
            .into_typed()
    }

    /// PATCH a JSON body and deserialize
    pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        suffix: &str,
        body: &B,
        config: Option<RequestConfig>,
    ) -> Result<ApiResponse<T>, ApiError> {
        let payload = Payload::json(body)?;
        self.send(Method::PATCH, suffix, payload, config)
            .await?
            .into_typed()
    }

    /// DELETE and deserialize
    pub async fn delete<T: DeserializeOwned>(
        &self,
        suffix: &str,
        config: Option<RequestConfig>,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.send(Method::DELETE, suffix, Payload::Empty, config)
            .await?
            .into_typed()
    }

    /// POST one file as multipart, with optional scalar fields in the same body
    pub async fn upload_file<T: DeserializeOwned>(
        &self,
        suffix: &str,
        file: UploadFile,
        field: Option<&str>,
        extra: Option<&BTreeMap<String, String>>,
        config: Option<RequestConfig>,
    ) -> Result<ApiResponse<T>, ApiError> {
        let form = single_file_form(field, file, extra);
        self.send(Method::POST, suffix, Payload::Multipart(form), config)
            .await?
            .into_typed()
    }

    /// POST several files as multipart `"<field>[<i>]"` parts
    pub async fn upload_files<T: DeserializeOwned>(
        &self,
        suffix: &str,
        files: Vec<UploadFile>,
        field: Option<&str>,
        config: Option<RequestConfig>,
    ) -> Result<ApiResponse<T>, ApiError> {
        let form = multi_file_form(field, files);
        self.send(Method::POST, suffix, Payload::Multipart(form), config)
            .await?
            .into_typed()
    }

    /// Saves a binary resource into the download directory
    pub async fn download(
        &self,
        suffix: &str,
        filename: Option<&str>,
        config: Option<RequestConfig>,
    ) -> Result<PathBuf, ApiError> {
        self.executor
            .download(&self.path(suffix), filename, config)
            .await
    }
}

impl std::fmt::Debug for ServiceBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceBase")
            .field("executor", &"RequestExecutor")
            .field("base_path", &self.base_path)
            .finish()
    }
}
