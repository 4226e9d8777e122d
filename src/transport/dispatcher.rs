/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Request dispatcher
//!
//! [`RequestDispatcher`] is the single place a network call happens. One
//! dispatch:
//!
//! 1. joins the base URL and the endpoint with exactly one slash
//! 2. merges the instance defaults with the per-call overrides
//! 3. reads the access token from the token store at call time
//! 4. encodes the payload, which may adjust the headers
//! 5. races the transport against the timeout and the call's cancellation token
//! 6. decodes the response or normalizes the failure
//!
//! Calls share the base URL, the defaults and the token store, but each call
//! owns its own cancellation token and timer. Nothing is retried.

use crate::application::config::{Config, normalize_base_url};
use crate::constants::{CONTENT_TYPE_OCTET_STREAM, USER_AGENT};
use crate::error::ApiError;
use crate::model::http::RequestConfig;
use crate::model::payload::Payload;
use crate::model::requests::ApiRequest;
use crate::model::responses::{ApiResponse, ResponseBody};
use crate::session::store::AuthTokenStore;
use crate::transport::codec;
use crate::transport::download::save_blob;
use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::RwLock;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, COOKIE, HeaderMap};
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Execution interface the domain services depend on
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    /// Performs one dispatch
    ///
    /// The stored access token is attached as a bearer `authorization` header
    /// only when the merged configuration neither sets nor omits that header.
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse<ResponseBody>, ApiError>;

    /// Token store consulted by every dispatch
    fn token_store(&self) -> &AuthTokenStore;

    /// Directory downloads are written to
    fn download_dir(&self) -> PathBuf;

    /// Fetches a binary body with an explicit binary `accept` header
    async fn fetch_blob(
        &self,
        endpoint: &str,
        config: Option<RequestConfig>,
    ) -> Result<Bytes, ApiError> {
        let forced = RequestConfig::new().with_header(ACCEPT.as_str(), CONTENT_TYPE_OCTET_STREAM);
        let config = config.unwrap_or_default().merge(&forced);
        let response = self
            .execute(
                ApiRequest::new(Method::GET, endpoint)
                    .with_config(Some(config))
                    .binary(),
            )
            .await?;
        Ok(match response.data {
            ResponseBody::Binary(bytes) => bytes,
            ResponseBody::Text(text) => Bytes::from(text),
            ResponseBody::Json(value) => Bytes::from(serde_json::to_vec(&value)?),
        })
    }

    /// Downloads `endpoint` into the download directory
    ///
    /// The file is named `filename`, or `"download"` when none is given.
    async fn download(
        &self,
        endpoint: &str,
        filename: Option<&str>,
        config: Option<RequestConfig>,
    ) -> Result<PathBuf, ApiError> {
        let blob = self.fetch_blob(endpoint, config).await?;
        save_blob(&self.download_dir(), filename, &blob)
    }
}

/// How a dispatch settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// 2xx response decoded
    Succeeded,
    /// Timer fired first
    TimedOut,
    /// Transport failure
    NetworkFailed,
    /// Non-success response
    HttpFailed,
    /// Caller cancelled
    Cancelled,
}

impl Settlement {
    fn of(result: &Result<ApiResponse<ResponseBody>, ApiError>) -> Self {
        use crate::error::ApiErrorKind;
        match result {
            Ok(_) => Self::Succeeded,
            Err(e) => match e.kind {
                ApiErrorKind::Timeout => Self::TimedOut,
                ApiErrorKind::Http => Self::HttpFailed,
                ApiErrorKind::Cancelled => Self::Cancelled,
                _ => Self::NetworkFailed,
            },
        }
    }
}

#[derive(Debug, Clone)]
struct DispatcherState {
    base_url: String,
    defaults: RequestConfig,
    download_dir: PathBuf,
}

/// Raw transport outcome before decoding
struct RawResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

/// The one request-execution entry point
///
/// Configuration mutators take `&self` and swap the shared state under a
/// short lock; in-flight calls keep the snapshot they started with.
#[derive(Debug)]
pub struct RequestDispatcher {
    http_client: Client,
    state: RwLock<DispatcherState>,
    tokens: AuthTokenStore,
}

impl RequestDispatcher {
    /// Creates a dispatcher with the token store described by `config`
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        Self::with_token_store(config, config.token_store()?)
    }

    /// Creates a dispatcher sharing an existing token store
    pub fn with_token_store(config: &Config, tokens: AuthTokenStore) -> Result<Self, ApiError> {
        let http_client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http_client,
            state: RwLock::new(DispatcherState {
                base_url: normalize_base_url(&config.rest_api.base_url),
                defaults: config.request_defaults(),
                download_dir: config.download_dir(),
            }),
            tokens,
        })
    }

    /// Current base URL, without trailing slash
    #[must_use]
    pub fn base_url(&self) -> String {
        self.state.read().base_url.clone()
    }

    /// Current instance defaults
    #[must_use]
    pub fn default_config(&self) -> RequestConfig {
        self.state.read().defaults.clone()
    }

    /// Points the dispatcher at another base URL
    pub fn set_base_url(&self, base_url: &str) -> Result<(), ApiError> {
        let normalized = normalize_base_url(base_url);
        reqwest::Url::parse(&normalized).map_err(ApiError::config)?;
        self.state.write().base_url = normalized;
        Ok(())
    }

    /// Stores the access token read by subsequent dispatches
    pub fn set_auth_token(&self, token: &str) -> Result<(), ApiError> {
        self.tokens.set_access_token(token)
    }

    /// Drops the access token; later dispatches go out anonymously
    pub fn remove_auth_token(&self) -> Result<(), ApiError> {
        self.tokens.clear_access_token()
    }

    /// Folds `overrides` into the instance defaults
    pub fn update_config(&self, overrides: &RequestConfig) {
        let mut state = self.state.write();
        state.defaults = state.defaults.merge(overrides);
    }

    /// Changes the download directory
    pub fn set_download_dir(&self, dir: impl Into<PathBuf>) {
        self.state.write().download_dir = dir.into();
    }

    /// Full URL for `endpoint`
    #[must_use]
    pub fn url_for(&self, endpoint: &str) -> String {
        join_url(&self.state.read().base_url, endpoint)
    }

    /// Dispatches without a caller cancellation token
    pub async fn execute(
        &self,
        method: Method,
        endpoint: &str,
        payload: Payload,
        config: Option<RequestConfig>,
    ) -> Result<ApiResponse<ResponseBody>, ApiError> {
        self.dispatch(
            ApiRequest::new(method, endpoint)
                .with_payload(payload)
                .with_config(config),
        )
        .await
    }

    /// Dispatches and aborts early when `cancel` is cancelled
    pub async fn execute_with_cancel(
        &self,
        method: Method,
        endpoint: &str,
        payload: Payload,
        config: Option<RequestConfig>,
        cancel: CancellationToken,
    ) -> Result<ApiResponse<ResponseBody>, ApiError> {
        self.dispatch(
            ApiRequest::new(method, endpoint)
                .with_payload(payload)
                .with_config(config)
                .cancel_on(cancel),
        )
        .await
    }

    /// Dispatches and deserializes the body into `T`
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        payload: Payload,
        config: Option<RequestConfig>,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.execute(method, endpoint, payload, config)
            .await?
            .into_typed()
    }

    /// Makes a GET request
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        config: Option<RequestConfig>,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.request(Method::GET, endpoint, Payload::Empty, config)
            .await
    }

    /// Makes a POST request with a JSON body
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
        config: Option<RequestConfig>,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.request(Method::POST, endpoint, Payload::json(body)?, config)
            .await
    }

    /// Makes a PUT request with a JSON body
    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
        config: Option<RequestConfig>,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.request(Method::PUT, endpoint, Payload::json(body)?, config)
            .await
    }

    /// Makes a PATCH request with a JSON body
    pub async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
        config: Option<RequestConfig>,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.request(Method::PATCH, endpoint, Payload::json(body)?, config)
            .await
    }

    /// Makes a DELETE request
    pub async fn delete<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        config: Option<RequestConfig>,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.request(Method::DELETE, endpoint, Payload::Empty, config)
            .await
    }

    async fn dispatch(&self, request: ApiRequest) -> Result<ApiResponse<ResponseBody>, ApiError> {
        let ApiRequest {
            method,
            endpoint,
            payload,
            config,
            cancel,
            binary,
        } = request;

        let (url, merged) = {
            let state = self.state.read();
            let merged = match &config {
                Some(overrides) => state.defaults.merge(overrides),
                None => state.defaults.clone(),
            };
            (join_url(&state.base_url, &endpoint), merged)
        };

        let payload_kind = payload.kind();
        let (body, mut resolved) = codec::encode(payload, &merged)?;
        self.attach_credentials(&mut resolved);

        let headers = resolved.header_map()?;
        let timeout = resolved.effective_timeout();
        let builder = body.apply(self.http_client.request(method.clone(), &url).headers(headers));

        debug!("{} {} ({} body, timeout {:?})", method, url, payload_kind, timeout);

        let call_cancel = cancel.map_or_else(CancellationToken::new, |parent| parent.child_token());
        let transport = async {
            let response = builder.send().await?;
            let status = response.status();
            let headers = response.headers().clone();
            let body = response.bytes().await?;
            Ok::<_, ApiError>(RawResponse {
                status,
                headers,
                body,
            })
        };

        let raw = tokio::select! {
            biased;
            () = call_cancel.cancelled() => Err(ApiError::cancelled()),
            () = tokio::time::sleep(timeout) => {
                call_cancel.cancel();
                Err(ApiError::timeout())
            }
            raw = transport => raw,
        };

        let result = raw.and_then(|raw| into_response(raw, binary));
        let settlement = Settlement::of(&result);
        match &result {
            Ok(response) => debug!("{} {} settled {:?} ({})", method, url, settlement, response.status),
            Err(e) => warn!("{} {} settled {:?}: {}", method, url, settlement, e),
        }
        result
    }

    /// Adds the bearer token and, when allowed, the session cookies
    fn attach_credentials(&self, config: &mut RequestConfig) {
        let authorization = AUTHORIZATION.as_str();
        let omitted = config.omit_headers.iter().any(|name| name == authorization);
        if !omitted && config.header(authorization).is_none() {
            if let Some(token) = self.tokens.get_access_token() {
                config.set_header(authorization, format!("Bearer {token}"));
            }
        }

        if config.includes_credentials() && config.header(COOKIE.as_str()).is_none() {
            if let Some(cookies) = self.tokens.cookie_header() {
                config.set_header(COOKIE.as_str(), cookies);
            }
        }
    }
}

#[async_trait]
impl RequestExecutor for RequestDispatcher {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse<ResponseBody>, ApiError> {
        self.dispatch(request).await
    }

    fn token_store(&self) -> &AuthTokenStore {
        &self.tokens
    }

    fn download_dir(&self) -> PathBuf {
        self.state.read().download_dir.clone()
    }
}

/// Joins a normalized base URL and an endpoint with exactly one slash
#[must_use]
pub fn join_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim().trim_start_matches('/')
    )
}

fn into_response(raw: RawResponse, binary: bool) -> Result<ApiResponse<ResponseBody>, ApiError> {
    let content_type = raw
        .headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    if !raw.status.is_success() {
        let data = codec::decode(content_type, raw.body)
            .ok()
            .and_then(ResponseBody::into_value);
        return Err(ApiError::http(raw.status, data));
    }

    let data = if binary {
        ResponseBody::Binary(raw.body)
    } else {
        codec::decode(content_type, raw.body)?
    };
    Ok(ApiResponse {
        data,
        status: raw.status.as_u16(),
        status_text: raw.status.canonical_reason().unwrap_or("").to_string(),
        headers: header_snapshot(&raw.headers),
    })
}

fn header_snapshot(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut snapshot: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let Ok(value) = value.to_str() else {
            continue;
        };
        snapshot
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }
    snapshot
}
