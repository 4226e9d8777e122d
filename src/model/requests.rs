/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use crate::model::http::RequestConfig;
use crate::model::payload::Payload;
use reqwest::Method;
use tokio_util::sync::CancellationToken;

/// Everything needed for one dispatch
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Endpoint path, joined to the base URL with exactly one slash
    pub endpoint: String,
    /// Request body
    pub payload: Payload,
    /// Per-call overrides merged over the instance defaults
    pub config: Option<RequestConfig>,
    /// Caller-held token that aborts the call when cancelled
    pub cancel: Option<CancellationToken>,
    /// Return the raw body bytes instead of decoding by content type
    pub binary: bool,
}

impl ApiRequest {
    /// Request without body or overrides
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            payload: Payload::Empty,
            config: None,
            cancel: None,
            binary: false,
        }
    }

    /// Sets the body
    #[must_use]
    pub fn with_payload(mut self, payload: impl Into<Payload>) -> Self {
        self.payload = payload.into();
        self
    }

    /// Sets the per-call overrides
    #[must_use]
    pub fn with_config(mut self, config: Option<RequestConfig>) -> Self {
        self.config = config;
        self
    }

    /// Aborts the call when `token` is cancelled
    #[must_use]
    pub fn cancel_on(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Keeps the successful body as raw bytes, whatever its content type
    #[must_use]
    pub fn binary(mut self) -> Self {
        self.binary = true;
        self
    }
}
