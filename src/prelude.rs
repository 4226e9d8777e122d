/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! # Portal Client Prelude
//!
//! ```rust
//! use portal_client::prelude::*;
//!
//! let config = Config::with_base_url("http://localhost:8000/api");
//! assert_eq!(config.rest_api.base_url, "http://localhost:8000/api");
//! ```

// ============================================================================
// CORE CONFIGURATION AND SETUP
// ============================================================================

/// Client configuration
pub use crate::application::config::Config;

/// Client bundling every service
pub use crate::client::Client;

/// Library version information
pub use crate::{VERSION, version};

// ============================================================================
// ERROR HANDLING
// ============================================================================

pub use crate::error::{ApiError, ApiErrorKind};

// ============================================================================
// DISPATCH
// ============================================================================

pub use crate::transport::{RequestDispatcher, RequestExecutor, Settlement};

// ============================================================================
// MODELS
// ============================================================================

pub use crate::model::auth::{AuthTokenPair, AuthTokens, LoginRequest};
pub use crate::model::http::RequestConfig;
pub use crate::model::payload::{MultipartForm, Payload, UploadFile};
pub use crate::model::requests::ApiRequest;
pub use crate::model::responses::{ApiResponse, ResponseBody};

// ============================================================================
// SESSION
// ============================================================================

pub use crate::session::expiry::ExpiryPolicy;
pub use crate::session::store::{AuthTokenStore, FileBackend, MemoryBackend, TokenBackend};

// ============================================================================
// SERVICES
// ============================================================================

pub use crate::application::interfaces::auth::AuthService;
pub use crate::application::interfaces::media::MediaService;
pub use crate::application::interfaces::resource::{
    JobService, ProfileService, ResourceService, UserService,
};
pub use crate::application::services::{
    AuthServiceImpl, CompanyServiceImpl, EventServiceImpl, JobServiceImpl, MediaServiceImpl,
    ProfileServiceImpl, UserServiceImpl,
};

// ============================================================================
// UTILITIES
// ============================================================================

/// Logging utilities
pub use crate::utils::logger::setup_logger;

// ============================================================================
// RE-EXPORTS FROM EXTERNAL CRATES
// ============================================================================

pub use async_trait::async_trait;
pub use reqwest::Method;
pub use serde::{Deserialize, Serialize};
pub use std::sync::Arc;
pub use tokio;
pub use tokio_util::sync::CancellationToken;
pub use tracing::{debug, error, info, warn};
