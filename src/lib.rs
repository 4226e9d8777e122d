/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! # Portal Client
//!
//! Shared request-execution core for the portal REST API.
//!
//! Every network call in the crate goes through one
//! [`RequestDispatcher`](transport::RequestDispatcher). It joins the endpoint
//! to the configured base URL, merges per-call header and timeout overrides
//! into the instance defaults, attaches the stored bearer token, encodes the
//! body by kind (JSON, text, url-encoded form or multipart) and decodes the
//! response by its content type. Failures are normalized into one
//! [`ApiError`](error::ApiError) shape.
//!
//! Domain services (`auth`, `jobs`, `companies`, `events`, `users`,
//! `profiles`, `media`) are thin wrappers built on that dispatcher and are
//! bundled by [`Client`](client::Client).
//!
//! ## Configuration
//!
//! [`Config::new`](application::config::Config::new) reads `PORTAL_*`
//! environment variables and an optional `.env` file. Logging is set up with
//! [`setup_logger`](utils::setup_logger), honoring `LOGLEVEL`.

/// Configuration, service interfaces and implementations
pub mod application;
/// Client bundling every service
pub mod client;
/// Crate-wide constants
pub mod constants;
/// Normalized error type
pub mod error;
/// Request and response models
pub mod model;
/// Commonly used re-exports
pub mod prelude;
/// Token storage and expiry
pub mod session;
/// Dispatch, codec and downloads
pub mod transport;
/// Environment and logging helpers
pub mod utils;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
#[must_use]
pub fn version() -> &'static str {
    VERSION
}
