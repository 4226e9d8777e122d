/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Entry point bundling the dispatcher with every domain service
//!
//! ```ignore
//! use portal_client::prelude::*;
//!
//! let client = Client::new(Config::new())?;
//! client.auth().login(&LoginRequest::new("a@b.c", "secret")).await?;
//! let jobs = client.jobs().list().await?;
//! client.auth().logout().await?;
//! ```

use crate::application::config::Config;
use crate::application::services::{
    AuthServiceImpl, CompanyServiceImpl, EventServiceImpl, JobServiceImpl, MediaServiceImpl,
    ProfileServiceImpl, UserServiceImpl,
};
use crate::error::ApiError;
use crate::session::store::AuthTokenStore;
use crate::transport::dispatcher::{RequestDispatcher, RequestExecutor};
use std::sync::Arc;
use tracing::debug;

/// Portal API client
///
/// Every service shares one [`RequestDispatcher`], so a token stored by
/// [`Client::auth`] is seen by every other service on its next call.
#[derive(Debug, Clone)]
pub struct Client {
    dispatcher: Arc<RequestDispatcher>,
    auth: AuthServiceImpl,
    jobs: JobServiceImpl,
    companies: CompanyServiceImpl,
    events: EventServiceImpl,
    users: UserServiceImpl,
    profiles: ProfileServiceImpl,
    media: MediaServiceImpl,
}

impl Client {
    /// Creates a client with the token store described by `config`
    pub fn new(config: Config) -> Result<Self, ApiError> {
        Ok(Self::from_dispatcher(Arc::new(RequestDispatcher::new(
            &config,
        )?)))
    }

    /// Creates a client sharing an existing token store
    pub fn with_token_store(config: Config, tokens: AuthTokenStore) -> Result<Self, ApiError> {
        Ok(Self::from_dispatcher(Arc::new(
            RequestDispatcher::with_token_store(&config, tokens)?,
        )))
    }

    /// Wraps an already configured dispatcher
    pub fn from_dispatcher(dispatcher: Arc<RequestDispatcher>) -> Self {
        debug!("Client targeting {}", dispatcher.base_url());
        let executor: Arc<dyn RequestExecutor> = dispatcher.clone();
        Self {
            auth: AuthServiceImpl::new(executor.clone()),
            jobs: JobServiceImpl::new(executor.clone()),
            companies: CompanyServiceImpl::new(executor.clone()),
            events: EventServiceImpl::new(executor.clone()),
            users: UserServiceImpl::new(executor.clone()),
            profiles: ProfileServiceImpl::new(executor.clone()),
            media: MediaServiceImpl::new(executor),
            dispatcher,
        }
    }

    /// The shared dispatcher, for raw calls and configuration changes
    #[must_use]
    pub fn dispatcher(&self) -> &Arc<RequestDispatcher> {
        &self.dispatcher
    }

    /// The shared token store
    #[must_use]
    pub fn tokens(&self) -> &AuthTokenStore {
        self.dispatcher.token_store()
    }

    /// Login, registration, refresh and logout
    #[must_use]
    pub fn auth(&self) -> &AuthServiceImpl {
        &self.auth
    }

    /// `/jobs`
    #[must_use]
    pub fn jobs(&self) -> &JobServiceImpl {
        &self.jobs
    }

    /// `/companies`
    #[must_use]
    pub fn companies(&self) -> &CompanyServiceImpl {
        &self.companies
    }

    /// `/events`
    #[must_use]
    pub fn events(&self) -> &EventServiceImpl {
        &self.events
    }

    /// `/users`
    #[must_use]
    pub fn users(&self) -> &UserServiceImpl {
        &self.users
    }

    /// `/profiles`
    #[must_use]
    pub fn profiles(&self) -> &ProfileServiceImpl {
        &self.profiles
    }

    /// `/media`
    #[must_use]
    pub fn media(&self) -> &MediaServiceImpl {
        &self.media
    }
}
