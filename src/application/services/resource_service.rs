/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use crate::application::interfaces::resource::{
    JobService, ProfileService, ResourceService, UserService,
};
use crate::application::services::base::ServiceBase;
use crate::error::ApiError;
use crate::model::payload::UploadFile;
use crate::model::responses::ApiResponse;
use crate::transport::dispatcher::RequestExecutor;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Multipart field carrying a job application resume
const RESUME_FIELD: &str = "resume";
/// Multipart field carrying a profile picture
const AVATAR_FIELD: &str = "avatar";

macro_rules! resource_service {
    ($(#[$doc:meta])* $name:ident, $path:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name {
            base: ServiceBase,
        }

        impl $name {
            /// Resource path every call is rooted at
            pub const PATH: &'static str = $path;

            /// Creates the service on top of a shared executor
            pub fn new(executor: Arc<dyn RequestExecutor>) -> Self {
                Self {
                    base: ServiceBase::new(executor, Self::PATH),
                }
            }
        }

        impl ResourceService for $name {
            fn base(&self) -> &ServiceBase {
                &self.base
            }
        }
    };
}

resource_service!(
    /// Job postings and applications
    JobServiceImpl,
    "/jobs"
);
resource_service!(
    /// Company pages
    CompanyServiceImpl,
    "/companies"
);
resource_service!(
    /// Events
    EventServiceImpl,
    "/events"
);
resource_service!(
    /// User accounts
    UserServiceImpl,
    "/users"
);
resource_service!(
    /// Public profiles
    ProfileServiceImpl,
    "/profiles"
);

#[async_trait]
impl JobService for JobServiceImpl {
    async fn apply(
        &self,
        job_id: &str,
        resume: UploadFile,
        fields: Option<&BTreeMap<String, String>>,
    ) -> Result<ApiResponse<Value>, ApiError> {
        info!("Applying to job {job_id} with {}", resume.file_name);
        let response = self
            .base
            .upload_file(
                &format!("{job_id}/apply"),
                resume,
                Some(RESUME_FIELD),
                fields,
                None,
            )
            .await?;
        debug!("Application for job {job_id} accepted: {}", response.status);
        Ok(response)
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn me(&self) -> Result<ApiResponse<Value>, ApiError> {
        self.base.get("me", None).await
    }
}

#[async_trait]
impl ProfileService for ProfileServiceImpl {
    async fn upload_avatar(
        &self,
        profile_id: &str,
        image: UploadFile,
    ) -> Result<ApiResponse<Value>, ApiError> {
        info!("Uploading avatar for profile {profile_id}");
        self.base
            .upload_file(
                &format!("{profile_id}/avatar"),
                image,
                Some(AVATAR_FIELD),
                None,
                None,
            )
            .await
    }
}
