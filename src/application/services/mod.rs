/// Typed verb helpers shared by every service
pub mod base;

mod auth_service;
mod media_service;
mod resource_service;

pub use auth_service::AuthServiceImpl;
pub use media_service::MediaServiceImpl;
pub use resource_service::{
    CompanyServiceImpl, EventServiceImpl, JobServiceImpl, ProfileServiceImpl, UserServiceImpl,
};
