/// Authentication flow
pub mod auth;
/// File uploads and downloads
pub mod media;
/// CRUD resources
pub mod resource;
