/// Admin sign-in and bearer token handling.
pub mod admin_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Catalog maintenance (get, create, update, delete).
pub mod game_service;
/// Health check service.
pub mod health_service;
/// Player-count filtering and uniform random selection.
pub mod selection_service;
/// Storage connection supervisor with exponential backoff.
pub mod storage_supervisor;
/// Media upload persistence.
pub mod upload_service;
