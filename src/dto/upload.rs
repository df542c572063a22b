use serde::Serialize;
use utoipa::ToSchema;

/// Location of a freshly stored media file.
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    /// Path under `/uploads`, relative to the server origin.
    pub url: String,
}
