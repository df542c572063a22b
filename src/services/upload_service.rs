//! Persistence of uploaded cover images and videos.

use std::{
    path::Path,
    time::{SystemTime, UNIX_EPOCH},
};

use rand::Rng;
use tokio::fs;
use tracing::{info, warn};

use crate::{config::AppConfig, dto::upload::UploadResponse, error::ServiceError};

/// Kind of media accepted by an upload endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    fn directory(self) -> &'static str {
        match self {
            MediaKind::Image => "images",
            MediaKind::Video => "videos",
        }
    }
}

/// Incoming file as read from the multipart `file` field.
#[derive(Debug)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Store `file` under the uploads directory and return its public path.
pub async fn store_upload(
    config: &AppConfig,
    kind: MediaKind,
    file: UploadedFile,
) -> Result<UploadResponse, ServiceError> {
    let content_type = file.content_type.as_deref().unwrap_or_default();
    if !(content_type.starts_with("image/") || content_type.starts_with("video/")) {
        return Err(ServiceError::InvalidInput(
            "only image and video files are accepted".into(),
        ));
    }
    if file.bytes.is_empty() {
        return Err(ServiceError::InvalidInput("no file uploaded".into()));
    }
    if file.bytes.len() > config.max_upload_bytes {
        return Err(ServiceError::InvalidInput(format!(
            "file exceeds the {} byte limit",
            config.max_upload_bytes
        )));
    }

    let directory = config.uploads_dir.join(kind.directory());
    fs::create_dir_all(&directory).await.map_err(|err| {
        warn!(error = %err, path = %directory.display(), "failed to create upload directory");
        ServiceError::Internal("could not store file".into())
    })?;

    let stored_name = unique_file_name(file.file_name.as_deref());
    let path = directory.join(&stored_name);
    fs::write(&path, &file.bytes).await.map_err(|err| {
        warn!(error = %err, path = %path.display(), "failed to write upload");
        ServiceError::Internal("could not store file".into())
    })?;

    info!(path = %path.display(), size = file.bytes.len(), "stored upload");
    Ok(UploadResponse {
        url: format!("/uploads/{}/{stored_name}", kind.directory()),
    })
}

/// `<unix millis>-<random u32><.ext>`, keeping the original extension when it is plain ASCII.
fn unique_file_name(original: Option<&str>) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default();
    let suffix: u32 = rand::rng().random();
    let extension = original
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default();
    format!("{millis}-{suffix}{extension}")
}
