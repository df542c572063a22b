use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    middleware,
    routing::post,
};

use crate::{
    dto::upload::UploadResponse,
    error::AppError,
    routes::admin::require_admin,
    services::upload_service::{self, MediaKind, UploadedFile},
    state::SharedState,
};

const FILE_FIELD: &str = "file";
/// Headroom for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Admin-only media upload endpoints.
pub fn router(state: SharedState) -> Router<SharedState> {
    let limit = state.config().max_upload_bytes + MULTIPART_OVERHEAD;
    Router::new()
        .route("/image", post(upload_image))
        .route("/video", post(upload_video))
        .layer(DefaultBodyLimit::max(limit))
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}

/// Store an image sent as multipart field `file`.
#[utoipa::path(
    post,
    path = "/api/upload/image",
    tag = "upload",
    security(("bearer" = [])),
    request_body(content_type = "multipart/form-data", description = "Multipart body with a `file` field"),
    responses(
        (status = 200, description = "Image stored", body = UploadResponse),
        (status = 400, description = "Missing, oversized or unsupported file"),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
pub async fn upload_image(
    State(state): State<SharedState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    upload(&state, MediaKind::Image, multipart).await
}

/// Store a video sent as multipart field `file`.
#[utoipa::path(
    post,
    path = "/api/upload/video",
    tag = "upload",
    security(("bearer" = [])),
    request_body(content_type = "multipart/form-data", description = "Multipart body with a `file` field"),
    responses(
        (status = 200, description = "Video stored", body = UploadResponse),
        (status = 400, description = "Missing, oversized or unsupported file"),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
pub async fn upload_video(
    State(state): State<SharedState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    upload(&state, MediaKind::Video, multipart).await
}

async fn upload(
    state: &SharedState,
    kind: MediaKind,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(format!("malformed multipart body: {err}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);
        let bytes = field
            .bytes()
            .await
            .map_err(|err| AppError::BadRequest(format!("could not read upload: {err}")))?;

        let file = UploadedFile {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        };
        let stored = upload_service::store_upload(state.config(), kind, file).await?;
        return Ok(Json(stored));
    }

    Err(AppError::BadRequest("no file uploaded".into()))
}
