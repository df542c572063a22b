use axum::{
    Extension, Json, Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_valid::Valid;

use crate::{
    dao::models::AdminEntity,
    dto::admin::{AdminCheckResponse, LoginRequest, LoginResponse},
    error::AppError,
    services::admin_service,
    state::SharedState,
};

const BEARER_PREFIX: &str = "Bearer ";

/// Admin sign-in and session check.
pub fn router(state: SharedState) -> Router<SharedState> {
    let protected = Router::new()
        .route("/check", get(check))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new().route("/login", post(login)).merge(protected)
}

/// Exchange an admin openid for a bearer token.
#[utoipa::path(
    post,
    path = "/api/admin/login",
    tag = "admin",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = LoginResponse),
        (status = 400, description = "Blank openid"),
        (status = 403, description = "Not an administrator")
    )
)]
pub async fn login(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<LoginRequest>>,
) -> Result<Json<LoginResponse>, AppError> {
    Ok(Json(admin_service::login(&state, payload).await?))
}

/// Describe the admin owning the presented token.
#[utoipa::path(
    get,
    path = "/api/admin/check",
    tag = "admin",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Token is valid", body = AdminCheckResponse),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
pub async fn check(Extension(admin): Extension<AdminEntity>) -> Json<AdminCheckResponse> {
    Json(admin_service::check(admin))
}

/// Reject requests without a valid admin bearer token and expose the admin to handlers.
pub(crate) async fn require_admin(
    State(state): State<SharedState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| AppError::Unauthorized("missing bearer token".into()))?;

    let admin = admin_service::verify_token(&state, &token).await?;
    req.extensions_mut().insert(admin);
    Ok(next.run(req).await)
}
