//! Admin sign-in and bearer token handling.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    config::AppConfig,
    dao::models::AdminEntity,
    dto::admin::{AdminCheckResponse, LoginRequest, LoginResponse},
    error::ServiceError,
    state::SharedState,
};

/// Claims carried by admin bearer tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Admin id.
    pub sub: String,
    pub openid: String,
    /// Expiry as seconds since the Unix epoch.
    pub exp: usize,
}

/// Authenticate an admin by openid and issue a bearer token.
pub async fn login(state: &SharedState, request: LoginRequest) -> Result<LoginResponse, ServiceError> {
    let openid = request.openid.trim().to_owned();
    if openid.is_empty() {
        return Err(ServiceError::InvalidInput("openid must not be blank".into()));
    }

    let store = state.require_game_store().await?;
    let Some(mut admin) = store.find_admin_by_openid(openid.clone()).await? else {
        warn!(%openid, "login refused for unknown openid");
        return Err(ServiceError::Forbidden("not an administrator".into()));
    };

    if let Some(nickname) = request.nickname.filter(|name| !name.is_empty())
        && admin.nickname.as_deref() != Some(nickname.as_str())
    {
        admin.nickname = Some(nickname);
        admin.updated_at = SystemTime::now();
        store.save_admin(admin.clone()).await?;
    }

    let token = issue_token(state.config(), &admin)?;
    info!(admin_id = %admin.id, "admin signed in");
    Ok(LoginResponse {
        token,
        admin: admin.into(),
    })
}

/// Describe the admin owning a verified token.
pub fn check(admin: AdminEntity) -> AdminCheckResponse {
    AdminCheckResponse {
        admin: admin.into(),
    }
}

/// Sign a token for `admin` valid for the configured lifetime.
pub fn issue_token(config: &AppConfig, admin: &AdminEntity) -> Result<String, ServiceError> {
    let expires_at = SystemTime::now() + config.token_ttl;
    let exp = expires_at
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_secs() as usize;
    let claims = Claims {
        sub: admin.id.to_string(),
        openid: admin.openid.clone(),
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|err| ServiceError::Internal(format!("token signing failed: {err}")))
}

/// Verify a bearer token and load the admin it names.
///
/// Any signature, expiry or lookup failure is reported as [`ServiceError::Unauthorized`].
pub async fn verify_token(state: &SharedState, token: &str) -> Result<AdminEntity, ServiceError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.config().jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|err| ServiceError::Unauthorized(format!("invalid token: {err}")))?;

    let id = Uuid::parse_str(&data.claims.sub)
        .map_err(|_| ServiceError::Unauthorized("invalid token subject".into()))?;

    let store = state.require_game_store().await?;
    store
        .find_admin(id)
        .await?
        .ok_or_else(|| ServiceError::Unauthorized("admin no longer exists".into()))
}
