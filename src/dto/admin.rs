//! DTO definitions used by the admin REST API and documentation layer.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{dao::models::AdminEntity, dto::validation::validate_not_blank};

/// Credentials presented to `POST /api/admin/login`.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct LoginRequest {
    /// External identity of the administrator.
    #[validate(custom(function = "validate_not_blank"))]
    pub openid: String,
    /// Display name to store when it differs from the current one.
    #[serde(default)]
    pub nickname: Option<String>,
}

/// Public projection of an administrator.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminSummary {
    pub id: Uuid,
    pub openid: String,
    pub nickname: Option<String>,
    pub role: String,
}

/// Bearer token issued on successful login.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub admin: AdminSummary,
}

/// Response of `GET /api/admin/check`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminCheckResponse {
    pub admin: AdminSummary,
}

impl From<AdminEntity> for AdminSummary {
    fn from(admin: AdminEntity) -> Self {
        Self {
            id: admin.id,
            openid: admin.openid,
            nickname: admin.nickname,
            role: admin.role,
        }
    }
}
