use serde::Serialize;
use utoipa::ToSchema;

/// Overall state reported by `/health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// A catalog store is installed and answering.
    Ok,
    /// Requests touching the catalog currently fail with 503.
    Degraded,
}

/// Body of the `/health` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: HealthStatus,
}

impl From<HealthStatus> for HealthResponse {
    fn from(status: HealthStatus) -> Self {
        Self { status }
    }
}
