use tracing::warn;

use crate::{
    dto::health::{HealthResponse, HealthStatus},
    state::SharedState,
};

/// Report `ok` when a store is installed and answers its health check, `degraded` otherwise.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    probe(state).await.into()
}

async fn probe(state: &SharedState) -> HealthStatus {
    let Some(store) = state.game_store().await else {
        warn!("health probe while storage is unavailable");
        return HealthStatus::Degraded;
    };

    match store.health_check().await {
        Ok(()) if !state.is_degraded().await => HealthStatus::Ok,
        Ok(()) => HealthStatus::Degraded,
        Err(err) => {
            warn!(error = %err, "storage health check failed");
            HealthStatus::Degraded
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::AppConfig,
        dao::game_store::{GameStore, memory::MemoryGameStore},
        state::AppState,
    };

    #[tokio::test]
    async fn missing_store_is_degraded() {
        let state = AppState::new(AppConfig::default());
        assert_eq!(health_status(&state).await.status, HealthStatus::Degraded);

        let store: Arc<dyn GameStore> = Arc::new(MemoryGameStore::new());
        state.set_game_store(store).await;
        assert_eq!(health_status(&state).await.status, HealthStatus::Ok);

        state.update_degraded(true).await;
        assert_eq!(health_status(&state).await.status, HealthStatus::Degraded);
    }
}
