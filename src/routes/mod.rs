use axum::Router;
use tower_http::services::ServeDir;

use crate::state::SharedState;

pub mod admin;
pub mod docs;
pub mod games;
pub mod health;
pub mod upload;

/// Compose all route trees, wiring in shared state, static uploads and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = Router::new()
        .nest("/games", games::router(state.clone()))
        .nest("/admin", admin::router(state.clone()))
        .nest("/upload", upload::router(state.clone()));

    let uploads = ServeDir::new(&state.config().uploads_dir);

    health::router()
        .nest("/api", api_router)
        .nest_service("/uploads", uploads)
        .merge(docs::router())
        .with_state(state)
}
