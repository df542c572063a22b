use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{get, post, put},
};
use axum_valid::Valid;
use uuid::Uuid;

use crate::{
    dto::game::{GameInput, GameListQuery, GameRecord, MessageResponse, RandomQuery},
    error::AppError,
    routes::admin::require_admin,
    services::{game_service, selection_service},
    state::SharedState,
};

/// Catalog routes: public reads plus admin-only mutations.
pub fn router(state: SharedState) -> Router<SharedState> {
    let public = Router::new()
        .route("/", get(list_games))
        .route("/random", get(random_game))
        .route("/{id}", get(get_game));

    let protected = Router::new()
        .route("/", post(create_game))
        .route("/{id}", put(update_game).delete(delete_game))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    public.merge(protected)
}

/// List games, active ones by default, optionally filtered by player count.
#[utoipa::path(
    get,
    path = "/api/games",
    tag = "games",
    params(GameListQuery),
    responses(
        (status = 200, description = "Matching games in store order", body = [GameRecord]),
        (status = 400, description = "Malformed query")
    )
)]
pub async fn list_games(
    State(state): State<SharedState>,
    Query(query): Query<GameListQuery>,
) -> Result<Json<Vec<GameRecord>>, AppError> {
    let games = selection_service::list_eligible(&state, query.player_count, query.status).await?;
    Ok(Json(games))
}

/// Draw one active game uniformly at random.
#[utoipa::path(
    get,
    path = "/api/games/random",
    tag = "games",
    params(RandomQuery),
    responses(
        (status = 200, description = "Randomly selected game", body = GameRecord),
        (status = 404, description = "No eligible records")
    )
)]
pub async fn random_game(
    State(state): State<SharedState>,
    Query(query): Query<RandomQuery>,
) -> Result<Json<GameRecord>, AppError> {
    let game = selection_service::select_random(&state, query.player_count).await?;
    Ok(Json(game))
}

/// Fetch a single game by id.
#[utoipa::path(
    get,
    path = "/api/games/{id}",
    tag = "games",
    params(("id" = Uuid, Path, description = "Game identifier")),
    responses(
        (status = 200, description = "Game", body = GameRecord),
        (status = 404, description = "Game not found")
    )
)]
pub async fn get_game(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GameRecord>, AppError> {
    Ok(Json(game_service::get_game(&state, id).await?))
}

/// Add a game to the catalog.
#[utoipa::path(
    post,
    path = "/api/games",
    tag = "games",
    request_body = GameInput,
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Game created", body = GameRecord),
        (status = 400, description = "Invalid game"),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
pub async fn create_game(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<GameInput>>,
) -> Result<(StatusCode, Json<GameRecord>), AppError> {
    let game = game_service::create_game(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(game)))
}

/// Replace the editable fields of a game.
#[utoipa::path(
    put,
    path = "/api/games/{id}",
    tag = "games",
    params(("id" = Uuid, Path, description = "Game identifier")),
    request_body = GameInput,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Game updated", body = GameRecord),
        (status = 400, description = "Invalid game"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Game not found")
    )
)]
pub async fn update_game(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Valid(Json(payload)): Valid<Json<GameInput>>,
) -> Result<Json<GameRecord>, AppError> {
    Ok(Json(game_service::update_game(&state, id, payload).await?))
}

/// Remove a game from the catalog.
#[utoipa::path(
    delete,
    path = "/api/games/{id}",
    tag = "games",
    params(("id" = Uuid, Path, description = "Game identifier")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Game deleted", body = MessageResponse),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Game not found")
    )
)]
pub async fn delete_game(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    game_service::delete_game(&state, id).await?;
    Ok(Json(MessageResponse {
        message: "deleted".into(),
    }))
}
