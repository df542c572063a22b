//! Catalog maintenance behind the admin-authenticated routes.

use std::time::SystemTime;

use indexmap::IndexSet;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    dao::models::{GameEntity, GameStatus},
    dto::game::{GameInput, GameRecord},
    error::ServiceError,
    state::SharedState,
};

/// Fetch a single game regardless of its status.
pub async fn get_game(state: &SharedState, id: Uuid) -> Result<GameRecord, ServiceError> {
    let store = state.require_game_store().await?;
    let Some(game) = store.find_game(id).await? else {
        return Err(ServiceError::NotFound("game not found".into()));
    };
    Ok(game.into())
}

/// Persist a new game built from validated input.
pub async fn create_game(state: &SharedState, input: GameInput) -> Result<GameRecord, ServiceError> {
    let store = state.require_game_store().await?;
    let now = SystemTime::now();
    let game = build_game(Uuid::new_v4(), input, now, now)?;

    store.save_game(game.clone()).await?;
    info!(game_id = %game.id, name = %game.name, "game created");
    Ok(game.into())
}

/// Replace the editable fields of an existing game, keeping its id and creation time.
pub async fn update_game(
    state: &SharedState,
    id: Uuid,
    input: GameInput,
) -> Result<GameRecord, ServiceError> {
    let store = state.require_game_store().await?;
    let Some(existing) = store.find_game(id).await? else {
        return Err(ServiceError::NotFound("game not found".into()));
    };

    let game = build_game(id, input, existing.created_at, SystemTime::now())?;
    store.save_game(game.clone()).await?;
    debug!(game_id = %id, "game updated");
    Ok(game.into())
}

/// Remove a game from the catalog.
pub async fn delete_game(state: &SharedState, id: Uuid) -> Result<(), ServiceError> {
    let store = state.require_game_store().await?;
    if store.delete_game(id).await? {
        info!(game_id = %id, "game deleted");
        Ok(())
    } else {
        Err(ServiceError::NotFound("game not found".into()))
    }
}

/// Trim tags, drop empty ones and remove duplicates while keeping first-seen order.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|tag| tag.trim().to_owned())
        .filter(|tag| !tag.is_empty())
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

fn build_game(
    id: Uuid,
    input: GameInput,
    created_at: SystemTime,
    updated_at: SystemTime,
) -> Result<GameEntity, ServiceError> {
    let duration = input
        .duration
        .map(u32::try_from)
        .transpose()
        .map_err(|_| ServiceError::InvalidInput("duration is out of range".into()))?;

    Ok(GameEntity {
        id,
        name: input.name.trim().to_owned(),
        description: input.description,
        player_count: input.player_count.into(),
        tags: normalize_tags(input.tags),
        cover_image: input.cover_image.filter(|path| !path.is_empty()),
        images: input.images,
        videos: input.videos.into_iter().map(Into::into).collect(),
        difficulty: input.difficulty.unwrap_or_default(),
        duration,
        status: input.status.unwrap_or(GameStatus::Active),
        created_at,
        updated_at,
    })
}
