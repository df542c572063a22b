//! Player-count filtering and uniform random selection over the catalog.
//!
//! Every call reads a fresh snapshot from the store and keeps nothing between requests, so
//! concurrent draws never coordinate and successive draws are independent.

use rand::Rng;
use tracing::{debug, warn};

use crate::{
    dao::{
        game_store::{GameFilter, GameStore},
        models::{GameEntity, GameStatus},
    },
    dto::game::GameRecord,
    error::ServiceError,
    state::SharedState,
};

/// Pick one element of `pool` with probability `1 / pool.len()`.
///
/// Returns `None` for an empty pool. The generator does not need to be cryptographically secure.
pub fn pick_uniform<'a, T, R>(pool: &'a [T], rng: &mut R) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    uniform_index(pool.len(), rng).and_then(|index| pool.get(index))
}

/// Index in `0..len` drawn uniformly, or `None` when `len` is zero.
fn uniform_index<R>(len: usize, rng: &mut R) -> Option<usize>
where
    R: Rng + ?Sized,
{
    (len > 0).then(|| rng.random_range(0..len))
}

/// List games with the requested status (active by default) whose player range contains
/// `player_count`, in store order.
pub async fn list_eligible(
    state: &SharedState,
    player_count: Option<u32>,
    status: Option<GameStatus>,
) -> Result<Vec<GameRecord>, ServiceError> {
    let filter = GameFilter {
        status: Some(status.unwrap_or_default()),
        player_count,
    };
    let store = state.require_game_store().await?;
    let games = fetch(store.as_ref(), filter).await?;
    Ok(games.into_iter().map(Into::into).collect())
}

/// Draw one active game uniformly at random among those accepting `player_count` players.
///
/// Fails with [`ServiceError::NoEligibleRecords`] when nothing qualifies.
pub async fn select_random(
    state: &SharedState,
    player_count: Option<u32>,
) -> Result<GameRecord, ServiceError> {
    let store = state.require_game_store().await?;
    let pool = fetch(store.as_ref(), GameFilter::active(player_count)).await?;
    take_uniform(pool, &mut rand::rng()).map(Into::into)
}

async fn fetch(store: &dyn GameStore, filter: GameFilter) -> Result<Vec<GameEntity>, ServiceError> {
    store.find_games(filter).await.map_err(|err| {
        warn!(error = %err, ?filter, "failed to load eligible games");
        ServiceError::from(err)
    })
}

fn take_uniform<R>(mut pool: Vec<GameEntity>, rng: &mut R) -> Result<GameEntity, ServiceError>
where
    R: Rng + ?Sized,
{
    let index = uniform_index(pool.len(), rng).ok_or(ServiceError::NoEligibleRecords)?;
    debug!(pool_size = pool.len(), index, "picked random game");
    Ok(pool.swap_remove(index))
}
