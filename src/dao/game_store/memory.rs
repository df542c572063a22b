//! Process-local catalog backend used by tests and storage-less local runs.

use std::sync::Arc;

use futures::future::BoxFuture;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::dao::{
    game_store::{GameFilter, GameStore},
    models::{AdminEntity, GameEntity},
    seed,
    storage::StorageResult,
};

/// Catalog kept in insertion order; listing order is therefore stable between calls.
#[derive(Clone, Default)]
pub struct MemoryGameStore {
    inner: Arc<RwLock<MemoryState>>,
}

#[derive(Default)]
struct MemoryState {
    games: IndexMap<Uuid, GameEntity>,
    admins: IndexMap<Uuid, AdminEntity>,
}

impl MemoryGameStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given games and admins.
    pub fn with_records(games: Vec<GameEntity>, admins: Vec<AdminEntity>) -> Self {
        let state = MemoryState {
            games: games.into_iter().map(|game| (game.id, game)).collect(),
            admins: admins.into_iter().map(|admin| (admin.id, admin)).collect(),
        };
        Self {
            inner: Arc::new(RwLock::new(state)),
        }
    }

    /// Create a store holding the sample catalog and administrator.
    pub fn seeded() -> Self {
        Self::with_records(seed::sample_games(), seed::sample_admins())
    }
}

impl GameStore for MemoryGameStore {
    fn find_games(&self, filter: GameFilter) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            let guard = inner.read().await;
            Ok(guard
                .games
                .values()
                .filter(|game| filter.matches(game))
                .cloned()
                .collect())
        })
    }

    fn find_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
        let inner = self.inner.clone();
        Box::pin(async move { Ok(inner.read().await.games.get(&id).cloned()) })
    }

    fn save_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<()>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            inner.write().await.games.insert(game.id, game);
            Ok(())
        })
    }

    fn delete_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let inner = self.inner.clone();
        Box::pin(async move { Ok(inner.write().await.games.shift_remove(&id).is_some()) })
    }

    fn find_admin(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<AdminEntity>>> {
        let inner = self.inner.clone();
        Box::pin(async move { Ok(inner.read().await.admins.get(&id).cloned()) })
    }

    fn find_admin_by_openid(
        &self,
        openid: String,
    ) -> BoxFuture<'static, StorageResult<Option<AdminEntity>>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            let guard = inner.read().await;
            Ok(guard
                .admins
                .values()
                .find(|admin| admin.openid == openid)
                .cloned())
        })
    }

    fn save_admin(&self, admin: AdminEntity) -> BoxFuture<'static, StorageResult<()>> {
        let inner = self.inner.clone();
        Box::pin(async move {
            inner.write().await.admins.insert(admin.id, admin);
            Ok(())
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}
