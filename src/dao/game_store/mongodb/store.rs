use std::sync::Arc;

use futures::{TryStreamExt, future::BoxFuture};
use mongodb::{Client, Collection, Database, IndexModel, bson::doc, options::IndexOptions};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    config::MongoConfig,
    connection::open,
    error::{MongoDaoError, MongoResult},
    models::{MongoAdminDocument, MongoGameDocument, doc_id, filter_document},
};
use crate::dao::{
    game_store::{GameFilter, GameStore},
    models::{AdminEntity, GameEntity},
    storage::StorageResult,
};

const GAME_COLLECTION_NAME: &str = "games";
const ADMIN_COLLECTION_NAME: &str = "admins";

/// Catalog backend persisting games and admins in MongoDB.
#[derive(Clone)]
pub struct MongoGameStore {
    inner: Arc<MongoInner>,
}

struct MongoInner {
    state: RwLock<MongoState>,
    config: MongoConfig,
}

struct MongoState {
    client: Client,
    database: Database,
}

impl MongoInner {
    async fn ping(&self) -> MongoResult<()> {
        let database = {
            let guard = self.state.read().await;
            guard.database.clone()
        };

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::HealthPing { source })?;
        Ok(())
    }

    async fn reconnect(&self) -> MongoResult<()> {
        let (client, database) = open(&self.config).await?;
        let mut guard = self.state.write().await;
        guard.client = client;
        guard.database = database;
        Ok(())
    }
}

impl MongoGameStore {
    /// Establish a connection to MongoDB and ensure indexes are present.
    pub async fn connect(config: MongoConfig) -> MongoResult<Self> {
        let (client, database) = open(&config).await?;

        let inner = Arc::new(MongoInner {
            state: RwLock::new(MongoState { client, database }),
            config,
        });

        let store = Self { inner };
        store.ensure_indexes().await?;
        Ok(store)
    }

    async fn ensure_indexes(&self) -> MongoResult<()> {
        let games = self.games().await;
        let status_index = IndexModel::builder()
            .keys(doc! {"status": 1, "player_count.min": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("game_status_players_idx".to_owned()))
                    .build(),
            )
            .build();
        games
            .create_index(status_index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: GAME_COLLECTION_NAME,
                index: "status,player_count.min",
                source,
            })?;

        let admins = self.admins().await;
        let openid_index = IndexModel::builder()
            .keys(doc! {"openid": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("admin_openid_idx".to_owned()))
                    .unique(Some(true))
                    .build(),
            )
            .build();
        admins
            .create_index(openid_index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: ADMIN_COLLECTION_NAME,
                index: "openid",
                source,
            })?;

        Ok(())
    }

    async fn games(&self) -> Collection<MongoGameDocument> {
        let guard = self.inner.state.read().await;
        guard
            .database
            .collection::<MongoGameDocument>(GAME_COLLECTION_NAME)
    }

    async fn admins(&self) -> Collection<MongoAdminDocument> {
        let guard = self.inner.state.read().await;
        guard
            .database
            .collection::<MongoAdminDocument>(ADMIN_COLLECTION_NAME)
    }

    async fn find_games(&self, filter: GameFilter) -> MongoResult<Vec<GameEntity>> {
        let documents: Vec<MongoGameDocument> = self
            .games()
            .await
            .find(filter_document(&filter))
            .await
            .map_err(|source| MongoDaoError::FindGames { source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::FindGames { source })?;

        documents.into_iter().map(GameEntity::try_from).collect()
    }

    async fn find_game(&self, id: Uuid) -> MongoResult<Option<GameEntity>> {
        let document = self
            .games()
            .await
            .find_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::LoadGame { id, source })?;

        document.map(GameEntity::try_from).transpose()
    }

    async fn save_game(&self, game: GameEntity) -> MongoResult<()> {
        let id = game.id;
        let document: MongoGameDocument = game.into();
        self.games()
            .await
            .replace_one(doc_id(id), &document)
            .upsert(true)
            .await
            .map_err(|source| MongoDaoError::SaveGame { id, source })?;
        Ok(())
    }

    async fn delete_game(&self, id: Uuid) -> MongoResult<bool> {
        let result = self
            .games()
            .await
            .delete_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::DeleteGame { id, source })?;
        Ok(result.deleted_count > 0)
    }

    async fn find_admin_where(
        &self,
        key: String,
        query: mongodb::bson::Document,
    ) -> MongoResult<Option<AdminEntity>> {
        let document = self
            .admins()
            .await
            .find_one(query)
            .await
            .map_err(|source| MongoDaoError::LoadAdmin { key, source })?;

        document.map(AdminEntity::try_from).transpose()
    }

    async fn save_admin(&self, admin: AdminEntity) -> MongoResult<()> {
        let id = admin.id;
        let document: MongoAdminDocument = admin.into();
        self.admins()
            .await
            .replace_one(doc_id(id), &document)
            .upsert(true)
            .await
            .map_err(|source| MongoDaoError::SaveAdmin { id, source })?;
        Ok(())
    }
}

impl GameStore for MongoGameStore {
    fn find_games(&self, filter: GameFilter) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_games(filter).await.map_err(Into::into) })
    }

    fn find_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_game(id).await.map_err(Into::into) })
    }

    fn save_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_game(game).await.map_err(Into::into) })
    }

    fn delete_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.delete_game(id).await.map_err(Into::into) })
    }

    fn find_admin(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<AdminEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .find_admin_where(id.to_string(), doc_id(id))
                .await
                .map_err(Into::into)
        })
    }

    fn find_admin_by_openid(
        &self,
        openid: String,
    ) -> BoxFuture<'static, StorageResult<Option<AdminEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let query = doc! {"openid": openid.as_str()};
            store
                .find_admin_where(openid, query)
                .await
                .map_err(Into::into)
        })
    }

    fn save_admin(&self, admin: AdminEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_admin(admin).await.map_err(Into::into) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.ping().await.map_err(Into::into) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.reconnect().await.map_err(Into::into) })
    }
}
