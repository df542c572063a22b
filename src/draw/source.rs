//! Where the draw view gets its pool and its pick.

use std::sync::Arc;

use futures::future::{self, BoxFuture};

use crate::{
    dao::game_store::GameFilter, draw::error::DrawError, dto::game::GameRecord,
    services::selection_service::pick_uniform,
};

#[cfg(feature = "http-client")]
use crate::draw::config::{ClientConfig, PickLocus};

/// The draw view's only I/O seam.
pub trait PickSource: Send + Sync {
    /// Load the ordered pool of active games accepting `player_count`.
    fn fetch_pool(
        &self,
        player_count: Option<u32>,
    ) -> BoxFuture<'static, Result<Vec<GameRecord>, DrawError>>;

    /// Choose one game for `player_count`. `pool` is the pool currently held by the view.
    fn pick(
        &self,
        player_count: Option<u32>,
        pool: &[GameRecord],
    ) -> BoxFuture<'static, Result<GameRecord, DrawError>>;
}

/// Picks locally from the held pool with the same uniform contract as the server.
///
/// The pool itself still comes from `pool_source`.
#[derive(Clone)]
pub struct LocalPickSource<P> {
    pool_source: P,
}

impl<P: PickSource> LocalPickSource<P> {
    pub fn new(pool_source: P) -> Self {
        Self { pool_source }
    }
}

impl<P: PickSource> PickSource for LocalPickSource<P> {
    fn fetch_pool(
        &self,
        player_count: Option<u32>,
    ) -> BoxFuture<'static, Result<Vec<GameRecord>, DrawError>> {
        self.pool_source.fetch_pool(player_count)
    }

    fn pick(
        &self,
        player_count: Option<u32>,
        pool: &[GameRecord],
    ) -> BoxFuture<'static, Result<GameRecord, DrawError>> {
        let filter = GameFilter::active(player_count);
        let eligible: Vec<&GameRecord> = pool
            .iter()
            .filter(|game| {
                filter.admits(game.status, game.player_count.min, game.player_count.max)
            })
            .collect();

        let picked = pick_uniform(&eligible, &mut rand::rng())
            .map(|game| (*game).clone())
            .ok_or(DrawError::NoEligibleRecords);
        Box::pin(future::ready(picked))
    }
}

/// Build the single pick source a deployment uses.
#[cfg(feature = "http-client")]
pub fn from_config(config: Arc<ClientConfig>) -> Result<Arc<dyn PickSource>, DrawError> {
    let server = http::ServerPickSource::new(config.clone())?;
    Ok(match config.draw.pick_locus {
        PickLocus::Server => Arc::new(server),
        PickLocus::Local => Arc::new(LocalPickSource::new(server)),
    })
}

impl<P: PickSource + ?Sized> PickSource for Arc<P> {
    fn fetch_pool(
        &self,
        player_count: Option<u32>,
    ) -> BoxFuture<'static, Result<Vec<GameRecord>, DrawError>> {
        (**self).fetch_pool(player_count)
    }

    fn pick(
        &self,
        player_count: Option<u32>,
        pool: &[GameRecord],
    ) -> BoxFuture<'static, Result<GameRecord, DrawError>> {
        (**self).pick(player_count, pool)
    }
}

#[cfg(feature = "http-client")]
pub use http::{CatalogClientError, ServerPickSource};

#[cfg(feature = "http-client")]
mod http {
    use std::{sync::Arc, time::Duration};

    use futures::future::BoxFuture;
    use reqwest::{Client, StatusCode};
    use serde::de::DeserializeOwned;
    use thiserror::Error;
    use tracing::debug;

    use super::PickSource;
    use crate::{
        draw::{config::ClientConfig, error::DrawError},
        dto::game::GameRecord,
    };

    const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    /// Failures talking to the catalog API.
    #[derive(Debug, Error)]
    pub enum CatalogClientError {
        /// Building the HTTP client failed (invalid TLS setup, etc).
        #[error("failed to build catalog client")]
        ClientBuilder {
            #[source]
            source: reqwest::Error,
        },
        #[error("failed to send catalog request to `{path}`")]
        RequestSend {
            path: String,
            #[source]
            source: reqwest::Error,
        },
        #[error("unexpected catalog response status {status} for `{path}`")]
        RequestStatus { path: String, status: StatusCode },
        #[error("failed to decode catalog response for `{path}`")]
        DecodeResponse {
            path: String,
            #[source]
            source: reqwest::Error,
        },
    }

    impl From<CatalogClientError> for DrawError {
        fn from(err: CatalogClientError) -> Self {
            match err {
                CatalogClientError::RequestStatus {
                    status: StatusCode::NOT_FOUND,
                    ..
                } => DrawError::NoEligibleRecords,
                other => DrawError::Transient(other.to_string()),
            }
        }
    }

    /// Fetches the pool and the pick from the catalog REST API.
    #[derive(Clone)]
    pub struct ServerPickSource {
        client: Client,
        config: Arc<ClientConfig>,
    }

    impl ServerPickSource {
        pub fn new(config: Arc<ClientConfig>) -> Result<Self, DrawError> {
            let client = Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .map_err(|source| CatalogClientError::ClientBuilder { source })?;
            Ok(Self { client, config })
        }

        async fn get_json<T: DeserializeOwned>(
            client: Client,
            url: String,
            player_count: Option<u32>,
        ) -> Result<T, CatalogClientError> {
            let mut request = client.get(&url);
            if let Some(count) = player_count {
                request = request.query(&[("playerCount", count)]);
            }

            let response = request
                .send()
                .await
                .map_err(|source| CatalogClientError::RequestSend {
                    path: url.clone(),
                    source,
                })?;

            match response.status() {
                status if status.is_success() => response
                    .json::<T>()
                    .await
                    .map_err(|source| CatalogClientError::DecodeResponse { path: url, source }),
                status => Err(CatalogClientError::RequestStatus { path: url, status }),
            }
        }
    }

    impl PickSource for ServerPickSource {
        fn fetch_pool(
            &self,
            player_count: Option<u32>,
        ) -> BoxFuture<'static, Result<Vec<GameRecord>, DrawError>> {
            let client = self.client.clone();
            let config = self.config.clone();
            Box::pin(async move {
                let games: Vec<GameRecord> =
                    Self::get_json(client, config.api_url("/games"), player_count).await?;
                debug!(count = games.len(), ?player_count, "fetched draw pool");
                Ok(games
                    .into_iter()
                    .map(|game| config.resolve_record_media(game))
                    .collect())
            })
        }

        fn pick(
            &self,
            player_count: Option<u32>,
            _pool: &[GameRecord],
        ) -> BoxFuture<'static, Result<GameRecord, DrawError>> {
            let client = self.client.clone();
            let config = self.config.clone();
            Box::pin(async move {
                let game: GameRecord =
                    Self::get_json(client, config.api_url("/games/random"), player_count).await?;
                Ok(config.resolve_record_media(game))
            })
        }
    }

}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::dao::seed;

    /// Pool source returning a fixed list.
    struct FixedPool(Vec<GameRecord>);

    impl PickSource for FixedPool {
        fn fetch_pool(
            &self,
            _player_count: Option<u32>,
        ) -> BoxFuture<'static, Result<Vec<GameRecord>, DrawError>> {
            Box::pin(future::ready(Ok(self.0.clone())))
        }

        fn pick(
            &self,
            _player_count: Option<u32>,
            _pool: &[GameRecord],
        ) -> BoxFuture<'static, Result<GameRecord, DrawError>> {
            Box::pin(future::ready(Err(DrawError::Transient("unused".into()))))
        }
    }

    fn records() -> Vec<GameRecord> {
        seed::sample_games().into_iter().map(Into::into).collect()
    }

    #[tokio::test]
    async fn local_pick_stays_within_the_eligible_pool() {
        let pool = records();
        let source = LocalPickSource::new(FixedPool(pool.clone()));

        for _ in 0..100 {
            let pick = source.pick(Some(3), &pool).await.unwrap();
            assert!(pick.player_count.min <= 3 && 3 <= pick.player_count.max);
        }
        assert_eq!(source.fetch_pool(None).await.unwrap(), pool);
    }

    #[tokio::test]
    async fn local_pick_on_empty_pool_reports_no_eligible_records() {
        let source = LocalPickSource::new(FixedPool(Vec::new()));
        assert_eq!(
            source.pick(Some(20), &records()).await,
            Err(DrawError::NoEligibleRecords)
        );
        assert_eq!(source.pick(None, &[]).await, Err(DrawError::NoEligibleRecords));
    }

    #[test]
    fn local_and_server_share_the_uniform_contract() {
        let pool = records();
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = vec![false; pool.len()];
        for _ in 0..500 {
            let pick = pick_uniform(&pool, &mut rng).unwrap();
            let index = pool.iter().position(|game| game.id == pick.id).unwrap();
            seen[index] = true;
        }
        assert!(seen.into_iter().all(|hit| hit));
    }
}
