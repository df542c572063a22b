use std::time::Duration;

use mongodb::options::ClientOptions;

use super::{
    connection::ConnectPolicy,
    error::{MongoDaoError, MongoResult},
};

const DEFAULT_DB: &str = "party_draw";
const DEFAULT_URI: &str = "mongodb://localhost:27017";
/// Applied unless the URI sets `serverSelectionTimeoutMS`, so an unreachable server fails a
/// request quickly instead of after the driver's 30 second default.
const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection settings for the MongoDB catalog backend.
#[derive(Clone)]
pub struct MongoConfig {
    pub options: ClientOptions,
    pub database_name: String,
    pub connect_policy: ConnectPolicy,
}

impl MongoConfig {
    pub async fn from_uri(uri: &str, db_name: Option<&str>) -> MongoResult<Self> {
        let mut options =
            ClientOptions::parse(uri)
                .await
                .map_err(|source| MongoDaoError::InvalidUri {
                    uri: uri.to_owned(),
                    source,
                })?;
        options
            .server_selection_timeout
            .get_or_insert(SERVER_SELECTION_TIMEOUT);
        if options.app_name.is_none() {
            options.app_name = Some(env!("CARGO_PKG_NAME").to_owned());
        }

        Ok(Self {
            options,
            database_name: db_name.unwrap_or(DEFAULT_DB).to_owned(),
            connect_policy: ConnectPolicy::default(),
        })
    }

    /// Read `MONGO_URI` / `MONGO_DB`, defaulting to a local server and the `party_draw` database.
    pub async fn from_env() -> MongoResult<Self> {
        let uri = std::env::var("MONGO_URI").unwrap_or_else(|_| DEFAULT_URI.into());
        let db = std::env::var("MONGO_DB").ok().filter(|db| !db.is_empty());
        Self::from_uri(&uri, db.as_deref()).await
    }
}
