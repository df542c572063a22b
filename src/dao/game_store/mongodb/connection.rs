use std::time::Duration;

use mongodb::{Client, Database, bson::doc};
use tokio::time::sleep;
use tracing::{info, warn};

use super::{
    config::MongoConfig,
    error::{MongoDaoError, MongoResult},
};

/// How many pings `open` spends before giving up.
///
/// Kept short: the storage supervisor retries whole connections with its own backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectPolicy {
    pub attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for ConnectPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            initial_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(2),
        }
    }
}

impl ConnectPolicy {
    /// Waits between consecutive attempts, doubling up to `max_delay`.
    fn backoff(&self) -> impl Iterator<Item = Duration> + use<> {
        let max = self.max_delay;
        std::iter::successors(Some(self.initial_delay.min(max)), move |delay| {
            Some((*delay * 2).min(max))
        })
    }
}

/// Build a client for the catalog database and wait until it answers a ping.
pub async fn open(config: &MongoConfig) -> MongoResult<(Client, Database)> {
    let client = Client::with_options(config.options.clone())
        .map_err(|source| MongoDaoError::ClientConstruction { source })?;
    let database = client.database(&config.database_name);

    let max_attempts = config.connect_policy.attempts.max(1);
    let mut backoff = config.connect_policy.backoff();
    let mut attempts = 0;

    loop {
        attempts += 1;
        match database.run_command(doc! { "ping": 1 }).await {
            Ok(_) => {
                if attempts > 1 {
                    info!(attempts, database = %config.database_name, "MongoDB answered after retry");
                }
                return Ok((client, database));
            }
            Err(source) if attempts >= max_attempts => {
                return Err(MongoDaoError::InitialPing { attempts, source });
            }
            Err(err) => {
                let delay = backoff.next().unwrap_or(config.connect_policy.max_delay);
                warn!(
                    attempts,
                    wait_ms = delay.as_millis(),
                    error = %err,
                    "MongoDB ping failed while connecting; retrying"
                );
                sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_up_to_the_cap() {
        let policy = ConnectPolicy {
            attempts: 5,
            initial_delay: Duration::from_millis(300),
            max_delay: Duration::from_secs(1),
        };
        let delays: Vec<_> = policy.backoff().take(4).collect();
        assert_eq!(
            delays,
            vec![
                Duration::from_millis(300),
                Duration::from_millis(600),
                Duration::from_secs(1),
                Duration::from_secs(1),
            ]
        );
    }
}
