//! Seed a MongoDB catalog with the sample party games and the sample administrator.
//!
//! Reads `MONGO_URI` / `MONGO_DB`. Games whose name already exists and admins whose openid
//! already exists are left untouched, so the tool can be re-run safely.

use std::{collections::HashSet, sync::Arc};

use anyhow::Context;
use tracing::info;

use party_draw_back::dao::{
    game_store::{
        GameFilter, GameStore,
        mongodb::{MongoConfig, MongoGameStore},
    },
    seed,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = MongoConfig::from_env()
        .await
        .context("reading MongoDB settings")?;
    let store: Arc<dyn GameStore> = Arc::new(
        MongoGameStore::connect(config)
            .await
            .context("connecting to MongoDB")?,
    );

    let existing: HashSet<String> = store
        .find_games(GameFilter::default())
        .await
        .context("listing existing games")?
        .into_iter()
        .map(|game| game.name)
        .collect();

    let mut inserted = 0usize;
    for game in seed::sample_games() {
        if existing.contains(&game.name) {
            info!(name = %game.name, "game already present; skipping");
            continue;
        }
        let name = game.name.clone();
        store
            .save_game(game)
            .await
            .with_context(|| format!("inserting game `{name}`"))?;
        inserted += 1;
    }
    info!(inserted, "sample games seeded");

    for admin in seed::sample_admins() {
        let present = store
            .find_admin_by_openid(admin.openid.clone())
            .await
            .context("looking up admin")?
            .is_some();
        if present {
            info!(openid = %admin.openid, "admin already present; skipping");
            continue;
        }
        info!(openid = %admin.openid, "creating sample admin");
        store.save_admin(admin).await.context("inserting admin")?;
    }

    Ok(())
}
