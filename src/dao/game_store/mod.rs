pub mod memory;
#[cfg(feature = "mongo-store")]
pub mod mongodb;

use crate::dao::models::{AdminEntity, GameEntity, GameStatus};
use crate::dao::storage::StorageResult;
use futures::future::BoxFuture;
use uuid::Uuid;

/// Predicate used to look games up in the catalog.
///
/// Every backend must return exactly the records for which [`GameFilter::matches`] holds, so the
/// eligibility rule stays identical whatever database sits behind the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameFilter {
    /// Only return games with this status; `None` returns every status.
    pub status: Option<GameStatus>,
    /// Only return games whose player range contains this count.
    pub player_count: Option<u32>,
}

impl GameFilter {
    /// Filter selecting active games, optionally constrained to a table size.
    pub fn active(player_count: Option<u32>) -> Self {
        Self {
            status: Some(GameStatus::Active),
            player_count,
        }
    }

    /// Evaluate the filter against a single record.
    pub fn matches(&self, game: &GameEntity) -> bool {
        self.admits(game.status, game.player_count.min, game.player_count.max)
    }

    /// Evaluate the filter against a game's status and inclusive `[min, max]` player range.
    ///
    /// This is the one eligibility rule; stores and the client-side pick both go through it.
    pub fn admits(&self, status: GameStatus, min: u32, max: u32) -> bool {
        let status_ok = self.status.is_none_or(|wanted| status == wanted);
        let count_ok = self
            .player_count
            .is_none_or(|count| (min..=max).contains(&count));
        status_ok && count_ok
    }
}

/// Abstraction over the persistence layer for the game catalog and its administrators.
pub trait GameStore: Send + Sync {
    /// Return every game matching `filter`, in store-defined order.
    fn find_games(&self, filter: GameFilter) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>>;
    fn find_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<GameEntity>>>;
    /// Insert or replace a game keyed by its id.
    fn save_game(&self, game: GameEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Remove a game, returning whether it existed.
    fn delete_game(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>>;
    fn find_admin(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<AdminEntity>>>;
    fn find_admin_by_openid(
        &self,
        openid: String,
    ) -> BoxFuture<'static, StorageResult<Option<AdminEntity>>>;
    fn save_admin(&self, admin: AdminEntity) -> BoxFuture<'static, StorageResult<()>>;
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::seed;

    #[test]
    fn active_filter_excludes_inactive_games() {
        let mut game = seed::sample_games().remove(0);
        assert!(GameFilter::active(None).matches(&game));

        game.status = GameStatus::Inactive;
        assert!(!GameFilter::active(None).matches(&game));
        assert!(GameFilter::default().matches(&game));
    }

    #[test]
    fn player_count_filter_uses_inclusive_bounds() {
        let game = seed::sample_games()
            .into_iter()
            .find(|game| game.name == "卡坦岛")
            .unwrap();

        assert!(!GameFilter::active(Some(2)).matches(&game));
        assert!(GameFilter::active(Some(3)).matches(&game));
        assert!(GameFilter::active(Some(4)).matches(&game));
        assert!(!GameFilter::active(Some(5)).matches(&game));
    }

    #[test]
    fn admits_checks_status_and_both_range_ends() {
        let filter = GameFilter::active(Some(6));
        assert!(filter.admits(GameStatus::Active, 6, 18));
        assert!(filter.admits(GameStatus::Active, 2, 6));
        assert!(!filter.admits(GameStatus::Active, 7, 18));
        assert!(!filter.admits(GameStatus::Active, 2, 5));
        assert!(!filter.admits(GameStatus::Inactive, 6, 18));
        assert!(GameFilter::default().admits(GameStatus::Inactive, 1, 1));
    }
}
