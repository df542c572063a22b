use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use utoipa::ToSchema;
use uuid::Uuid;

/// Advisory difficulty label attached to a game.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Publication status; only active games take part in listing and draws by default.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Active,
    Inactive,
}

/// Supported range of players for a game.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerCount {
    /// Smallest supported table (at least 1).
    pub min: u32,
    /// Largest supported table (never below `min`).
    pub max: u32,
    /// Player counts the game plays best at, in display order.
    #[serde(default)]
    pub optimal: Vec<u32>,
}

/// Video attached to a game, referenced by relative media path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoEntity {
    pub url: String,
    pub title: String,
    /// Length in seconds.
    pub duration: u32,
}

/// Game record persisted by the catalog store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameEntity {
    /// Primary key, assigned on creation and never changed.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Free-form rules summary.
    pub description: String,
    /// Supported player range.
    pub player_count: PlayerCount,
    /// Short labels, deduplicated when edited.
    pub tags: Vec<String>,
    /// Relative path of the cover image, if any.
    pub cover_image: Option<String>,
    /// Relative paths of gallery images.
    pub images: Vec<String>,
    /// Attached videos.
    pub videos: Vec<VideoEntity>,
    /// Advisory difficulty.
    pub difficulty: Difficulty,
    /// Typical session length in minutes.
    pub duration: Option<u32>,
    /// Whether the game is visible to listing and draws.
    pub status: GameStatus,
    /// Creation timestamp.
    pub created_at: SystemTime,
    /// Last time the record was updated.
    pub updated_at: SystemTime,
}

/// Administrator identity allowed to mutate the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminEntity {
    pub id: Uuid,
    /// External identity the admin signs in with.
    pub openid: String,
    pub nickname: Option<String>,
    pub role: String,
    pub created_at: SystemTime,
    pub updated_at: SystemTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_use_lowercase_wire_names() {
        assert_eq!(
            serde_json::to_string(&GameStatus::Inactive).unwrap(),
            "\"inactive\""
        );
        assert_eq!(
            serde_json::from_str::<Difficulty>("\"hard\"").unwrap(),
            Difficulty::Hard
        );
    }
}
