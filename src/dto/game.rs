//! Wire types for the catalog REST API, shared with the draw client.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dao::models::{Difficulty, GameEntity, GameStatus, PlayerCount, VideoEntity},
    dto::{
        format_system_time,
        validation::{validate_not_blank, validate_player_range},
    },
};

/// Supported player range of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, Validate)]
#[validate(schema(function = "validate_player_range"))]
pub struct PlayerCountDto {
    #[validate(range(min = 1))]
    pub min: u32,
    pub max: u32,
    /// Counts the game plays best at; each must lie within `[min, max]`.
    #[serde(default)]
    pub optimal: Vec<u32>,
}

/// Video reference attached to a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VideoDto {
    pub url: String,
    #[serde(default)]
    pub title: String,
    /// Length in seconds.
    #[serde(default)]
    pub duration: u32,
}

/// Game as exposed by `GET /api/games` and friends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub player_count: PlayerCountDto,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub videos: Vec<VideoDto>,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Typical session length in minutes.
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub status: GameStatus,
    /// RFC 3339 creation timestamp.
    #[serde(default)]
    pub created_at: String,
    /// RFC 3339 timestamp of the last update.
    #[serde(default)]
    pub updated_at: String,
}

/// Query accepted by `GET /api/games`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct GameListQuery {
    /// Only list games whose player range contains this count.
    pub player_count: Option<u32>,
    /// Status to list; defaults to `active`.
    pub status: Option<GameStatus>,
}

/// Query accepted by `GET /api/games/random`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RandomQuery {
    /// Only draw among games whose player range contains this count.
    pub player_count: Option<u32>,
}

/// Editable fields of a game, accepted by create and update.
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GameInput {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub description: String,
    #[validate(nested)]
    pub player_count: PlayerCountDto,
    /// Trimmed and deduplicated on save.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub videos: Vec<VideoDto>,
    /// Defaults to `medium`.
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub duration: Option<i64>,
    /// Defaults to `active`.
    #[serde(default)]
    pub status: Option<GameStatus>,
}

/// Acknowledgement returned by `DELETE /api/games/{id}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl From<PlayerCount> for PlayerCountDto {
    fn from(value: PlayerCount) -> Self {
        Self {
            min: value.min,
            max: value.max,
            optimal: value.optimal,
        }
    }
}

impl From<PlayerCountDto> for PlayerCount {
    fn from(value: PlayerCountDto) -> Self {
        Self {
            min: value.min,
            max: value.max,
            optimal: value.optimal,
        }
    }
}

impl From<VideoEntity> for VideoDto {
    fn from(value: VideoEntity) -> Self {
        Self {
            url: value.url,
            title: value.title,
            duration: value.duration,
        }
    }
}

impl From<VideoDto> for VideoEntity {
    fn from(value: VideoDto) -> Self {
        Self {
            url: value.url,
            title: value.title,
            duration: value.duration,
        }
    }
}

impl From<GameEntity> for GameRecord {
    fn from(game: GameEntity) -> Self {
        Self {
            id: game.id,
            name: game.name,
            description: game.description,
            player_count: game.player_count.into(),
            tags: game.tags,
            cover_image: game.cover_image,
            images: game.images,
            videos: game.videos.into_iter().map(Into::into).collect(),
            difficulty: game.difficulty,
            duration: game.duration,
            status: game.status,
            created_at: format_system_time(game.created_at),
            updated_at: format_system_time(game.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(json: &str) -> GameInput {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn record_uses_camel_case_fields() {
        let game = crate::dao::seed::sample_games().remove(0);
        let value = serde_json::to_value(GameRecord::from(game)).unwrap();

        assert_eq!(value["playerCount"]["min"], 6);
        assert_eq!(value["playerCount"]["max"], 18);
        assert_eq!(value["status"], "active");
        assert!(value["coverImage"].is_null());
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn well_formed_input_passes_validation() {
        let input = input(
            r#"{"name":"UNO","description":"cards","playerCount":{"min":2,"max":10,"optimal":[4]},"duration":20}"#,
        );
        assert!(input.validate().is_ok());
    }

    #[test]
    fn blank_name_and_inverted_range_are_rejected() {
        let input = input(
            r#"{"name":"  ","description":"cards","playerCount":{"min":5,"max":4}}"#,
        );
        let errors = input.validate().unwrap_err();
        let fields = errors.errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("player_count"));
    }

    #[test]
    fn optimal_outside_range_and_negative_duration_are_rejected() {
        let input = input(
            r#"{"name":"UNO","description":"cards","playerCount":{"min":2,"max":4,"optimal":[5]},"duration":-1}"#,
        );
        let errors = input.validate().unwrap_err();
        let fields = errors.errors();
        assert!(fields.contains_key("player_count"));
        assert!(fields.contains_key("duration"));
    }

    #[test]
    fn zero_minimum_is_rejected() {
        let input = input(r#"{"name":"UNO","description":"cards","playerCount":{"min":0,"max":4}}"#);
        assert!(input.validate().is_err());
    }
}
