use mongodb::bson::{DateTime, Document, doc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dao::models::{
    AdminEntity, Difficulty, GameEntity, GameStatus, PlayerCount, VideoEntity,
};

use super::error::{MongoDaoError, MongoResult};

/// Shape of a game as stored in the `games` collection.
///
/// Ids are stored as hyphenated strings so documents stay readable from the Mongo shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoGameDocument {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    description: String,
    player_count: PlayerCount,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    cover_image: Option<String>,
    #[serde(default)]
    images: Vec<String>,
    #[serde(default)]
    videos: Vec<VideoEntity>,
    #[serde(default)]
    difficulty: Difficulty,
    #[serde(default)]
    duration: Option<u32>,
    #[serde(default)]
    status: GameStatus,
    created_at: DateTime,
    updated_at: DateTime,
}

impl From<GameEntity> for MongoGameDocument {
    fn from(value: GameEntity) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            description: value.description,
            player_count: value.player_count,
            tags: value.tags,
            cover_image: value.cover_image,
            images: value.images,
            videos: value.videos,
            difficulty: value.difficulty,
            duration: value.duration,
            status: value.status,
            created_at: DateTime::from_system_time(value.created_at),
            updated_at: DateTime::from_system_time(value.updated_at),
        }
    }
}

impl TryFrom<MongoGameDocument> for GameEntity {
    type Error = MongoDaoError;

    fn try_from(value: MongoGameDocument) -> MongoResult<Self> {
        Ok(Self {
            id: parse_id(&value.id)?,
            name: value.name,
            description: value.description,
            player_count: value.player_count,
            tags: value.tags,
            cover_image: value.cover_image,
            images: value.images,
            videos: value.videos,
            difficulty: value.difficulty,
            duration: value.duration,
            status: value.status,
            created_at: value.created_at.to_system_time(),
            updated_at: value.updated_at.to_system_time(),
        })
    }
}

/// Shape of an administrator as stored in the `admins` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoAdminDocument {
    #[serde(rename = "_id")]
    id: String,
    openid: String,
    #[serde(default)]
    nickname: Option<String>,
    role: String,
    created_at: DateTime,
    updated_at: DateTime,
}

impl From<AdminEntity> for MongoAdminDocument {
    fn from(value: AdminEntity) -> Self {
        Self {
            id: value.id.to_string(),
            openid: value.openid,
            nickname: value.nickname,
            role: value.role,
            created_at: DateTime::from_system_time(value.created_at),
            updated_at: DateTime::from_system_time(value.updated_at),
        }
    }
}

impl TryFrom<MongoAdminDocument> for AdminEntity {
    type Error = MongoDaoError;

    fn try_from(value: MongoAdminDocument) -> MongoResult<Self> {
        Ok(Self {
            id: parse_id(&value.id)?,
            openid: value.openid,
            nickname: value.nickname,
            role: value.role,
            created_at: value.created_at.to_system_time(),
            updated_at: value.updated_at.to_system_time(),
        })
    }
}

fn parse_id(raw: &str) -> MongoResult<Uuid> {
    Uuid::parse_str(raw).map_err(|err| MongoDaoError::InvalidDocument {
        id: raw.to_owned(),
        reason: err.to_string(),
    })
}

pub fn doc_id(id: Uuid) -> Document {
    doc! {"_id": id.to_string()}
}

/// Translate a [`GameFilter`](crate::dao::game_store::GameFilter) into a query document.
pub fn filter_document(filter: &crate::dao::game_store::GameFilter) -> Document {
    let mut query = Document::new();
    if let Some(status) = filter.status {
        let status = match status {
            GameStatus::Active => "active",
            GameStatus::Inactive => "inactive",
        };
        query.insert("status", status);
    }
    if let Some(count) = filter.player_count {
        query.insert("player_count.min", doc! { "$lte": i64::from(count) });
        query.insert("player_count.max", doc! { "$gte": i64::from(count) });
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::game_store::GameFilter;

    #[test]
    fn filter_document_encodes_range_predicate() {
        let query = filter_document(&GameFilter::active(Some(7)));
        assert_eq!(
            query,
            doc! {
                "status": "active",
                "player_count.min": { "$lte": 7_i64 },
                "player_count.max": { "$gte": 7_i64 },
            }
        );
    }

    #[test]
    fn unfiltered_query_is_empty() {
        assert!(filter_document(&GameFilter::default()).is_empty());
    }
}
