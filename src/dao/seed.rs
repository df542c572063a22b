//! Sample catalog shipped with the binary, used to seed empty stores for local runs.

use std::time::SystemTime;

use uuid::Uuid;

use crate::dao::models::{
    AdminEntity, Difficulty, GameEntity, GameStatus, PlayerCount,
};

/// Openid of the sample administrator; replace it with a real identity after deployment.
pub const SAMPLE_ADMIN_OPENID: &str = "test-admin-openid";

struct SampleGame {
    name: &'static str,
    description: &'static str,
    min: u32,
    max: u32,
    optimal: &'static [u32],
    tags: &'static [&'static str],
    difficulty: Difficulty,
    duration: u32,
}

const SAMPLE_GAMES: &[SampleGame] = &[
    SampleGame {
        name: "狼人杀",
        description: "经典的角色扮演推理游戏，玩家分为狼人和村民两大阵营，通过白天投票和夜晚行动来决定胜负。",
        min: 6,
        max: 18,
        optimal: &[8, 9, 10, 11, 12],
        tags: &["推理", "角色扮演", "语言"],
        difficulty: Difficulty::Medium,
        duration: 30,
    },
    SampleGame {
        name: "阿瓦隆",
        description: "一款隐藏身份的团队游戏，好人阵营需要完成任务，而坏人阵营则要破坏任务。",
        min: 5,
        max: 10,
        optimal: &[7, 8, 9],
        tags: &["推理", "团队", "策略"],
        difficulty: Difficulty::Medium,
        duration: 20,
    },
    SampleGame {
        name: "谁是卧底",
        description: "简单有趣的语言游戏，玩家通过描述自己的词语来找出卧底。",
        min: 4,
        max: 12,
        optimal: &[6, 7, 8],
        tags: &["语言", "推理", "休闲"],
        difficulty: Difficulty::Easy,
        duration: 15,
    },
    SampleGame {
        name: "三国杀",
        description: "基于三国历史的卡牌游戏，玩家扮演不同的武将，使用各种策略卡牌进行对战。",
        min: 2,
        max: 10,
        optimal: &[5, 6, 7, 8],
        tags: &["卡牌", "策略", "角色扮演"],
        difficulty: Difficulty::Medium,
        duration: 40,
    },
    SampleGame {
        name: "剧本杀",
        description: "沉浸式角色扮演推理游戏，玩家根据剧本扮演角色，通过搜证和推理找出真相。",
        min: 4,
        max: 8,
        optimal: &[5, 6, 7],
        tags: &["推理", "角色扮演", "剧情"],
        difficulty: Difficulty::Hard,
        duration: 180,
    },
    SampleGame {
        name: "UNO",
        description: "经典的快节奏卡牌游戏，玩家需要尽快出完手中的牌。",
        min: 2,
        max: 10,
        optimal: &[4, 5, 6],
        tags: &["卡牌", "休闲", "快节奏"],
        difficulty: Difficulty::Easy,
        duration: 20,
    },
    SampleGame {
        name: "德州扑克",
        description: "世界上最流行的扑克游戏之一，结合运气和策略。",
        min: 2,
        max: 10,
        optimal: &[6, 7, 8, 9],
        tags: &["卡牌", "策略", "博弈"],
        difficulty: Difficulty::Medium,
        duration: 60,
    },
    SampleGame {
        name: "卡坦岛",
        description: "经典的资源管理和建设游戏，玩家通过收集资源来建设自己的领地。",
        min: 3,
        max: 4,
        optimal: &[3, 4],
        tags: &["策略", "资源管理", "建设"],
        difficulty: Difficulty::Medium,
        duration: 90,
    },
];

/// Build fresh entities for the eight sample party games.
pub fn sample_games() -> Vec<GameEntity> {
    let now = SystemTime::now();
    SAMPLE_GAMES
        .iter()
        .map(|sample| GameEntity {
            id: Uuid::new_v4(),
            name: sample.name.to_owned(),
            description: sample.description.to_owned(),
            player_count: PlayerCount {
                min: sample.min,
                max: sample.max,
                optimal: sample.optimal.to_vec(),
            },
            tags: sample.tags.iter().map(|tag| (*tag).to_owned()).collect(),
            cover_image: None,
            images: Vec::new(),
            videos: Vec::new(),
            difficulty: sample.difficulty,
            duration: Some(sample.duration),
            status: GameStatus::Active,
            created_at: now,
            updated_at: now,
        })
        .collect()
}

/// Build the sample administrator.
pub fn sample_admins() -> Vec<AdminEntity> {
    let now = SystemTime::now();
    vec![AdminEntity {
        id: Uuid::new_v4(),
        openid: SAMPLE_ADMIN_OPENID.to_owned(),
        nickname: Some("管理员".to_owned()),
        role: "admin".to_owned(),
        created_at: now,
        updated_at: now,
    }]
}
