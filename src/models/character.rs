use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::character_entity as characters;

use super::BadgeResponse;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateCharacterRequest {
    #[schema(example = "Sir Pencilot")]
    pub name: String,
    pub character_type_id: i64,
}

/// 奖励增量请求: 经验不允许为负, 光能/生命可正可负
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RewardRequest {
    #[schema(example = 10)]
    pub experience_delta: i64,
    #[schema(example = 5)]
    pub light_delta: i32,
    #[schema(example = 0)]
    pub health_delta: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CharacterResponse {
    pub id: i64,
    pub student_id: i64,
    pub class_id: i64,
    pub character_type_id: i64,
    pub name: String,
    pub level: i32,
    pub experience: i64,
    pub current_health: i32,
    pub max_health: i32,
    pub current_light: i32,
    pub max_light: i32,
    pub strength: i32,
    pub agility: i32,
    pub intelligence: i32,
    pub spirit: i32,
    pub created_at: DateTime<Utc>,
}

impl From<characters::Model> for CharacterResponse {
    fn from(m: characters::Model) -> Self {
        CharacterResponse {
            id: m.id,
            student_id: m.student_id,
            class_id: m.class_id,
            character_type_id: m.character_type_id,
            name: m.name,
            level: m.level,
            experience: m.experience,
            current_health: m.current_health,
            max_health: m.max_health,
            current_light: m.current_light,
            max_light: m.max_light,
            strength: m.strength,
            agility: m.agility,
            intelligence: m.intelligence,
            spirit: m.spirit,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}

/// 奖励结算响应: 更新后的角色 + 升级与徽章信息
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RewardResponse {
    pub character: CharacterResponse,
    pub level_changed: bool,
    pub old_level: i32,
    pub new_level: i32,
    /// 本次结算新解锁的徽章
    pub new_badges: Vec<BadgeResponse>,
}
