use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::selection_record_entity as records;

use super::{BadgeResponse, CharacterResponse};

/// 随机点名请求: 经验/光能奖励都必须非负
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RandomSelectRequest {
    #[schema(example = 10)]
    pub experience_reward: i64,
    #[schema(example = 5)]
    pub light_reward: i32,
}

/// 点名历史查询参数
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SelectionHistoryQuery {
    /// 页码 (默认 1)
    pub page: Option<u32>,
    /// 每页数量 (默认 20)
    pub per_page: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SelectionRecordResponse {
    pub id: i64,
    pub class_id: i64,
    pub teacher_id: i64,
    pub character_id: i64,
    pub selection_type: String,
    pub selection_method: String,
    pub experience_awarded: i64,
    pub light_awarded: i32,
    pub result: String,
    pub created_at: DateTime<Utc>,
}

impl From<records::Model> for SelectionRecordResponse {
    fn from(m: records::Model) -> Self {
        SelectionRecordResponse {
            id: m.id,
            class_id: m.class_id,
            teacher_id: m.teacher_id,
            character_id: m.character_id,
            selection_type: m.selection_type,
            selection_method: m.selection_method,
            experience_awarded: m.experience_awarded,
            light_awarded: m.light_awarded,
            result: m.result,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}

/// 一次点名的完整结果: 台账记录 + 被选角色的结算情况
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SelectionOutcomeResponse {
    pub record: SelectionRecordResponse,
    pub character: CharacterResponse,
    pub level_changed: bool,
    pub new_badges: Vec<BadgeResponse>,
}
