use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{BadgeConditionType, badge_entity as badges};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BadgeResponse {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub description: String,
    pub condition_type: BadgeConditionType,
    pub threshold: i64,
}

impl From<badges::Model> for BadgeResponse {
    fn from(m: badges::Model) -> Self {
        BadgeResponse {
            id: m.id,
            code: m.code,
            name: m.name,
            description: m.description,
            condition_type: m.condition_type,
            threshold: m.threshold,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BadgeUnlockResponse {
    pub badge: BadgeResponse,
    pub unlocked_at: DateTime<Utc>,
}
