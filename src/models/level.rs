use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LevelThresholdResponse {
    pub level: i32,
    /// 达到该等级所需累计经验
    pub experience_required: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ResolveLevelQuery {
    pub experience: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResolveLevelResponse {
    pub experience: i64,
    pub level: i32,
}
