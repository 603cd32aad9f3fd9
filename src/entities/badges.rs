use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 徽章解锁条件类型
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(
    rs_type = "String",
    db_type = "Enum",
    enum_name = "badge_condition_type"
)]
#[serde(rename_all = "snake_case")]
pub enum BadgeConditionType {
    /// 达到某等级
    #[sea_orm(string_value = "reach_level")]
    ReachLevel,
    /// 累计经验达到阈值
    #[sea_orm(string_value = "total_experience")]
    TotalExperience,
    /// 被点名次数达到阈值
    #[sea_orm(string_value = "times_selected")]
    TimesSelected,
    /// 完成活动次数达到阈值
    #[sea_orm(string_value = "activities_completed")]
    ActivitiesCompleted,
}

impl std::fmt::Display for BadgeConditionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BadgeConditionType::ReachLevel => write!(f, "reach_level"),
            BadgeConditionType::TotalExperience => write!(f, "total_experience"),
            BadgeConditionType::TimesSelected => write!(f, "times_selected"),
            BadgeConditionType::ActivitiesCompleted => write!(f, "activities_completed"),
        }
    }
}

/// 徽章定义实体 (迁移预置, 运行期只读)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "badges")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// 稳定标识 (唯一)
    pub code: String,
    pub name: String,
    pub description: String,
    pub condition_type: BadgeConditionType,
    /// 条件阈值 (与 condition_type 配合解释)
    pub threshold: i64,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
