use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// 活动参与记录实体
/// 由活动模块写入; 本服务只读, 徽章评估按角色计数
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "activity_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub character_id: i64,
    pub activity_name: String,
    pub score: i32,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
