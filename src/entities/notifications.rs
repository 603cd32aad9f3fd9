use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// 站内通知实体 (当前仅升级通知)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// 接收人 (学生) ID
    pub user_id: i64,
    pub character_id: Option<i64>,
    /// 通知类型 (当前固定 "level_up")
    pub kind: String,
    pub body: String,
    pub created_at: Option<DateTime<Utc>>,
    pub read_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
