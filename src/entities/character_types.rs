use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// 职业模板实体 (迁移预置, 运行期只读)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "character_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub description: String,
    /// 初始生命上限
    pub max_health: i32,
    /// 初始光能上限
    pub max_light: i32,
    pub strength: i32,
    pub agility: i32,
    pub intelligence: i32,
    pub spirit: i32,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
