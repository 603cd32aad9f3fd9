use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 角色实体 (学生在某个班级内的化身)
/// 不变量: level 永远等于按 experience 解析出的等级,
/// 两者只能经由奖励结算一起变更
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "characters")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// 拥有者 (学生) ID
    pub student_id: i64,
    pub class_id: i64,
    pub character_type_id: i64,
    pub name: String,
    /// 等级 (>= 1)
    pub level: i32,
    /// 累计经验 (>= 0, 单调不减)
    pub experience: i64,
    pub current_health: i32,
    pub max_health: i32,
    pub current_light: i32,
    pub max_light: i32,
    pub strength: i32,
    pub agility: i32,
    pub intelligence: i32,
    pub spirit: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
