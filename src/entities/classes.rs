use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// 班级实体
/// - join_code 全库唯一, 学生凭码加入
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "classes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// 归属教师ID
    pub teacher_id: i64,
    pub name: String,
    /// 加入码 (6位, 唯一)
    pub join_code: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
