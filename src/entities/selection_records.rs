use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 随机点名台账实体
/// 说明:
/// - 每次教师发起随机点名产生一条记录
/// - result 冗余存储人类可读结果 (角色改名或删除后仍可回溯)
/// - 审计台账: 只插入, 正常流程不更新不删除
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "selection_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub class_id: i64,
    /// 发起点名的教师ID
    pub teacher_id: i64,
    /// 被选中的角色ID
    pub character_id: i64,
    /// 点名类型 (当前固定 "random")
    pub selection_type: String,
    /// 抽取方法 (当前固定 "weighted")
    pub selection_method: String,
    /// 发放的经验
    pub experience_awarded: i64,
    /// 发放的光能
    pub light_awarded: i32,
    /// 人类可读结果摘要
    pub result: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
