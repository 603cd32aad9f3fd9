use crate::entities::{
    BadgeConditionType, activity_record_entity as activity_records,
    badge_entity as badges, badge_unlock_entity as badge_unlocks,
    character_entity as characters, class_entity as classes,
    selection_record_entity as selection_records,
};
use crate::error::{AppError, AppResult};
use crate::models::{BadgeResponse, BadgeUnlockResponse, Principal};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use std::collections::HashSet;

/// 徽章条件评估所需的角色统计快照
#[derive(Debug, Clone, Copy)]
pub struct BadgeStats {
    pub level: i32,
    pub experience: i64,
    pub times_selected: i64,
    pub activities_completed: i64,
}

/// 单个条件是否满足
fn condition_met(badge: &badges::Model, stats: &BadgeStats) -> bool {
    match badge.condition_type {
        BadgeConditionType::ReachLevel => i64::from(stats.level) >= badge.threshold,
        BadgeConditionType::TotalExperience => stats.experience >= badge.threshold,
        BadgeConditionType::TimesSelected => stats.times_selected >= badge.threshold,
        BadgeConditionType::ActivitiesCompleted => stats.activities_completed >= badge.threshold,
    }
}

/// 过滤出"本次新满足"的徽章: 条件成立且尚未解锁
///
/// 纯函数; 幂等性来源: 已解锁集合里的徽章永远不会再次返回
fn newly_satisfied<'a>(
    definitions: &'a [badges::Model],
    unlocked: &HashSet<i64>,
    stats: &BadgeStats,
) -> Vec<&'a badges::Model> {
    definitions
        .iter()
        .filter(|b| !unlocked.contains(&b.id))
        .filter(|b| condition_met(b, stats))
        .collect()
}

#[derive(Clone)]
pub struct BadgeService {
    pool: DatabaseConnection,
}

impl BadgeService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 对角色做一轮完整的徽章评估, 返回本次新解锁的徽章
    ///
    /// 所有经验/升级事件最终都汇聚到这里; 重复调用 (状态未变) 不产生任何写入。
    /// 在调用方事务内执行, 使解锁与触发它的奖励一起提交或一起回滚
    pub async fn evaluate_character_tx(
        &self,
        txn: &DatabaseTransaction,
        character: &characters::Model,
    ) -> AppResult<Vec<badges::Model>> {
        let definitions = badges::Entity::find()
            .filter(badges::Column::IsActive.eq(true))
            .order_by_asc(badges::Column::Id)
            .all(txn)
            .await?;

        if definitions.is_empty() {
            return Ok(Vec::new());
        }

        let unlocked: HashSet<i64> = badge_unlocks::Entity::find()
            .filter(badge_unlocks::Column::CharacterId.eq(character.id))
            .all(txn)
            .await?
            .into_iter()
            .map(|u| u.badge_id)
            .collect();

        let times_selected = selection_records::Entity::find()
            .filter(selection_records::Column::CharacterId.eq(character.id))
            .count(txn)
            .await? as i64;

        // 活动计数来自活动模块维护的表, 这里只读
        let activities_completed = activity_records::Entity::find()
            .filter(activity_records::Column::CharacterId.eq(character.id))
            .count(txn)
            .await? as i64;

        let stats = BadgeStats {
            level: character.level,
            experience: character.experience,
            times_selected,
            activities_completed,
        };

        let mut granted = Vec::new();
        for badge in newly_satisfied(&definitions, &unlocked, &stats) {
            badge_unlocks::ActiveModel {
                character_id: Set(character.id),
                badge_id: Set(badge.id),
                unlocked_at: Set(Some(Utc::now())),
                ..Default::default()
            }
            .insert(txn)
            .await?;

            log::info!(
                "Character {} unlocked badge {} ({})",
                character.id,
                badge.code,
                badge.name
            );
            granted.push(badge.clone());
        }

        Ok(granted)
    }

    /// 查询某角色已解锁的徽章 (角色拥有者或所在班级的教师可见)
    pub async fn list_unlocked(
        &self,
        principal: &Principal,
        character_id: i64,
    ) -> AppResult<Vec<BadgeUnlockResponse>> {
        let character = characters::Entity::find_by_id(character_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Character not found".to_string()))?;

        self.authorize_view(principal, &character).await?;

        let unlocks = badge_unlocks::Entity::find()
            .filter(badge_unlocks::Column::CharacterId.eq(character_id))
            .order_by_asc(badge_unlocks::Column::UnlockedAt)
            .all(&self.pool)
            .await?;

        if unlocks.is_empty() {
            return Ok(Vec::new());
        }

        let badge_ids: Vec<i64> = unlocks.iter().map(|u| u.badge_id).collect();
        let definitions = badges::Entity::find()
            .filter(badges::Column::Id.is_in(badge_ids))
            .all(&self.pool)
            .await?;

        let list = unlocks
            .into_iter()
            .filter_map(|unlock| {
                definitions
                    .iter()
                    .find(|b| b.id == unlock.badge_id)
                    .map(|badge| BadgeUnlockResponse {
                        badge: BadgeResponse::from(badge.clone()),
                        unlocked_at: unlock.unlocked_at.unwrap_or_else(Utc::now),
                    })
            })
            .collect();

        Ok(list)
    }

    async fn authorize_view(
        &self,
        principal: &Principal,
        character: &characters::Model,
    ) -> AppResult<()> {
        match principal {
            Principal::Student { user_id } => {
                if character.student_id != *user_id {
                    return Err(AppError::Forbidden(
                        "Character belongs to another student".to_string(),
                    ));
                }
            }
            Principal::Teacher { user_id } => {
                let class = classes::Entity::find_by_id(character.class_id)
                    .one(&self.pool)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Class not found".to_string()))?;
                if class.teacher_id != *user_id {
                    return Err(AppError::Forbidden(
                        "Class does not belong to current teacher".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn badge(id: i64, condition_type: BadgeConditionType, threshold: i64) -> badges::Model {
        badges::Model {
            id,
            code: format!("badge_{id}"),
            name: format!("Badge {id}"),
            description: String::new(),
            condition_type,
            threshold,
            is_active: true,
            created_at: None,
        }
    }

    fn stats(level: i32, experience: i64, selected: i64, activities: i64) -> BadgeStats {
        BadgeStats {
            level,
            experience,
            times_selected: selected,
            activities_completed: activities,
        }
    }

    #[test]
    fn test_condition_met_per_type() {
        let s = stats(5, 700, 3, 1);

        assert!(condition_met(&badge(1, BadgeConditionType::ReachLevel, 5), &s));
        assert!(!condition_met(&badge(2, BadgeConditionType::ReachLevel, 6), &s));
        assert!(condition_met(
            &badge(3, BadgeConditionType::TotalExperience, 500),
            &s
        ));
        assert!(!condition_met(
            &badge(4, BadgeConditionType::TotalExperience, 2000),
            &s
        ));
        assert!(condition_met(&badge(5, BadgeConditionType::TimesSelected, 1), &s));
        assert!(!condition_met(
            &badge(6, BadgeConditionType::ActivitiesCompleted, 5),
            &s
        ));
    }

    #[test]
    fn test_newly_satisfied_skips_unlocked() {
        let definitions = vec![
            badge(1, BadgeConditionType::ReachLevel, 2),
            badge(2, BadgeConditionType::TotalExperience, 100),
            badge(3, BadgeConditionType::TimesSelected, 10),
        ];
        let s = stats(3, 250, 2, 0);

        let unlocked = HashSet::new();
        let first: Vec<i64> = newly_satisfied(&definitions, &unlocked, &s)
            .iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(first, vec![1, 2]);

        // 第二轮: 把第一轮结果并入已解锁集合, 状态未变 -> 无新增
        let unlocked: HashSet<i64> = first.into_iter().collect();
        let second = newly_satisfied(&definitions, &unlocked, &s);
        assert!(second.is_empty());
    }
}
