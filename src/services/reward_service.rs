use crate::entities::{badge_entity as badges, character_entity as characters, class_entity as classes};
use crate::error::{AppError, AppResult};
use crate::models::Principal;
use crate::services::{BadgeService, NotificationService};
use crate::utils::resolve_level;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, IntoActiveModel, Set,
    TransactionTrait,
};

/// 一次奖励的有符号增量
#[derive(Debug, Clone, Copy)]
pub struct RewardDelta {
    /// 经验增量, 必须 >= 0 (负值是调用方错误)
    pub experience: i64,
    pub light: i32,
    pub health: i32,
}

/// 奖励结算结果
#[derive(Debug, Clone)]
pub struct RewardOutcome {
    pub character: characters::Model,
    pub old_level: i32,
    pub new_level: i32,
    pub level_changed: bool,
    pub new_badges: Vec<badges::Model>,
}

/// 结算后的目标数值 (未落库)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AdjustedStats {
    experience: i64,
    health: i32,
    light: i32,
    old_level: i32,
    new_level: i32,
}

/// 计算奖励落账后的目标数值
///
/// - 生命/光能各自钳制到 [0, max], 任意大的增量也不会越界
/// - 经验下限 0, 无上限; 等级始终由经验重新解析
fn compute_adjusted(character: &characters::Model, delta: &RewardDelta) -> AdjustedStats {
    let clamp_resource = |current: i32, delta: i32, max: i32| -> i32 {
        (i64::from(current) + i64::from(delta)).clamp(0, i64::from(max)) as i32
    };

    let experience = character.experience.saturating_add(delta.experience).max(0);

    AdjustedStats {
        experience,
        health: clamp_resource(character.current_health, delta.health, character.max_health),
        light: clamp_resource(character.current_light, delta.light, character.max_light),
        old_level: resolve_level(character.experience),
        new_level: resolve_level(experience),
    }
}

#[derive(Clone)]
pub struct RewardService {
    pool: DatabaseConnection,
    badge_service: BadgeService,
    notification_service: NotificationService,
}

impl RewardService {
    pub fn new(
        pool: DatabaseConnection,
        badge_service: BadgeService,
        notification_service: NotificationService,
    ) -> Self {
        Self {
            pool,
            badge_service,
            notification_service,
        }
    }

    /// 教师给角色结算一次奖励
    ///
    /// 流程 (显式顺序管道):
    /// 1. 校验增量与归属 (失败在任何写入之前返回)
    /// 2. 事务内: 落账 + 徽章评估
    /// 3. 提交后: 若跨级, 投递升级通知 (失败只记日志)
    pub async fn apply_reward(
        &self,
        principal: &Principal,
        character_id: i64,
        delta: RewardDelta,
    ) -> AppResult<RewardOutcome> {
        let teacher_id = principal.require_teacher()?;

        if delta.experience < 0 {
            return Err(AppError::ValidationError(
                "Experience delta must be non-negative".to_string(),
            ));
        }

        let txn = self.pool.begin().await?;

        let character = characters::Entity::find_by_id(character_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Character not found".to_string()))?;

        let class = classes::Entity::find_by_id(character.class_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Class not found".to_string()))?;
        if class.teacher_id != teacher_id {
            return Err(AppError::Forbidden(
                "Class does not belong to current teacher".to_string(),
            ));
        }

        let outcome = self.grant_tx(&txn, character, &delta).await?;

        txn.commit().await?;

        self.deliver_level_up(&outcome).await;

        Ok(outcome)
    }

    /// 在调用方事务内结算奖励并评估徽章
    ///
    /// 点名流程复用本方法, 使奖励与台账写入落在同一事务里。
    /// 升级通知不在这里投递 (要等事务提交)
    pub async fn grant_tx(
        &self,
        txn: &DatabaseTransaction,
        character: characters::Model,
        delta: &RewardDelta,
    ) -> AppResult<RewardOutcome> {
        if delta.experience < 0 {
            return Err(AppError::ValidationError(
                "Experience delta must be non-negative".to_string(),
            ));
        }

        let adjusted = compute_adjusted(&character, delta);

        let mut am = character.into_active_model();
        am.experience = Set(adjusted.experience);
        am.level = Set(adjusted.new_level);
        am.current_health = Set(adjusted.health);
        am.current_light = Set(adjusted.light);
        am.updated_at = Set(Some(Utc::now()));
        let updated = am.update(txn).await?;

        // 每次经验事件之后统一走同一个评估器
        let new_badges = self.badge_service.evaluate_character_tx(txn, &updated).await?;

        Ok(RewardOutcome {
            character: updated,
            old_level: adjusted.old_level,
            new_level: adjusted.new_level,
            level_changed: adjusted.old_level != adjusted.new_level,
            new_badges,
        })
    }

    /// 跨级时投递升级通知; 投递失败不回滚奖励也不影响请求结果
    pub async fn deliver_level_up(&self, outcome: &RewardOutcome) {
        if !outcome.level_changed {
            return;
        }

        if let Err(e) = self
            .notification_service
            .notify_level_up(&outcome.character, outcome.old_level, outcome.new_level)
            .await
        {
            log::error!(
                "Failed to deliver level-up notification for character {}: {e}",
                outcome.character.id
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn character(experience: i64, health: i32, light: i32) -> characters::Model {
        characters::Model {
            id: 1,
            student_id: 10,
            class_id: 20,
            character_type_id: 1,
            name: "Sir Pencilot".to_string(),
            level: resolve_level(experience),
            experience,
            current_health: health,
            max_health: 80,
            current_light: light,
            max_light: 30,
            strength: 8,
            agility: 4,
            intelligence: 3,
            spirit: 3,
            created_at: None,
            updated_at: None,
        }
    }

    fn delta(experience: i64, light: i32, health: i32) -> RewardDelta {
        RewardDelta {
            experience,
            light,
            health,
        }
    }

    #[test]
    fn test_resources_clamped_to_bounds() {
        let c = character(0, 50, 10);

        // 大正增量钳制到上限
        let up = compute_adjusted(&c, &delta(0, i32::MAX, i32::MAX));
        assert_eq!(up.health, 80);
        assert_eq!(up.light, 30);

        // 大负增量钳制到 0
        let down = compute_adjusted(&c, &delta(0, i32::MIN, i32::MIN));
        assert_eq!(down.health, 0);
        assert_eq!(down.light, 0);
    }

    #[test]
    fn test_experience_has_no_upper_bound() {
        let c = character(2700, 50, 10);
        let adjusted = compute_adjusted(&c, &delta(100_000, 0, 0));
        assert_eq!(adjusted.experience, 102_700);
        assert_eq!(adjusted.new_level, 10);
    }

    #[test]
    fn test_level_change_flag_on_threshold_crossing() {
        // 95 + 10 = 105: 跨过 threshold(2) = 100, 升 1 -> 2
        let c = character(95, 50, 10);
        let adjusted = compute_adjusted(&c, &delta(10, 5, 0));
        assert_eq!(adjusted.experience, 105);
        assert_eq!(adjusted.old_level, 1);
        assert_eq!(adjusted.new_level, 2);
    }

    #[test]
    fn test_no_level_change_within_band() {
        let c = character(100, 50, 10);
        let adjusted = compute_adjusted(&c, &delta(49, 0, 0));
        assert_eq!(adjusted.old_level, 2);
        assert_eq!(adjusted.new_level, 2);
    }

    #[test]
    fn test_nonnegative_delta_never_lowers_level() {
        for start in [0i64, 99, 100, 700, 2699, 2700, 10_000] {
            let c = character(start, 50, 10);
            for gain in [0i64, 1, 10, 1000] {
                let adjusted = compute_adjusted(&c, &delta(gain, 0, 0));
                assert!(adjusted.new_level >= adjusted.old_level);
            }
        }
    }
}
