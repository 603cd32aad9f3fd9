use crate::config::GameConfig;
use crate::entities::{
    character_entity as characters, class_entity as classes, enrollment_entity as enrollments,
    selection_record_entity as records,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    PaginatedResponse, PaginationParams, Principal, RandomSelectRequest, SelectionHistoryQuery,
    SelectionRecordResponse,
};
use crate::services::{RewardDelta, RewardOutcome, RewardService};
use chrono::{Duration, Utc};
use rand::Rng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;

/// 一次点名的完整结果
#[derive(Debug, Clone)]
pub struct SelectionOutcome {
    pub record: records::Model,
    pub reward: RewardOutcome,
}

/// 候选池: 排除最近窗口内已被点中的角色; 排空则回退到全名单
/// (宁可重复点到, 也不能让点名永远选不出人)
fn build_candidate_pool<'a>(
    roster: &'a [characters::Model],
    recent_ids: &HashSet<i64>,
) -> Vec<&'a characters::Model> {
    let pool: Vec<&characters::Model> = roster
        .iter()
        .filter(|c| !recent_ids.contains(&c.id))
        .collect();

    if pool.is_empty() {
        roster.iter().collect()
    } else {
        pool
    }
}

/// 每个候选的权重
///
/// 窗口内存在任何历史时, 所有候选都统一得到 bonus 加成。
/// TODO: 加成对每个候选一视同仁, 等于没有改变相对概率;
/// 保留现状待产品确认预期的防重复权重策略后再调整
fn candidate_weights(count: usize, history_present: bool, bonus: f64) -> Vec<f64> {
    let weight = if history_present { 1.0 + bonus } else { 1.0 };
    vec![weight; count]
}

/// 加权抽取: roll ∈ [0, total), 按迭代顺序依次扣减权重, 余量 <= 0 即命中
///
/// 迭代顺序就是花名册查询顺序, 固定输入与固定 roll 下结果确定
fn pick_weighted(weights: &[f64], roll: f64) -> usize {
    let mut remaining = roll;
    for (i, w) in weights.iter().enumerate() {
        remaining -= w;
        if remaining <= 0.0 {
            return i;
        }
    }
    // 浮点误差兜底: 理论上 roll < total 时循环内必定返回
    weights.len() - 1
}

#[derive(Clone)]
pub struct SelectionService {
    pool: DatabaseConnection,
    reward_service: RewardService,
    game: GameConfig,
    /// 按班级互斥: 同一班级同一时刻只允许一次抽取+结算
    class_locks: Arc<Mutex<HashMap<i64, Arc<Mutex<()>>>>>,
}

impl SelectionService {
    pub fn new(pool: DatabaseConnection, reward_service: RewardService, game: GameConfig) -> Self {
        Self {
            pool,
            reward_service,
            game,
            class_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// 随机点一名学生的角色并发放奖励
    ///
    /// 算法:
    /// 1. 读活跃花名册 (在册学生已建的角色)
    /// 2. 读最近窗口内的点名台账
    /// 3. 构建候选池 (排除最近点中; 排空则回退全名单)
    /// 4. 加权随机抽取
    /// 5. 结算奖励 (与 6 同一事务)
    /// 6. 追加台账记录
    ///
    /// 花名册为空返回 Conflict, 不产生任何写入
    pub async fn select_random(
        &self,
        principal: &Principal,
        class_id: i64,
        request: &RandomSelectRequest,
    ) -> AppResult<SelectionOutcome> {
        let teacher_id = principal.require_teacher()?;

        if request.experience_reward < 0 || request.light_reward < 0 {
            return Err(AppError::ValidationError(
                "Reward amounts must be non-negative".to_string(),
            ));
        }

        let lock = self.class_lock(class_id).await;
        let _guard = lock.lock().await;

        let txn = self.pool.begin().await?;

        let class = classes::Entity::find_by_id(class_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Class not found".to_string()))?;
        if class.teacher_id != teacher_id {
            return Err(AppError::Forbidden(
                "Class does not belong to current teacher".to_string(),
            ));
        }

        let roster = self.fetch_active_roster(&txn, class_id).await?;
        if roster.is_empty() {
            return Err(AppError::Conflict(
                "No eligible characters in this class".to_string(),
            ));
        }

        let window_start = Utc::now() - Duration::hours(self.game.selection_window_hours);
        let recent = records::Entity::find()
            .filter(records::Column::ClassId.eq(class_id))
            .filter(records::Column::CreatedAt.gt(window_start))
            .all(&txn)
            .await?;
        let recent_ids: HashSet<i64> = recent.iter().map(|r| r.character_id).collect();

        let candidates = build_candidate_pool(&roster, &recent_ids);
        let weights = candidate_weights(
            candidates.len(),
            !recent.is_empty(),
            self.game.recent_bonus_weight,
        );
        let total: f64 = weights.iter().sum();
        let roll = rand::thread_rng().gen_range(0.0..total);
        let chosen = candidates[pick_weighted(&weights, roll)].clone();

        // 奖励结算与台账写入在同一事务里: 要么都生效, 要么都不生效
        let delta = RewardDelta {
            experience: request.experience_reward,
            light: request.light_reward,
            health: 0,
        };
        let reward = self.reward_service.grant_tx(&txn, chosen, &delta).await?;

        let result = format!(
            "{} was selected: +{} XP, +{} light",
            reward.character.name, request.experience_reward, request.light_reward
        );
        let record = records::ActiveModel {
            class_id: Set(class_id),
            teacher_id: Set(teacher_id),
            character_id: Set(reward.character.id),
            selection_type: Set("random".to_string()),
            selection_method: Set("weighted".to_string()),
            experience_awarded: Set(request.experience_reward),
            light_awarded: Set(request.light_reward),
            result: Set(result),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        // 升级通知在提交之后投递, 失败只记日志
        self.reward_service.deliver_level_up(&reward).await;

        Ok(SelectionOutcome { record, reward })
    }

    /// 分页获取班级点名台账 (倒序, 最近的在前)
    pub async fn list_records(
        &self,
        principal: &Principal,
        class_id: i64,
        query: &SelectionHistoryQuery,
    ) -> AppResult<PaginatedResponse<SelectionRecordResponse>> {
        let teacher_id = principal.require_teacher()?;

        let class = classes::Entity::find_by_id(class_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Class not found".to_string()))?;
        if class.teacher_id != teacher_id {
            return Err(AppError::Forbidden(
                "Class does not belong to current teacher".to_string(),
            ));
        }

        let params = PaginationParams::new(query.page, query.per_page);
        let offset = params.get_offset();
        let limit = params.get_limit();

        let base_query = records::Entity::find().filter(records::Column::ClassId.eq(class_id));

        let total = base_query.clone().count(&self.pool).await? as i64;

        let items_models = base_query
            .order_by(records::Column::CreatedAt, Order::Desc)
            .order_by(records::Column::Id, Order::Desc)
            .limit(limit as u64)
            .offset(offset as u64)
            .all(&self.pool)
            .await?;

        let items: Vec<SelectionRecordResponse> =
            items_models.into_iter().map(Into::into).collect();

        Ok(PaginatedResponse::new(
            items,
            params.get_page(),
            params.get_per_page(),
            total,
        ))
    }

    /// 活跃花名册: 班级里在册 (enrollment 激活) 学生已建的角色
    async fn fetch_active_roster<C: ConnectionTrait>(
        &self,
        conn: &C,
        class_id: i64,
    ) -> AppResult<Vec<characters::Model>> {
        let active_student_ids: Vec<i64> = enrollments::Entity::find()
            .filter(enrollments::Column::ClassId.eq(class_id))
            .filter(enrollments::Column::IsActive.eq(true))
            .all(conn)
            .await?
            .into_iter()
            .map(|e| e.student_id)
            .collect();

        if active_student_ids.is_empty() {
            return Ok(Vec::new());
        }

        let roster = characters::Entity::find()
            .filter(characters::Column::ClassId.eq(class_id))
            .filter(characters::Column::StudentId.is_in(active_student_ids))
            .order_by_asc(characters::Column::Id)
            .all(conn)
            .await?;

        Ok(roster)
    }

    async fn class_lock(&self, class_id: i64) -> Arc<Mutex<()>> {
        let mut locks = self.class_locks.lock().await;
        locks
            .entry(class_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::resolve_level;

    fn character(id: i64) -> characters::Model {
        characters::Model {
            id,
            student_id: id + 100,
            class_id: 1,
            character_type_id: 1,
            name: format!("char-{id}"),
            level: resolve_level(0),
            experience: 0,
            current_health: 50,
            max_health: 80,
            current_light: 10,
            max_light: 30,
            strength: 5,
            agility: 5,
            intelligence: 5,
            spirit: 5,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_pool_excludes_recent() {
        let roster = vec![character(1), character(2), character(3)];
        let recent: HashSet<i64> = [2].into_iter().collect();

        let pool = build_candidate_pool(&roster, &recent);
        let ids: Vec<i64> = pool.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_pool_falls_back_to_full_roster() {
        let roster = vec![character(1), character(2)];
        let recent: HashSet<i64> = [1, 2].into_iter().collect();

        // 全员都在窗口内: 回退到全名单, 绝不空转
        let pool = build_candidate_pool(&roster, &recent);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_pool_keeps_all_but_one_excluded() {
        let roster = vec![character(1), character(2), character(3)];
        let recent: HashSet<i64> = [1, 2].into_iter().collect();

        let pool = build_candidate_pool(&roster, &recent);
        let ids: Vec<i64> = pool.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn test_weights_uniform_without_history() {
        let weights = candidate_weights(3, false, 0.5);
        assert_eq!(weights, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_weights_uniform_bonus_with_history() {
        let weights = candidate_weights(3, true, 0.5);
        assert_eq!(weights, vec![1.5, 1.5, 1.5]);
    }

    #[test]
    fn test_pick_single_candidate_always_wins() {
        let weights = vec![1.0];
        assert_eq!(pick_weighted(&weights, 0.0), 0);
        assert_eq!(pick_weighted(&weights, 0.5), 0);
        assert_eq!(pick_weighted(&weights, 0.999), 0);
    }

    #[test]
    fn test_pick_walks_in_iteration_order() {
        let weights = vec![1.0, 1.0, 1.0];
        assert_eq!(pick_weighted(&weights, 0.0), 0);
        assert_eq!(pick_weighted(&weights, 0.5), 0);
        assert_eq!(pick_weighted(&weights, 1.5), 1);
        assert_eq!(pick_weighted(&weights, 2.5), 2);
        assert_eq!(pick_weighted(&weights, 2.999), 2);
    }

    #[test]
    fn test_pick_clamps_float_edge_to_last() {
        let weights = vec![1.0, 1.0];
        // roll 超出总权重只可能来自浮点误差, 兜底取最后一个
        assert_eq!(pick_weighted(&weights, 2.1), 1);
    }
}
