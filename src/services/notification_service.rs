use crate::entities::{character_entity as characters, notification_entity as notifications};
use crate::error::AppResult;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

#[derive(Clone)]
pub struct NotificationService {
    pool: DatabaseConnection,
}

impl NotificationService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 给角色拥有者写一条升级通知
    ///
    /// 调用方负责把失败降级为日志; 本方法只负责落库
    pub async fn notify_level_up(
        &self,
        character: &characters::Model,
        old_level: i32,
        new_level: i32,
    ) -> AppResult<notifications::Model> {
        let body = format!(
            "{} leveled up from {} to {}!",
            character.name, old_level, new_level
        );

        let model = notifications::ActiveModel {
            user_id: Set(character.student_id),
            character_id: Set(Some(character.id)),
            kind: Set("level_up".to_string()),
            body: Set(body),
            created_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(model)
    }
}
