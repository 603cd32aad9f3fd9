use crate::entities::class_entity as classes;
use crate::error::{AppError, AppResult};
use rand::Rng;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

/// 加入码字符集 (去掉易混淆的 I/O/0/1)
const JOIN_CODE_CHARS: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// 加入码长度
pub const JOIN_CODE_LEN: usize = 6;

/// 生成一个随机加入码 (不保证唯一)
pub fn generate_join_code() -> String {
    let mut rng = rand::thread_rng();
    (0..JOIN_CODE_LEN)
        .map(|_| JOIN_CODE_CHARS[rng.gen_range(0..JOIN_CODE_CHARS.len())] as char)
        .collect()
}

/// 生成唯一的班级加入码: 碰撞时重试, 超出尝试预算返回 Conflict
pub async fn generate_unique_join_code(
    pool: &DatabaseConnection,
    max_attempts: u32,
) -> AppResult<String> {
    for _ in 0..max_attempts {
        let code = generate_join_code();

        let exists = classes::Entity::find()
            .filter(classes::Column::JoinCode.eq(code.clone()))
            .count(pool)
            .await?;

        if exists == 0 {
            return Ok(code);
        }
    }

    Err(AppError::Conflict(
        "Failed to generate a unique join code".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_join_code_format() {
        let code = generate_join_code();
        assert_eq!(code.len(), JOIN_CODE_LEN);
        assert!(code.bytes().all(|b| JOIN_CODE_CHARS.contains(&b)));
    }

    #[test]
    fn test_generate_join_code_avoids_ambiguous_chars() {
        for _ in 0..50 {
            let code = generate_join_code();
            assert!(!code.contains(['I', 'O', '0', '1']));
        }
    }
}
