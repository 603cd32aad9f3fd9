use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{UserRole, user_entity as users};
use crate::error::{AppError, AppResult};

/// 鉴权边界解析出的调用主体
///
/// 封闭两态: 要么教师要么学生, 在中间件处一次性确定,
/// 之后显式传入各业务操作, 不再做运行时角色猜测
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Principal {
    Teacher { user_id: i64 },
    Student { user_id: i64 },
}

impl Principal {
    pub fn new(role: UserRole, user_id: i64) -> Self {
        match role {
            UserRole::Teacher => Principal::Teacher { user_id },
            UserRole::Student => Principal::Student { user_id },
        }
    }

    pub fn user_id(&self) -> i64 {
        match self {
            Principal::Teacher { user_id } | Principal::Student { user_id } => *user_id,
        }
    }

    /// 要求教师身份, 返回教师的用户ID
    pub fn require_teacher(&self) -> AppResult<i64> {
        match self {
            Principal::Teacher { user_id } => Ok(*user_id),
            Principal::Student { .. } => Err(AppError::Forbidden(
                "Teacher role required".to_string(),
            )),
        }
    }

    /// 要求学生身份, 返回学生的用户ID
    pub fn require_student(&self) -> AppResult<i64> {
        match self {
            Principal::Student { user_id } => Ok(*user_id),
            Principal::Teacher { .. } => Err(AppError::Forbidden(
                "Student role required".to_string(),
            )),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "ms_rivera")]
    pub username: String,
    #[schema(example = "classquest1")]
    pub password: String,
    #[schema(example = "Ms. Rivera")]
    pub display_name: String,
    pub role: UserRole,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ms_rivera")]
    pub username: String,
    #[schema(example = "classquest1")]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl From<users::Model> for UserResponse {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            display_name: user.display_name,
            role: user.role,
            created_at: user.created_at.unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_role_gates() {
        let teacher = Principal::new(UserRole::Teacher, 7);
        let student = Principal::new(UserRole::Student, 9);

        assert_eq!(teacher.require_teacher().unwrap(), 7);
        assert!(teacher.require_student().is_err());
        assert_eq!(student.require_student().unwrap(), 9);
        assert!(student.require_teacher().is_err());
        assert_eq!(teacher.user_id(), 7);
        assert_eq!(student.user_id(), 9);
    }
}
