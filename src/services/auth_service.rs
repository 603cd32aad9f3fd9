use crate::entities::user_entity as users;
use crate::error::{AppError, AppResult};
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
use crate::utils::{JwtService, hash_password, validate_password, verify_password};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

#[derive(Clone)]
pub struct AuthService {
    pool: DatabaseConnection,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(pool: DatabaseConnection, jwt_service: JwtService) -> Self {
        Self { pool, jwt_service }
    }

    /// 注册账号 (教师或学生)
    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthResponse> {
        validate_username(&request.username)?;
        validate_password(&request.password)?;

        let display_name = request.display_name.trim();
        if display_name.is_empty() || display_name.len() > 128 {
            return Err(AppError::ValidationError(
                "Display name must be between 1 and 128 characters".to_string(),
            ));
        }

        let existing = users::Entity::find()
            .filter(users::Column::Username.eq(request.username.clone()))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::Conflict("Username already taken".to_string()));
        }

        let password_hash = hash_password(&request.password)?;

        let user = users::ActiveModel {
            username: Set(request.username.clone()),
            display_name: Set(display_name.to_string()),
            password_hash: Set(password_hash),
            role: Set(request.role),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Registered {} account {} ({})", user.role, user.id, user.username);

        self.issue_tokens(user)
    }

    /// 用户名密码登录
    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(request.username.clone()))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::AuthError("Invalid username or password".to_string()))?;

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(AppError::AuthError(
                "Invalid username or password".to_string(),
            ));
        }

        self.issue_tokens(user)
    }

    /// 用刷新令牌换一对新令牌
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<AuthResponse> {
        let claims = self.jwt_service.verify_refresh_token(refresh_token)?;

        let user_id: i64 = claims
            .sub
            .parse()
            .map_err(|_| AppError::AuthError("Invalid token subject".to_string()))?;

        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::AuthError("Account no longer exists".to_string()))?;

        self.issue_tokens(user)
    }

    /// 当前登录账号的资料
    pub async fn me(&self, user_id: i64) -> AppResult<UserResponse> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(user.into())
    }

    fn issue_tokens(&self, user: users::Model) -> AppResult<AuthResponse> {
        let role = user.role.to_string();
        let access_token = self.jwt_service.generate_access_token(user.id, &role)?;
        let refresh_token = self.jwt_service.generate_refresh_token(user.id, &role)?;
        let expires_in = self.jwt_service.get_access_token_expires_in();

        Ok(AuthResponse {
            user: user.into(),
            access_token,
            refresh_token,
            expires_in,
        })
    }
}

/// 用户名: 3-32 位, 仅限字母数字与下划线
fn validate_username(username: &str) -> AppResult<()> {
    if username.len() < 3 || username.len() > 32 {
        return Err(AppError::ValidationError(
            "Username must be between 3 and 32 characters".to_string(),
        ));
    }

    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(AppError::ValidationError(
            "Username may only contain letters, digits and underscores".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("ms_rivera").is_ok());
        assert!(validate_username("abc").is_ok());
        assert!(validate_username("ab").is_err()); // 太短
        assert!(validate_username("has space").is_err());
        assert!(validate_username("semi;colon").is_err());
    }
}
