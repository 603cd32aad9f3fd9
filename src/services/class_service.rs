use crate::config::GameConfig;
use crate::entities::{
    UserRole, character_entity as characters, class_entity as classes,
    enrollment_entity as enrollments, user_entity as users,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    CharacterResponse, ClassResponse, CreateClassRequest, EnrollmentResponse, JoinClassRequest,
    Principal, RosterMemberResponse,
};
use crate::utils::generate_unique_join_code;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};

#[derive(Clone)]
pub struct ClassService {
    pool: DatabaseConnection,
    game: GameConfig,
}

impl ClassService {
    pub fn new(pool: DatabaseConnection, game: GameConfig) -> Self {
        Self { pool, game }
    }

    /// 教师创建班级, 自动生成唯一加入码
    pub async fn create_class(
        &self,
        principal: &Principal,
        request: &CreateClassRequest,
    ) -> AppResult<ClassResponse> {
        let teacher_id = principal.require_teacher()?;

        let name = request.name.trim();
        if name.is_empty() || name.len() > 64 {
            return Err(AppError::ValidationError(
                "Class name must be between 1 and 64 characters".to_string(),
            ));
        }

        let join_code =
            generate_unique_join_code(&self.pool, self.game.join_code_max_attempts).await?;

        let model = classes::ActiveModel {
            teacher_id: Set(teacher_id),
            name: Set(name.to_string()),
            join_code: Set(join_code),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Teacher {} created class {} ({})", teacher_id, model.id, model.name);

        Ok(model.into())
    }

    /// 列出与当前主体相关的班级:
    /// - 教师: 自己创建的班级
    /// - 学生: 自己在册 (激活) 的班级
    pub async fn list_classes(&self, principal: &Principal) -> AppResult<Vec<ClassResponse>> {
        let list = match principal {
            Principal::Teacher { user_id } => {
                classes::Entity::find()
                    .filter(classes::Column::TeacherId.eq(*user_id))
                    .order_by_asc(classes::Column::Id)
                    .all(&self.pool)
                    .await?
            }
            Principal::Student { user_id } => {
                let class_ids: Vec<i64> = enrollments::Entity::find()
                    .filter(enrollments::Column::StudentId.eq(*user_id))
                    .filter(enrollments::Column::IsActive.eq(true))
                    .all(&self.pool)
                    .await?
                    .into_iter()
                    .map(|e| e.class_id)
                    .collect();

                if class_ids.is_empty() {
                    Vec::new()
                } else {
                    classes::Entity::find()
                        .filter(classes::Column::Id.is_in(class_ids))
                        .order_by_asc(classes::Column::Id)
                        .all(&self.pool)
                        .await?
                }
            }
        };

        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 学生凭加入码加入班级; 曾退出的学生重新加入时恢复原选课记录
    pub async fn join_class(
        &self,
        principal: &Principal,
        request: &JoinClassRequest,
    ) -> AppResult<EnrollmentResponse> {
        let student_id = principal.require_student()?;

        let code = request.join_code.trim().to_uppercase();
        if code.is_empty() {
            return Err(AppError::ValidationError(
                "Join code must not be empty".to_string(),
            ));
        }

        let class = classes::Entity::find()
            .filter(classes::Column::JoinCode.eq(code))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("No class found for this join code".to_string()))?;

        let existing = enrollments::Entity::find()
            .filter(enrollments::Column::ClassId.eq(class.id))
            .filter(enrollments::Column::StudentId.eq(student_id))
            .one(&self.pool)
            .await?;

        let enrollment = match existing {
            Some(e) if e.is_active => {
                return Err(AppError::Conflict(
                    "Already enrolled in this class".to_string(),
                ));
            }
            Some(e) => {
                // 重新激活
                let mut am = e.into_active_model();
                am.is_active = Set(true);
                am.updated_at = Set(Some(Utc::now()));
                am.update(&self.pool).await?
            }
            None => {
                enrollments::ActiveModel {
                    class_id: Set(class.id),
                    student_id: Set(student_id),
                    is_active: Set(true),
                    ..Default::default()
                }
                .insert(&self.pool)
                .await?
            }
        };

        Ok(enrollment.into())
    }

    /// 教师启停某学生的选课状态 (停用后其角色不再进入点名候选)
    pub async fn update_enrollment(
        &self,
        principal: &Principal,
        class_id: i64,
        student_id: i64,
        is_active: bool,
    ) -> AppResult<EnrollmentResponse> {
        let teacher_id = principal.require_teacher()?;
        self.find_owned_class(class_id, teacher_id).await?;

        let enrollment = enrollments::Entity::find()
            .filter(enrollments::Column::ClassId.eq(class_id))
            .filter(enrollments::Column::StudentId.eq(student_id))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Enrollment not found".to_string()))?;

        let mut am = enrollment.into_active_model();
        am.is_active = Set(is_active);
        am.updated_at = Set(Some(Utc::now()));
        let updated = am.update(&self.pool).await?;

        Ok(updated.into())
    }

    /// 教师查看班级花名册: 在册学生 + 其角色 (未建角色显示空位)
    pub async fn roster(
        &self,
        principal: &Principal,
        class_id: i64,
    ) -> AppResult<Vec<RosterMemberResponse>> {
        let teacher_id = principal.require_teacher()?;
        self.find_owned_class(class_id, teacher_id).await?;

        let enrollment_list = enrollments::Entity::find()
            .filter(enrollments::Column::ClassId.eq(class_id))
            .order_by_asc(enrollments::Column::Id)
            .all(&self.pool)
            .await?;

        if enrollment_list.is_empty() {
            return Ok(Vec::new());
        }

        let student_ids: Vec<i64> = enrollment_list.iter().map(|e| e.student_id).collect();

        let students = users::Entity::find()
            .filter(users::Column::Id.is_in(student_ids))
            .filter(users::Column::Role.eq(UserRole::Student))
            .all(&self.pool)
            .await?;

        let class_characters = characters::Entity::find()
            .filter(characters::Column::ClassId.eq(class_id))
            .all(&self.pool)
            .await?;

        let roster = enrollment_list
            .into_iter()
            .filter_map(|enrollment| {
                let student = students.iter().find(|u| u.id == enrollment.student_id)?;
                let character = class_characters
                    .iter()
                    .find(|c| c.student_id == enrollment.student_id)
                    .cloned()
                    .map(CharacterResponse::from);

                Some(RosterMemberResponse {
                    student_id: student.id,
                    display_name: student.display_name.clone(),
                    enrollment_active: enrollment.is_active,
                    character,
                })
            })
            .collect();

        Ok(roster)
    }

    async fn find_owned_class(&self, class_id: i64, teacher_id: i64) -> AppResult<classes::Model> {
        let class = classes::Entity::find_by_id(class_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Class not found".to_string()))?;

        if class.teacher_id != teacher_id {
            return Err(AppError::Forbidden(
                "Class does not belong to current teacher".to_string(),
            ));
        }

        Ok(class)
    }
}
