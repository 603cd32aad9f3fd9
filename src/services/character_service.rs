use crate::entities::{
    character_entity as characters, character_type_entity as character_types,
    enrollment_entity as enrollments,
};
use crate::error::{AppError, AppResult};
use crate::models::{CharacterResponse, CreateCharacterRequest, Principal};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

#[derive(Clone)]
pub struct CharacterService {
    pool: DatabaseConnection,
}

impl CharacterService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 学生在已加入的班级里创建自己的角色
    ///
    /// - 必须在册且激活
    /// - 一个班级一个角色
    /// - 初始数值取职业模板, 等级 1 / 经验 0, 生命与光能满值
    pub async fn create_character(
        &self,
        principal: &Principal,
        class_id: i64,
        request: &CreateCharacterRequest,
    ) -> AppResult<CharacterResponse> {
        let student_id = principal.require_student()?;

        let name = request.name.trim();
        if name.is_empty() || name.len() > 64 {
            return Err(AppError::ValidationError(
                "Character name must be between 1 and 64 characters".to_string(),
            ));
        }

        let enrollment = enrollments::Entity::find()
            .filter(enrollments::Column::ClassId.eq(class_id))
            .filter(enrollments::Column::StudentId.eq(student_id))
            .one(&self.pool)
            .await?;
        match enrollment {
            Some(e) if e.is_active => {}
            _ => {
                return Err(AppError::Forbidden(
                    "Not enrolled in this class".to_string(),
                ));
            }
        }

        let existing = characters::Entity::find()
            .filter(characters::Column::ClassId.eq(class_id))
            .filter(characters::Column::StudentId.eq(student_id))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::Conflict(
                "Character already exists for this class".to_string(),
            ));
        }

        let character_type = character_types::Entity::find_by_id(request.character_type_id)
            .one(&self.pool)
            .await?
            .filter(|t| t.is_active)
            .ok_or_else(|| AppError::NotFound("Character type not found".to_string()))?;

        let model = characters::ActiveModel {
            student_id: Set(student_id),
            class_id: Set(class_id),
            character_type_id: Set(character_type.id),
            name: Set(name.to_string()),
            level: Set(1),
            experience: Set(0),
            current_health: Set(character_type.max_health),
            max_health: Set(character_type.max_health),
            current_light: Set(character_type.max_light),
            max_light: Set(character_type.max_light),
            strength: Set(character_type.strength),
            agility: Set(character_type.agility),
            intelligence: Set(character_type.intelligence),
            spirit: Set(character_type.spirit),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!(
            "Student {} created character {} ({}) in class {}",
            student_id,
            model.id,
            model.name,
            class_id
        );

        Ok(model.into())
    }

    /// 学生查看自己在某班级的角色
    pub async fn my_character(
        &self,
        principal: &Principal,
        class_id: i64,
    ) -> AppResult<CharacterResponse> {
        let student_id = principal.require_student()?;

        let character = characters::Entity::find()
            .filter(characters::Column::ClassId.eq(class_id))
            .filter(characters::Column::StudentId.eq(student_id))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Character not found".to_string()))?;

        Ok(character.into())
    }
}
