use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{class_entity as classes, enrollment_entity as enrollments};

use super::CharacterResponse;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateClassRequest {
    #[schema(example = "Math 7B")]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct JoinClassRequest {
    #[schema(example = "K7PMQ3")]
    pub join_code: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateEnrollmentRequest {
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClassResponse {
    pub id: i64,
    pub teacher_id: i64,
    pub name: String,
    /// 学生加入班级所用的码
    pub join_code: String,
    pub created_at: DateTime<Utc>,
}

impl From<classes::Model> for ClassResponse {
    fn from(m: classes::Model) -> Self {
        ClassResponse {
            id: m.id,
            teacher_id: m.teacher_id,
            name: m.name,
            join_code: m.join_code,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentResponse {
    pub class_id: i64,
    pub student_id: i64,
    pub is_active: bool,
}

impl From<enrollments::Model> for EnrollmentResponse {
    fn from(m: enrollments::Model) -> Self {
        EnrollmentResponse {
            class_id: m.class_id,
            student_id: m.student_id,
            is_active: m.is_active,
        }
    }
}

/// 花名册条目: 学生 + 其在该班级的角色 (未建角色时为 None)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RosterMemberResponse {
    pub student_id: i64,
    pub display_name: String,
    pub enrollment_active: bool,
    pub character: Option<CharacterResponse>,
}
