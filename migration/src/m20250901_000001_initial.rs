use sea_orm_migration::prelude::*;
use sea_orm_migration::prelude::extension::postgres::Type;
use sea_orm_migration::sea_orm::Statement;

/// Users (教师与学生共用一张表, 通过 role 区分)
#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    DisplayName,
    PasswordHash,
    Role,
    CreatedAt,
    UpdatedAt,
}

/// Classes (班级, 归属某个教师, 持有唯一加入码)
#[derive(DeriveIden)]
enum Classes {
    Table,
    Id,
    TeacherId,
    Name,
    JoinCode,
    CreatedAt,
    UpdatedAt,
}

/// Enrollments (选课关系, 激活/停用开关而非删除)
#[derive(DeriveIden)]
enum Enrollments {
    Table,
    Id,
    ClassId,
    StudentId,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

/// Character Types (角色职业模板, 静态配置)
#[derive(DeriveIden)]
enum CharacterTypes {
    Table,
    Id,
    Name,
    Description,
    MaxHealth,
    MaxLight,
    Strength,
    Agility,
    Intelligence,
    Spirit,
    IsActive,
    CreatedAt,
}

/// Characters (学生在某个班级内的角色)
#[derive(DeriveIden)]
enum Characters {
    Table,
    Id,
    StudentId,
    ClassId,
    CharacterTypeId,
    Name,
    Level,
    Experience,
    CurrentHealth,
    MaxHealth,
    CurrentLight,
    MaxLight,
    Strength,
    Agility,
    Intelligence,
    Spirit,
    CreatedAt,
    UpdatedAt,
}

/// Notifications (升级通知等站内消息)
#[derive(DeriveIden)]
enum Notifications {
    Table,
    Id,
    UserId,
    CharacterId,
    Kind,
    Body,
    CreatedAt,
    ReadAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 初始表结构:
/// - users / classes / enrollments: 账号与班级组织关系
/// - character_types: 预置四个职业 (Warrior / Mage / Healer / Ranger)
/// - characters: 每个学生每个班级最多一个角色 (唯一索引)
/// - notifications: 升级通知落库, 由客户端轮询消费
///
/// 班级或学生删除时级联删除其角色与选课关系
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // user_role 枚举类型
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("user_role"))
                    .values([Alias::new("teacher"), Alias::new("student")])
                    .to_owned(),
            )
            .await?;

        // 用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Username).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Users::DisplayName)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::PasswordHash)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::Role)
                            .enumeration(
                                Alias::new("user_role"),
                                [Alias::new("teacher"), Alias::new("student")],
                            )
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_username_unique")
                    .table(Users::Table)
                    .col(Users::Username)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 班级表
        manager
            .create_table(
                Table::create()
                    .table(Classes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Classes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Classes::TeacherId).big_integer().not_null())
                    .col(ColumnDef::new(Classes::Name).string_len(64).not_null())
                    .col(ColumnDef::new(Classes::JoinCode).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Classes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Classes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_classes_teacher")
                            .from(Classes::Table, Classes::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_classes_join_code_unique")
                    .table(Classes::Table)
                    .col(Classes::JoinCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_classes_teacher")
                    .table(Classes::Table)
                    .col(Classes::TeacherId)
                    .to_owned(),
            )
            .await?;

        // 选课表
        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Enrollments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::ClassId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Enrollments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Enrollments::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_enrollments_class")
                            .from(Enrollments::Table, Enrollments::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_enrollments_student")
                            .from(Enrollments::Table, Enrollments::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 一个学生在一个班级只有一条选课记录
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_enrollments_class_student_unique")
                    .table(Enrollments::Table)
                    .col(Enrollments::ClassId)
                    .col(Enrollments::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 职业模板表
        manager
            .create_table(
                Table::create()
                    .table(CharacterTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CharacterTypes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CharacterTypes::Name)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CharacterTypes::Description)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CharacterTypes::MaxHealth)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CharacterTypes::MaxLight)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CharacterTypes::Strength)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CharacterTypes::Agility)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CharacterTypes::Intelligence)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CharacterTypes::Spirit)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CharacterTypes::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(CharacterTypes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_character_types_name_unique")
                    .table(CharacterTypes::Table)
                    .col(CharacterTypes::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 角色表
        manager
            .create_table(
                Table::create()
                    .table(Characters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Characters::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Characters::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Characters::ClassId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Characters::CharacterTypeId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Characters::Name).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Characters::Level)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Characters::Experience)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Characters::CurrentHealth)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Characters::MaxHealth).integer().not_null())
                    .col(
                        ColumnDef::new(Characters::CurrentLight)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Characters::MaxLight).integer().not_null())
                    .col(ColumnDef::new(Characters::Strength).integer().not_null())
                    .col(ColumnDef::new(Characters::Agility).integer().not_null())
                    .col(
                        ColumnDef::new(Characters::Intelligence)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Characters::Spirit).integer().not_null())
                    .col(
                        ColumnDef::new(Characters::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Characters::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_characters_student")
                            .from(Characters::Table, Characters::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_characters_class")
                            .from(Characters::Table, Characters::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_characters_type")
                            .from(Characters::Table, Characters::CharacterTypeId)
                            .to(CharacterTypes::Table, CharacterTypes::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // 一个学生在一个班级只有一个角色
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_characters_class_student_unique")
                    .table(Characters::Table)
                    .col(Characters::ClassId)
                    .col(Characters::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_characters_class")
                    .table(Characters::Table)
                    .col(Characters::ClassId)
                    .to_owned(),
            )
            .await?;

        // 通知表
        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notifications::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Notifications::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Notifications::CharacterId).big_integer().null())
                    .col(ColumnDef::new(Notifications::Kind).string_len(32).not_null())
                    .col(ColumnDef::new(Notifications::Body).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Notifications::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Notifications::ReadAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notifications_user")
                            .from(Notifications::Table, Notifications::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_notifications_user")
                    .table(Notifications::Table)
                    .col(Notifications::UserId)
                    .to_owned(),
            )
            .await?;

        // 预置职业数据
        let conn = manager.get_connection();
        let insert_sql = r#"
INSERT INTO character_types (name, description, max_health, max_light, strength, agility, intelligence, spirit)
VALUES
 ('Warrior', 'Front-line protector with high health', 80, 30, 8, 4, 3, 3),   -- 战士
 ('Mage', 'Spell caster fueled by light', 40, 70, 2, 4, 9, 5),               -- 法师
 ('Healer', 'Keeps the party standing', 55, 60, 3, 3, 5, 9),                 -- 牧师
 ('Ranger', 'Fast scout with balanced stats', 60, 45, 5, 9, 4, 4)            -- 游侠
ON CONFLICT (name) DO NOTHING;
"#;
        conn.execute(Statement::from_string(
            manager.get_database_backend(),
            insert_sql.to_string(),
        ))
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 删除顺序与外键依赖相反
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(Notifications::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(Characters::Table).to_owned())
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(CharacterTypes::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(Enrollments::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(Classes::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(Users::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(Alias::new("user_role")).to_owned())
            .await?;

        Ok(())
    }
}
