use sea_orm_migration::prelude::*;
use sea_orm_migration::prelude::extension::postgres::Type;
use sea_orm_migration::sea_orm::Statement;

/// Badges (徽章定义, 静态规则集)
#[derive(DeriveIden)]
enum Badges {
    Table,
    Id,
    Code,
    Name,
    Description,
    ConditionType,
    Threshold,
    IsActive,
    CreatedAt,
}

/// Badge Unlocks (角色已解锁徽章, 只追加)
#[derive(DeriveIden)]
enum BadgeUnlocks {
    Table,
    Id,
    CharacterId,
    BadgeId,
    UnlockedAt,
}

/// Activity Records (活动参与记录, 本服务只读统计)
#[derive(DeriveIden)]
enum ActivityRecords {
    Table,
    Id,
    CharacterId,
    ActivityName,
    Score,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Characters {
    Table,
    Id,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 徽章相关表:
/// - badges: 解锁条件 = condition_type + threshold, 预置 8 个徽章
/// - badge_unlocks: (character_id, badge_id) 唯一, 重复评估不产生新行
/// - activity_records: 活动模块写入, 徽章评估只做计数
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // badge_condition_type 枚举类型
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("badge_condition_type"))
                    .values([
                        Alias::new("reach_level"),
                        Alias::new("total_experience"),
                        Alias::new("times_selected"),
                        Alias::new("activities_completed"),
                    ])
                    .to_owned(),
            )
            .await?;

        // 徽章定义表
        manager
            .create_table(
                Table::create()
                    .table(Badges::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Badges::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Badges::Code).string_len(64).not_null())
                    .col(ColumnDef::new(Badges::Name).string_len(128).not_null())
                    .col(
                        ColumnDef::new(Badges::Description)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Badges::ConditionType)
                            .enumeration(
                                Alias::new("badge_condition_type"),
                                [
                                    Alias::new("reach_level"),
                                    Alias::new("total_experience"),
                                    Alias::new("times_selected"),
                                    Alias::new("activities_completed"),
                                ],
                            )
                            .not_null(),
                    )
                    .col(ColumnDef::new(Badges::Threshold).big_integer().not_null())
                    .col(
                        ColumnDef::new(Badges::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Badges::CreatedAt)
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
                    .name("idx_badges_code_unique")
                    .table(Badges::Table)
                    .col(Badges::Code)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 解锁表
        manager
            .create_table(
                Table::create()
                    .table(BadgeUnlocks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BadgeUnlocks::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BadgeUnlocks::CharacterId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BadgeUnlocks::BadgeId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BadgeUnlocks::UnlockedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_badge_unlocks_character")
                            .from(BadgeUnlocks::Table, BadgeUnlocks::CharacterId)
                            .to(Characters::Table, Characters::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_badge_unlocks_badge")
                            .from(BadgeUnlocks::Table, BadgeUnlocks::BadgeId)
                            .to(Badges::Table, Badges::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_badge_unlocks_character_badge_unique")
                    .table(BadgeUnlocks::Table)
                    .col(BadgeUnlocks::CharacterId)
                    .col(BadgeUnlocks::BadgeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 活动参与记录表
        manager
            .create_table(
                Table::create()
                    .table(ActivityRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ActivityRecords::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ActivityRecords::CharacterId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ActivityRecords::ActivityName)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ActivityRecords::Score)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ActivityRecords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activity_records_character")
                            .from(ActivityRecords::Table, ActivityRecords::CharacterId)
                            .to(Characters::Table, Characters::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_activity_records_character")
                    .table(ActivityRecords::Table)
                    .col(ActivityRecords::CharacterId)
                    .to_owned(),
            )
            .await?;

        // 预置徽章数据
        let conn = manager.get_connection();
        let insert_sql = r#"
INSERT INTO badges (code, name, description, condition_type, threshold)
VALUES
 ('first_steps', 'First Steps', 'Reach level 2', 'reach_level', 2),
 ('seasoned_adventurer', 'Seasoned Adventurer', 'Reach level 5', 'reach_level', 5),
 ('living_legend', 'Living Legend', 'Reach level 10', 'reach_level', 10),
 ('xp_collector', 'XP Collector', 'Accumulate 500 experience', 'total_experience', 500),
 ('xp_hoarder', 'XP Hoarder', 'Accumulate 2000 experience', 'total_experience', 2000),
 ('in_the_spotlight', 'In the Spotlight', 'Get selected for the first time', 'times_selected', 1),
 ('crowd_favorite', 'Crowd Favorite', 'Get selected ten times', 'times_selected', 10),
 ('busy_bee', 'Busy Bee', 'Complete five class activities', 'activities_completed', 5)
ON CONFLICT (code) DO NOTHING;
"#;
        conn.execute(Statement::from_string(
            manager.get_database_backend(),
            insert_sql.to_string(),
        ))
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 删除顺序: 活动记录 -> 解锁 -> 徽章 -> 枚举类型
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(ActivityRecords::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(BadgeUnlocks::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(Badges::Table).to_owned())
            .await?;

        manager
            .drop_type(
                Type::drop()
                    .name(Alias::new("badge_condition_type"))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
