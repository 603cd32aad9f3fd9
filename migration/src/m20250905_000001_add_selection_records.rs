use sea_orm_migration::prelude::*;

/// Selection Records (随机点名台账)
#[derive(DeriveIden)]
enum SelectionRecords {
    Table,
    Id,
    ClassId,
    TeacherId,
    CharacterId,
    SelectionType,
    SelectionMethod,
    ExperienceAwarded,
    LightAwarded,
    Result,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Classes {
    Table,
    Id,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 点名台账表: 只追加, 不更新不删除
/// - character_id / teacher_id 不建外键: 角色删除后历史记录仍可回溯
/// - 班级删除时级联清理台账
/// - (class_id, created_at) 复合索引服务最近窗口查询
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SelectionRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SelectionRecords::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SelectionRecords::ClassId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SelectionRecords::TeacherId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SelectionRecords::CharacterId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SelectionRecords::SelectionType)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SelectionRecords::SelectionMethod)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SelectionRecords::ExperienceAwarded)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(SelectionRecords::LightAwarded)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(SelectionRecords::Result)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SelectionRecords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_selection_records_class")
                            .from(SelectionRecords::Table, SelectionRecords::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_selection_records_class_created")
                    .table(SelectionRecords::Table)
                    .col(SelectionRecords::ClassId)
                    .col(SelectionRecords::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_selection_records_character")
                    .table(SelectionRecords::Table)
                    .col(SelectionRecords::CharacterId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(SelectionRecords::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
