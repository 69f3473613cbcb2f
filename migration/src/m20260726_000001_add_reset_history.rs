use sea_orm_migration::prelude::extension::postgres::Type;
use sea_orm_migration::prelude::*;

/// Reset Logs (月度重置流水, 仅追加)
#[derive(DeriveIden)]
enum ResetLogs {
    Table,
    Id,
    ResetDate,
    Status,
    ResetMetadata,
    CreatedAt,
}

/// Card History (归档卡片, 原始时间戳以 *_original 保留)
#[derive(DeriveIden)]
enum CardHistory {
    Table,
    Id,
    UserId,
    MonthYear,
    Numbers,
    OriginalCardId,
    CreatedAtOriginal,
    ArchivedAt,
}

#[derive(DeriveIden)]
enum ClaimHistory {
    Table,
    Id,
    UserId,
    MonthYear,
    ClaimDate,
    Number,
    OriginalClaimId,
    CreatedAtOriginal,
    ArchivedAt,
}

#[derive(DeriveIden)]
enum RewardHistory {
    Table,
    Id,
    UserId,
    MonthYear,
    LineCount,
    LineTypes,
    OriginalRewardId,
    CreatedAtOriginal,
    ArchivedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("reset_status"))
                    .values(vec![
                        Alias::new("success"),
                        Alias::new("failed"),
                        Alias::new("partial"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ResetLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ResetLogs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ResetLogs::ResetDate).date().not_null())
                    .col(
                        ColumnDef::new(ResetLogs::Status)
                            .custom(Alias::new("reset_status"))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ResetLogs::ResetMetadata)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ResetLogs::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CardHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CardHistory::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CardHistory::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(CardHistory::MonthYear)
                            .string_len(7)
                            .not_null(),
                    )
                    .col(ColumnDef::new(CardHistory::Numbers).json_binary().not_null())
                    .col(
                        ColumnDef::new(CardHistory::OriginalCardId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CardHistory::CreatedAtOriginal)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CardHistory::ArchivedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // unique (user_id, month_year): 同月重跑归档直接跳过
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_card_history_user_month")
                    .table(CardHistory::Table)
                    .col(CardHistory::UserId)
                    .col(CardHistory::MonthYear)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ClaimHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClaimHistory::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ClaimHistory::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(ClaimHistory::MonthYear)
                            .string_len(7)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ClaimHistory::ClaimDate).date().not_null())
                    .col(ColumnDef::new(ClaimHistory::Number).integer().not_null())
                    .col(
                        ColumnDef::new(ClaimHistory::OriginalClaimId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClaimHistory::CreatedAtOriginal)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ClaimHistory::ArchivedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_claim_history_user_month")
                    .table(ClaimHistory::Table)
                    .col(ClaimHistory::UserId)
                    .col(ClaimHistory::MonthYear)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RewardHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RewardHistory::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RewardHistory::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(RewardHistory::MonthYear)
                            .string_len(7)
                            .not_null(),
                    )
                    .col(ColumnDef::new(RewardHistory::LineCount).integer().not_null())
                    .col(
                        ColumnDef::new(RewardHistory::LineTypes)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RewardHistory::OriginalRewardId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RewardHistory::CreatedAtOriginal)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(RewardHistory::ArchivedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(RewardHistory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(ClaimHistory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(CardHistory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(ResetLogs::Table).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(Alias::new("reset_status")).to_owned())
            .await?;
        Ok(())
    }
}
