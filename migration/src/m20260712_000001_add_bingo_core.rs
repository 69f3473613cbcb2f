use sea_orm_migration::prelude::*;

/// Bingo Cards (用户每月一张的 5x5 卡片)
#[derive(DeriveIden)]
enum BingoCards {
    Table,
    Id,
    UserId,
    MonthYear,
    Numbers,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

/// Daily Numbers (全系统每日号码, 每个日期一行)
#[derive(DeriveIden)]
enum DailyNumbers {
    Table,
    Id,
    Date,
    Number,
    CycleNumber,
    CreatedAt,
}

/// Number Claims (用户每日打卡记录)
#[derive(DeriveIden)]
enum NumberClaims {
    Table,
    Id,
    UserId,
    CardId,
    DailyNumberId,
    ClaimDate,
    Number,
    CreatedAt,
}

/// Bingo Rewards (每月最多一次的达标奖励)
#[derive(DeriveIden)]
enum BingoRewards {
    Table,
    Id,
    UserId,
    CardId,
    MonthYear,
    LineCount,
    LineTypes,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BingoCards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BingoCards::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BingoCards::UserId).big_integer().not_null())
                    .col(ColumnDef::new(BingoCards::MonthYear).string_len(7).not_null())
                    .col(ColumnDef::new(BingoCards::Numbers).json_binary().not_null())
                    .col(
                        ColumnDef::new(BingoCards::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(BingoCards::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .col(
                        ColumnDef::new(BingoCards::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // unique (user_id, month_year)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_bingo_cards_user_month")
                    .table(BingoCards::Table)
                    .col(BingoCards::UserId)
                    .col(BingoCards::MonthYear)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_bingo_cards_month")
                    .table(BingoCards::Table)
                    .col(BingoCards::MonthYear)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DailyNumbers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DailyNumbers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DailyNumbers::Date).date().not_null())
                    .col(
                        ColumnDef::new(DailyNumbers::Number)
                            .integer()
                            .not_null()
                            .check(Expr::col(DailyNumbers::Number).between(1, 25)),
                    )
                    .col(
                        ColumnDef::new(DailyNumbers::CycleNumber)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(DailyNumbers::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // unique (date): 并发生成时由该约束裁决唯一赢家
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_daily_numbers_date")
                    .table(DailyNumbers::Table)
                    .col(DailyNumbers::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(NumberClaims::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NumberClaims::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(NumberClaims::UserId).big_integer().not_null())
                    .col(ColumnDef::new(NumberClaims::CardId).big_integer().not_null())
                    .col(
                        ColumnDef::new(NumberClaims::DailyNumberId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(NumberClaims::ClaimDate).date().not_null())
                    .col(
                        ColumnDef::new(NumberClaims::Number)
                            .integer()
                            .not_null()
                            .check(Expr::col(NumberClaims::Number).between(1, 25)),
                    )
                    .col(
                        ColumnDef::new(NumberClaims::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_number_claims_card")
                            .from(NumberClaims::Table, NumberClaims::CardId)
                            .to(BingoCards::Table, BingoCards::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_number_claims_daily_number")
                            .from(NumberClaims::Table, NumberClaims::DailyNumberId)
                            .to(DailyNumbers::Table, DailyNumbers::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // unique (user_id, claim_date): 一人一天只能打卡一次
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_number_claims_user_date")
                    .table(NumberClaims::Table)
                    .col(NumberClaims::UserId)
                    .col(NumberClaims::ClaimDate)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_number_claims_card")
                    .table(NumberClaims::Table)
                    .col(NumberClaims::CardId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BingoRewards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BingoRewards::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BingoRewards::UserId).big_integer().not_null())
                    .col(ColumnDef::new(BingoRewards::CardId).big_integer().not_null())
                    .col(
                        ColumnDef::new(BingoRewards::MonthYear)
                            .string_len(7)
                            .not_null(),
                    )
                    .col(ColumnDef::new(BingoRewards::LineCount).integer().not_null())
                    .col(ColumnDef::new(BingoRewards::LineTypes).json_binary().not_null())
                    .col(
                        ColumnDef::new(BingoRewards::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // unique (user_id, month_year): 奖励每月至多一次
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_bingo_rewards_user_month")
                    .table(BingoRewards::Table)
                    .col(BingoRewards::UserId)
                    .col(BingoRewards::MonthYear)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(BingoRewards::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(NumberClaims::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(DailyNumbers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(BingoCards::Table).to_owned())
            .await?;
        Ok(())
    }
}
