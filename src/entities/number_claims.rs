use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 打卡记录实体
/// 说明:
/// - (user_id, claim_date) 唯一, 一人一天只打一次
/// - number 冗余存储当日号码, 即使号码不在卡上也要记录打卡本身
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "number_claims")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    /// 指向 bingo_cards.id
    pub card_id: i64,
    /// 指向 daily_numbers.id
    pub daily_number_id: i64,
    pub claim_date: NaiveDate,
    pub number: i32,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
