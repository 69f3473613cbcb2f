use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 每日号码实体, 每个日期一行 (date 唯一), 写入后不可变
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "daily_numbers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub date: NaiveDate,
    /// 1..=25
    pub number: i32,
    /// 本月第几轮 25 个号码的遍历, 从 1 开始
    pub cycle_number: i32,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
