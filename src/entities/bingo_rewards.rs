use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 达标奖励实体, (user_id, month_year) 唯一保证每月至多一次
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "bingo_rewards")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub card_id: i64,
    pub month_year: String,
    /// 发奖时刻的完成线数 (>= 3)
    pub line_count: i32,
    /// JSON 数组, 固定线 id 如 "row-0" / "diagonal-main"
    pub line_types: Json,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
