use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 宾果卡实体
/// 说明:
/// - numbers 按用户提交顺序存储 25 个 1..=25 的号码, 位置 i 即第 i/5 行第 i%5 列
/// - 卡片创建后不可修改; 月度重置只置 is_active=false, 从不删除
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "bingo_cards")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    /// 形如 "2026-08"
    pub month_year: String,
    /// JSON 数组, 提交顺序快照
    pub numbers: Json,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Model {
    /// 按提交顺序还原 25 个号码
    pub fn grid(&self) -> Result<Vec<i32>, serde_json::Error> {
        serde_json::from_value(self.numbers.clone())
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
