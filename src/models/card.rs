use crate::entities::bingo_card_entity as cards;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCardRequest {
    /// 25 个 1..=25 的号码, 按卡面排列顺序提交
    pub numbers: Vec<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BingoCardResponse {
    pub id: i64,
    pub user_id: i64,
    pub month_year: String,
    pub numbers: Vec<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<cards::Model> for BingoCardResponse {
    fn from(m: cards::Model) -> Self {
        let numbers = m.grid().unwrap_or_default();
        Self {
            id: m.id,
            user_id: m.user_id,
            month_year: m.month_year,
            numbers,
            is_active: m.is_active,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}
