use crate::entities::bingo_reward_entity as rewards;
use crate::services::line_detection::LineType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardResponse {
    pub id: i64,
    pub user_id: i64,
    pub card_id: i64,
    pub month_year: String,
    pub line_count: i32,
    pub line_types: Vec<LineType>,
    pub created_at: DateTime<Utc>,
}

impl From<rewards::Model> for RewardResponse {
    fn from(m: rewards::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            card_id: m.card_id,
            month_year: m.month_year,
            line_count: m.line_count,
            line_types: serde_json::from_value(m.line_types).unwrap_or_default(),
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}
