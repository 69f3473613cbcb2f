use crate::entities::ResetStatus;
use serde::{Deserialize, Serialize};

/// 一次月度重置的汇总结果, 与 reset_logs.reset_metadata 同源
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetOutcome {
    pub month_year: String,
    pub status: ResetStatus,
    pub total_cards: usize,
    pub archived: usize,
    pub skipped: usize,
    pub failed_user_ids: Vec<i64>,
}
