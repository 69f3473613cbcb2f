use crate::services::line_detection::LineType;
use serde::{Deserialize, Serialize};

/// 打卡结果
///
/// is_on_card 仅作前端反馈: 无论当日号码是否在卡上, 打卡本身都已记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimResponse {
    pub is_on_card: bool,
    pub line_count: u32,
    pub line_types: Vec<LineType>,
    pub reward_issued: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BingoStatusResponse {
    pub has_card: bool,
    pub line_count: u32,
    pub has_claimed_today: bool,
}
