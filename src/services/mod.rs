pub mod card_service;
pub mod claim_service;
pub mod daily_number_service;
pub mod line_detection;
pub mod monthly_reset_service;
pub mod reward_service;

pub use card_service::*;
pub use claim_service::*;
pub use daily_number_service::*;
pub use line_detection::{LineType, count_lines, create_bitmask, line_state};
pub use monthly_reset_service::*;
pub use reward_service::*;
