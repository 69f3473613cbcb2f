pub mod bingo_cards;
pub mod bingo_rewards;
pub mod card_history;
pub mod claim_history;
pub mod daily_numbers;
pub mod number_claims;
pub mod reset_logs;
pub mod reward_history;

pub use bingo_cards as bingo_card_entity;
pub use bingo_rewards as bingo_reward_entity;
pub use card_history as card_history_entity;
pub use claim_history as claim_history_entity;
pub use daily_numbers as daily_number_entity;
pub use number_claims as number_claim_entity;
pub use reset_logs as reset_log_entity;
pub use reward_history as reward_history_entity;

pub use reset_logs::ResetStatus;
