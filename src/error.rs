use chrono::NaiveDate;
use sea_orm::DbErr;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// 卡片提交校验失败: 同步返回, 从不重试, 不落库
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Card must contain exactly {expected} numbers, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("Card numbers must be within 1..=25, offending values: {values:?}")]
    OutOfRange { values: Vec<i32> },

    #[error("Card numbers must be unique, duplicated values: {values:?}")]
    DuplicateNumbers { values: Vec<i32> },
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::WrongLength { .. } => "WRONG_LENGTH",
            ValidationError::OutOfRange { .. } => "OUT_OF_RANGE",
            ValidationError::DuplicateNumbers { .. } => "DUPLICATE_NUMBERS",
        }
    }
}

/// 唯一约束裁决出的冲突: 预期结果而非故障, 调用方重读现状即可
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConflictError {
    #[error("A card already exists for month {month_year}")]
    CardAlreadyExists { month_year: String },

    #[error("A claim already exists for {claim_date}")]
    DuplicateClaim { claim_date: NaiveDate },

    #[error("A reward was already issued for month {month_year}")]
    RewardAlreadyIssued { month_year: String },
}

impl ConflictError {
    pub fn code(&self) -> &'static str {
        match self {
            ConflictError::CardAlreadyExists { .. } => "CARD_ALREADY_EXISTS",
            ConflictError::DuplicateClaim { .. } => "DUPLICATE_CLAIM",
            ConflictError::RewardAlreadyIssued { .. } => "REWARD_ALREADY_ISSUED",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("No active card found for month {month_year}")]
    NoCardFound { month_year: String },

    #[error("Daily number not generated for {date}")]
    DailyNumberNotGenerated { date: NaiveDate },
}

impl NotFoundError {
    pub fn code(&self) -> &'static str {
        match self {
            NotFoundError::NoCardFound { .. } => "NO_CARD_FOUND",
            NotFoundError::DailyNumberNotGenerated { .. } => "DAILY_NUMBER_NOT_GENERATED",
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("Conflict: {0}")]
    ConflictError(#[from] ConflictError),

    #[error("Not found: {0}")]
    NotFound(#[from] NotFoundError),

    #[error("External API error: {0}")]
    ExternalApiError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("HTTP request error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

impl AppError {
    /// 供上层 API 映射响应的稳定错误码
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::ValidationError(e) => e.code(),
            AppError::ConflictError(e) => e.code(),
            AppError::NotFound(e) => e.code(),
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::ExternalApiError(_) | AppError::ReqwestError(_) => "EXTERNAL_API_ERROR",
            AppError::ConfigError(_) => "CONFIG_ERROR",
            AppError::InternalError(_) | AppError::SerdeJsonError(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_match_sub_kinds() {
        let e: AppError = ValidationError::WrongLength {
            expected: 25,
            actual: 3,
        }
        .into();
        assert_eq!(e.error_code(), "WRONG_LENGTH");

        let e: AppError = ConflictError::DuplicateClaim {
            claim_date: NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(),
        }
        .into();
        assert_eq!(e.error_code(), "DUPLICATE_CLAIM");

        let e: AppError = NotFoundError::NoCardFound {
            month_year: "2026-08".to_string(),
        }
        .into();
        assert_eq!(e.error_code(), "NO_CARD_FOUND");
    }

    #[test]
    fn test_validation_message_carries_expected_vs_actual() {
        let message = ValidationError::WrongLength {
            expected: 25,
            actual: 24,
        }
        .to_string();
        assert!(message.contains("25"));
        assert!(message.contains("24"));
    }
}
