use std::collections::HashSet;

use crate::entities::bingo_card_entity as cards;
use crate::error::{AppResult, ConflictError, NotFoundError, ValidationError};
use crate::models::BingoCardResponse;
use crate::services::line_detection::{GRID_SIZE, MAX_NUMBER};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr,
};

#[derive(Clone)]
pub struct CardService {
    pool: DatabaseConnection,
}

impl CardService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 创建当月卡片
    ///
    /// 逻辑:
    /// 1. 校验 25 个号码 (长度 / 取值范围 / 去重), 不合法不落库
    /// 2. 直接插入, 重复创建由 (user_id, month_year) 唯一约束裁决;
    ///    不做预查询, 预查询和插入之间存在竞态窗口
    pub async fn create_card(
        &self,
        user_id: i64,
        month_year: &str,
        numbers: &[i32],
    ) -> AppResult<BingoCardResponse> {
        validate_grid(numbers)?;

        let inserted = cards::ActiveModel {
            user_id: Set(user_id),
            month_year: Set(month_year.to_string()),
            numbers: Set(serde_json::json!(numbers)),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&self.pool)
        .await;

        match inserted {
            Ok(model) => Ok(model.into()),
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    Err(ConflictError::CardAlreadyExists {
                        month_year: month_year.to_string(),
                    }
                    .into())
                }
                _ => Err(e.into()),
            },
        }
    }

    /// 查询当月生效卡片, 卡片创建后不提供任何修改/删除入口
    pub async fn get_active_card(
        &self,
        user_id: i64,
        month_year: &str,
    ) -> AppResult<BingoCardResponse> {
        let card = self
            .find_active_card(user_id, month_year)
            .await?
            .ok_or_else(|| NotFoundError::NoCardFound {
                month_year: month_year.to_string(),
            })?;
        Ok(card.into())
    }

    /// 内部读路径, 返回实体供打卡/状态服务复用
    pub(crate) async fn find_active_card(
        &self,
        user_id: i64,
        month_year: &str,
    ) -> AppResult<Option<cards::Model>> {
        Ok(cards::Entity::find()
            .filter(cards::Column::UserId.eq(user_id))
            .filter(cards::Column::MonthYear.eq(month_year))
            .filter(cards::Column::IsActive.eq(true))
            .one(&self.pool)
            .await?)
    }
}

/// 校验提交的卡片号码
pub(crate) fn validate_grid(numbers: &[i32]) -> Result<(), ValidationError> {
    if numbers.len() != GRID_SIZE {
        return Err(ValidationError::WrongLength {
            expected: GRID_SIZE,
            actual: numbers.len(),
        });
    }

    let out_of_range: Vec<i32> = numbers
        .iter()
        .copied()
        .filter(|n| !(1..=MAX_NUMBER).contains(n))
        .collect();
    if !out_of_range.is_empty() {
        return Err(ValidationError::OutOfRange {
            values: out_of_range,
        });
    }

    let mut seen = HashSet::new();
    let mut duplicated: Vec<i32> = Vec::new();
    for &n in numbers {
        if !seen.insert(n) && !duplicated.contains(&n) {
            duplicated.push(n);
        }
    }
    if !duplicated.is_empty() {
        return Err(ValidationError::DuplicateNumbers { values: duplicated });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_grid_in_order() {
        assert!(validate_grid(&(1..=25).collect::<Vec<i32>>()).is_ok());
    }

    #[test]
    fn test_valid_grid_any_permutation() {
        let grid = vec![
            25, 1, 24, 2, 23, 3, 22, 4, 21, 5, 20, 6, 19, 7, 18, 8, 17, 9, 16, 10, 15, 11, 14,
            12, 13,
        ];
        assert!(validate_grid(&grid).is_ok());
    }

    #[test]
    fn test_wrong_length() {
        let short: Vec<i32> = (1..=24).collect();
        let result = validate_grid(&short);
        assert_eq!(
            result,
            Err(ValidationError::WrongLength {
                expected: 25,
                actual: 24
            })
        );
        assert_eq!(result.unwrap_err().code(), "WRONG_LENGTH");

        let long: Vec<i32> = (1..=26).collect();
        assert_eq!(
            validate_grid(&long),
            Err(ValidationError::WrongLength {
                expected: 25,
                actual: 26
            })
        );
    }

    #[test]
    fn test_out_of_range() {
        let mut grid: Vec<i32> = (1..=25).collect();
        grid[0] = 0;
        grid[24] = 26;
        let result = validate_grid(&grid);
        assert_eq!(
            result,
            Err(ValidationError::OutOfRange {
                values: vec![0, 26]
            })
        );
        assert_eq!(result.unwrap_err().code(), "OUT_OF_RANGE");
    }

    #[test]
    fn test_duplicate_numbers() {
        let mut grid: Vec<i32> = (1..=25).collect();
        grid[1] = 7;
        grid[2] = 7;
        let result = validate_grid(&grid);
        assert_eq!(
            result,
            Err(ValidationError::DuplicateNumbers { values: vec![7] })
        );
        assert_eq!(result.unwrap_err().code(), "DUPLICATE_NUMBERS");
    }

    #[test]
    fn test_length_checked_before_range() {
        // 长度错误优先于取值错误报告
        let grid = vec![0, 99];
        assert_eq!(
            validate_grid(&grid),
            Err(ValidationError::WrongLength {
                expected: 25,
                actual: 2
            })
        );
    }
}
