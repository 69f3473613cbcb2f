use std::collections::HashSet;

use crate::entities::daily_number_entity as dn;
use crate::error::{AppError, AppResult, NotFoundError};
use crate::models::DailyNumberResponse;
use crate::services::line_detection::MAX_NUMBER;
use crate::utils::month_bounds;
use chrono::NaiveDate;
use rand::Rng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr,
};

#[derive(Clone)]
pub struct DailyNumberService {
    pool: DatabaseConnection,
}

impl DailyNumberService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 生成指定日期的每日号码 (幂等)
    ///
    /// 逻辑:
    /// 1. 当日已有记录直接原样返回, 调度器重复触发观察到同一个值
    /// 2. 取本月最近一轮已抽号码, 剩余池抽空则开新一轮并重置为全量 25 个
    /// 3. 池内均匀随机抽取后插入; 并发生成由 date 唯一约束裁决, 落败方改读胜者
    pub async fn generate_for_date(&self, date: NaiveDate) -> AppResult<DailyNumberResponse> {
        if let Some(existing) = self.find_by_date(date).await? {
            return Ok(existing.into());
        }

        let (first_day, last_day) = month_bounds(date);
        let month_rows = dn::Entity::find()
            .filter(dn::Column::Date.gte(first_day))
            .filter(dn::Column::Date.lte(last_day))
            .all(&self.pool)
            .await?;
        let drawn: Vec<(i32, i32)> = month_rows
            .iter()
            .map(|row| (row.cycle_number, row.number))
            .collect();
        let (cycle_number, pool) = next_cycle_pool(&drawn);

        let number = {
            let mut rng = rand::thread_rng();
            pool[rng.gen_range(0..pool.len())]
        };

        let inserted = dn::ActiveModel {
            date: Set(date),
            number: Set(number),
            cycle_number: Set(cycle_number),
            ..Default::default()
        }
        .insert(&self.pool)
        .await;

        match inserted {
            Ok(model) => {
                log::info!("Daily number generated for {date}: {number} (cycle {cycle_number})");
                Ok(model.into())
            }
            Err(e) => match e.sql_err() {
                // 另一实例先插入成功: 改读已胜出的那一行
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    let winner = self.find_by_date(date).await?.ok_or_else(|| {
                        AppError::InternalError(format!(
                            "Daily number for {date} missing after insert conflict"
                        ))
                    })?;
                    Ok(winner.into())
                }
                _ => Err(e.into()),
            },
        }
    }

    /// 只读查询, 从不生成
    pub async fn get_for_date(&self, date: NaiveDate) -> AppResult<DailyNumberResponse> {
        let row = self
            .find_by_date(date)
            .await?
            .ok_or(NotFoundError::DailyNumberNotGenerated { date })?;
        Ok(row.into())
    }

    pub(crate) async fn find_by_date(&self, date: NaiveDate) -> AppResult<Option<dn::Model>> {
        Ok(dn::Entity::find()
            .filter(dn::Column::Date.eq(date))
            .one(&self.pool)
            .await?)
    }
}

/// 由本月已抽记录推导当前轮次与剩余号码池
///
/// 返回的池保证非空: 当前轮 25 个号码抽完即进入下一轮的全量池
pub(crate) fn next_cycle_pool(drawn: &[(i32, i32)]) -> (i32, Vec<i32>) {
    let current_cycle = drawn.iter().map(|(cycle, _)| *cycle).max().unwrap_or(0);
    if current_cycle == 0 {
        return (1, (1..=MAX_NUMBER).collect());
    }

    let used: HashSet<i32> = drawn
        .iter()
        .filter(|(cycle, _)| *cycle == current_cycle)
        .map(|(_, number)| *number)
        .collect();
    let remaining: Vec<i32> = (1..=MAX_NUMBER).filter(|n| !used.contains(n)).collect();
    if remaining.is_empty() {
        (current_cycle + 1, (1..=MAX_NUMBER).collect())
    } else {
        (current_cycle, remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fresh_month_starts_cycle_one_with_full_pool() {
        let (cycle, pool) = next_cycle_pool(&[]);
        assert_eq!(cycle, 1);
        assert_eq!(pool, (1..=25).collect::<Vec<i32>>());
    }

    #[test]
    fn test_drawn_numbers_leave_the_pool() {
        let drawn = vec![(1, 3), (1, 17), (1, 25)];
        let (cycle, pool) = next_cycle_pool(&drawn);
        assert_eq!(cycle, 1);
        assert_eq!(pool.len(), 22);
        assert!(!pool.contains(&3));
        assert!(!pool.contains(&17));
        assert!(!pool.contains(&25));
    }

    #[test]
    fn test_exhausted_cycle_rolls_over_with_full_pool() {
        let drawn: Vec<(i32, i32)> = (1..=25).map(|n| (1, n)).collect();
        let (cycle, pool) = next_cycle_pool(&drawn);
        assert_eq!(cycle, 2);
        assert_eq!(pool, (1..=25).collect::<Vec<i32>>());
    }

    #[test]
    fn test_only_latest_cycle_counts() {
        // 第 1 轮已完整, 第 2 轮抽了 2 个: 池子只排除第 2 轮的
        let mut drawn: Vec<(i32, i32)> = (1..=25).map(|n| (1, n)).collect();
        drawn.push((2, 7));
        drawn.push((2, 8));
        let (cycle, pool) = next_cycle_pool(&drawn);
        assert_eq!(cycle, 2);
        assert_eq!(pool.len(), 23);
        assert!(!pool.contains(&7));
        assert!(!pool.contains(&8));
        assert!(pool.contains(&1));
    }

    #[test]
    fn test_last_remaining_number_is_offered_before_rollover() {
        let drawn: Vec<(i32, i32)> = (1..=24).map(|n| (1, n)).collect();
        let (cycle, pool) = next_cycle_pool(&drawn);
        assert_eq!(cycle, 1);
        assert_eq!(pool, vec![25]);
    }

    proptest! {
        /// 任意已抽子集下, 池子非空且与当前轮已抽号码不相交
        #[test]
        fn prop_pool_never_intersects_current_cycle(drawn_bits in 0u32..(1u32 << 25)) {
            let drawn: Vec<(i32, i32)> = (0..25)
                .filter(|i| drawn_bits >> i & 1 == 1)
                .map(|i| (1, i as i32 + 1))
                .collect();
            let (cycle, pool) = next_cycle_pool(&drawn);
            prop_assert!(!pool.is_empty());
            if drawn.len() == 25 {
                prop_assert_eq!(cycle, 2);
                prop_assert_eq!(pool.len(), 25);
            } else if drawn.is_empty() {
                prop_assert_eq!(cycle, 1);
                prop_assert_eq!(pool.len(), 25);
            } else {
                prop_assert_eq!(cycle, 1);
                prop_assert_eq!(pool.len() + drawn.len(), 25);
                for (_, number) in &drawn {
                    prop_assert!(!pool.contains(number));
                }
            }
        }
    }
}
