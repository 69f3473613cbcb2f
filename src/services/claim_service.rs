use std::collections::HashSet;

use crate::entities::number_claim_entity as claims;
use crate::error::{AppResult, ConflictError, NotFoundError};
use crate::external::KarmaService;
use crate::models::{BingoStatusResponse, ClaimResponse};
use crate::services::line_detection;
use crate::services::{CardService, DailyNumberService, RewardService};
use crate::utils::month_key;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set, SqlErr, TransactionTrait,
};

#[derive(Clone)]
pub struct ClaimService {
    pool: DatabaseConnection,
    card_service: CardService,
    daily_number_service: DailyNumberService,
    reward_service: RewardService,
    karma_service: KarmaService,
}

impl ClaimService {
    pub fn new(
        pool: DatabaseConnection,
        reward_service: RewardService,
        karma_service: KarmaService,
    ) -> Self {
        let card_service = CardService::new(pool.clone());
        let daily_number_service = DailyNumberService::new(pool.clone());
        Self {
            pool,
            card_service,
            daily_number_service,
            reward_service,
            karma_service,
        }
    }

    /// 打卡 (Claim)
    ///
    /// 逻辑:
    /// 1. 前置校验: 当月生效卡片存在、当日号码已生成
    /// 2. 同一事务内: 插入打卡记录 -> 重算线状态 -> 达标则发奖, 原子提交,
    ///    不存在 "线数已达标但奖励行还没有" 的可观察窗口
    /// 3. 重复打卡由 (user_id, claim_date) 唯一约束裁决
    /// 4. 提交后异步通知积分服务; 其失败不回滚已提交的奖励
    pub async fn claim(&self, user_id: i64, claim_date: NaiveDate) -> AppResult<ClaimResponse> {
        let month_year = month_key(claim_date);

        let card = self
            .card_service
            .find_active_card(user_id, &month_year)
            .await?
            .ok_or_else(|| NotFoundError::NoCardFound {
                month_year: month_year.clone(),
            })?;
        let daily = self
            .daily_number_service
            .find_by_date(claim_date)
            .await?
            .ok_or(NotFoundError::DailyNumberNotGenerated { date: claim_date })?;

        let grid = card.grid()?;

        let txn = self.pool.begin().await?;

        // 无论当日号码是否在卡上, 打卡本身都要记录
        let inserted = claims::ActiveModel {
            user_id: Set(user_id),
            card_id: Set(card.id),
            daily_number_id: Set(daily.id),
            claim_date: Set(claim_date),
            number: Set(daily.number),
            ..Default::default()
        }
        .insert(&txn)
        .await;
        if let Err(e) = inserted {
            return match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    Err(ConflictError::DuplicateClaim { claim_date }.into())
                }
                _ => Err(e.into()),
            };
        }

        // 含本次在内重算线状态; 卡片唯一对应本月, 按 card_id 过滤即本月全部打卡
        let claimed = claimed_numbers(&txn, card.id).await?;
        let (line_count, line_types) = line_detection::line_state(&grid, &claimed);

        let reward = self
            .reward_service
            .issue_if_eligible(&txn, user_id, card.id, &month_year, line_count, &line_types)
            .await?;

        txn.commit().await?;

        let reward_issued = reward.is_some();
        if reward_issued {
            // 事后通知, 与事务解耦; 失败只记日志
            let karma_service = self.karma_service.clone();
            let notified_lines = line_types.clone();
            tokio::spawn(async move {
                if let Err(e) = karma_service
                    .notify_reward_issued(user_id, &notified_lines)
                    .await
                {
                    log::error!("Failed to notify karma service for user {user_id}: {e:?}");
                }
            });
        }

        Ok(ClaimResponse {
            is_on_card: grid.contains(&daily.number),
            line_count,
            line_types,
            reward_issued,
        })
    }

    /// 当月状态概览
    pub async fn get_status(
        &self,
        user_id: i64,
        month_year: &str,
    ) -> AppResult<BingoStatusResponse> {
        let today = Utc::now().date_naive();
        let has_claimed_today = claims::Entity::find()
            .filter(claims::Column::UserId.eq(user_id))
            .filter(claims::Column::ClaimDate.eq(today))
            .one(&self.pool)
            .await?
            .is_some();

        let card = match self
            .card_service
            .find_active_card(user_id, month_year)
            .await?
        {
            Some(card) => card,
            None => {
                return Ok(BingoStatusResponse {
                    has_card: false,
                    line_count: 0,
                    has_claimed_today,
                });
            }
        };

        let grid = card.grid()?;
        let claimed = claimed_numbers(&self.pool, card.id).await?;
        let (line_count, _) = line_detection::line_state(&grid, &claimed);

        Ok(BingoStatusResponse {
            has_card: true,
            line_count,
            has_claimed_today,
        })
    }
}

/// 指定卡片的全部已打卡号码
async fn claimed_numbers<C: ConnectionTrait>(conn: &C, card_id: i64) -> AppResult<HashSet<i32>> {
    Ok(claims::Entity::find()
        .filter(claims::Column::CardId.eq(card_id))
        .all(conn)
        .await?
        .into_iter()
        .map(|claim| claim.number)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::line_detection::LineType;

    fn state(grid: &[i32], claimed: &[i32]) -> (u32, Vec<LineType>) {
        line_detection::line_state(grid, &claimed.iter().copied().collect())
    }

    /// 顺序卡片打满第一行后继续打到三线达标的完整走查
    #[test]
    fn test_progression_to_reward_threshold() {
        let grid: Vec<i32> = (1..=25).collect();

        // 前五天: 1..=5, 恰好第 0 行
        let mut claimed: Vec<i32> = (1..=5).collect();
        let (count, lines) = state(&grid, &claimed);
        assert_eq!(count, 1);
        assert_eq!(lines, vec![LineType::Row0]);

        // 继续打 6,7,11,13,16,19,21,25: 行 0 + 列 0 + 主对角线
        claimed.extend([6, 7, 11, 13, 16, 19, 21, 25]);
        let (count, lines) = state(&grid, &claimed);
        assert!(count >= 3);
        assert!(lines.contains(&LineType::Row0));
        assert!(lines.contains(&LineType::Col0));
        assert!(lines.contains(&LineType::DiagonalMain));
        assert_eq!(count, 3);
        assert_eq!(
            lines,
            vec![LineType::Row0, LineType::Col0, LineType::DiagonalMain]
        );
    }

    #[test]
    fn test_two_lines_stay_below_threshold() {
        let grid: Vec<i32> = (1..=25).collect();
        // 行 0 + 行 1
        let claimed: Vec<i32> = (1..=10).collect();
        let (count, _) = state(&grid, &claimed);
        assert_eq!(count, 2);
        assert!(count < crate::services::reward_service::REWARD_LINE_THRESHOLD);
    }

    #[test]
    fn test_off_card_numbers_never_contribute() {
        let grid: Vec<i32> = (1..=25).collect();
        // 打卡集合含不在卡上的值也只按卡上号码计线
        let (count, lines) = state(&grid, &[1, 2, 3, 4, 5, 30, 40]);
        assert_eq!(count, 1);
        assert_eq!(lines, vec![LineType::Row0]);
    }
}
