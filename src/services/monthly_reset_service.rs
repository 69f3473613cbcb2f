use crate::entities::{
    ResetStatus, bingo_card_entity as cards, bingo_reward_entity as rewards,
    card_history_entity as card_history, claim_history_entity as claim_history,
    number_claim_entity as claims, reset_log_entity as reset_logs,
    reward_history_entity as reward_history,
};
use crate::error::AppResult;
use crate::models::ResetOutcome;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    Set, TransactionTrait,
};
use serde_json::json;

#[derive(Clone)]
pub struct MonthlyResetService {
    pool: DatabaseConnection,
}

impl MonthlyResetService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 月度重置: 归档指定月份的全部生效卡片并逐一停用
    ///
    /// 逻辑:
    /// 1. 逐用户归档: 卡片 + 打卡 + 奖励 (若有) 复制进历史表, 原卡置 is_active=false (从不删除)
    /// 2. 单个用户失败只累积, 批次继续 (collect-errors, 不 fail-fast)
    /// 3. 该月已有归档记录的用户直接跳过, 重复调用安全
    /// 4. 每次调用只写一行 reset_logs; 批次起不来也要留下 failed 流水
    pub async fn run_monthly_reset(&self, month_year: &str) -> AppResult<ResetOutcome> {
        let reset_date = Utc::now().date_naive();

        let active_cards = match cards::Entity::find()
            .filter(cards::Column::MonthYear.eq(month_year))
            .filter(cards::Column::IsActive.eq(true))
            .all(&self.pool)
            .await
        {
            Ok(list) => list,
            Err(e) => {
                log::error!("Monthly reset for {month_year} could not start: {e:?}");
                self.write_reset_log(
                    reset_date,
                    ResetStatus::Failed,
                    json!({
                        "month_year": month_year,
                        "error": e.to_string(),
                    }),
                )
                .await?;
                return Err(e.into());
            }
        };

        let total_cards = active_cards.len();
        let mut archived: Vec<i64> = Vec::new();
        let mut skipped: Vec<i64> = Vec::new();
        let mut failed: Vec<(i64, String)> = Vec::new();

        for card in active_cards {
            match self.archive_card(&card).await {
                Ok(true) => archived.push(card.user_id),
                Ok(false) => skipped.push(card.user_id),
                Err(e) => {
                    log::error!(
                        "Failed to archive card of user {} for {month_year}: {e:?}",
                        card.user_id
                    );
                    failed.push((card.user_id, e.to_string()));
                }
            }
        }

        let status = aggregate_status(archived.len() + skipped.len(), failed.len());
        let failed_user_ids: Vec<i64> = failed.iter().map(|(user_id, _)| *user_id).collect();
        let metadata = json!({
            "month_year": month_year,
            "total_cards": total_cards,
            "archived": archived.len(),
            "skipped": skipped.len(),
            "failed_user_ids": failed_user_ids,
            "errors": failed
                .iter()
                .map(|(user_id, error)| json!({ "user_id": user_id, "error": error }))
                .collect::<Vec<_>>(),
        });
        self.write_reset_log(reset_date, status.clone(), metadata)
            .await?;

        log::info!(
            "Monthly reset for {month_year} finished ({status}): {} archived, {} skipped, {} failed",
            archived.len(),
            skipped.len(),
            failed.len()
        );

        Ok(ResetOutcome {
            month_year: month_year.to_string(),
            status,
            total_cards,
            archived: archived.len(),
            skipped: skipped.len(),
            failed_user_ids,
        })
    }

    /// 归档单个用户的当月数据; 返回 Ok(false) 表示此前已归档, 跳过
    async fn archive_card(&self, card: &cards::Model) -> AppResult<bool> {
        let already_archived = card_history::Entity::find()
            .filter(card_history::Column::UserId.eq(card.user_id))
            .filter(card_history::Column::MonthYear.eq(card.month_year.clone()))
            .one(&self.pool)
            .await?
            .is_some();
        if already_archived {
            return Ok(false);
        }

        let archived_at = Utc::now();
        let txn = self.pool.begin().await?;

        card_history::ActiveModel {
            user_id: Set(card.user_id),
            month_year: Set(card.month_year.clone()),
            numbers: Set(card.numbers.clone()),
            original_card_id: Set(card.id),
            created_at_original: Set(card.created_at),
            archived_at: Set(archived_at),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let month_claims = claims::Entity::find()
            .filter(claims::Column::CardId.eq(card.id))
            .all(&txn)
            .await?;
        for claim in month_claims {
            claim_history::ActiveModel {
                user_id: Set(claim.user_id),
                month_year: Set(card.month_year.clone()),
                claim_date: Set(claim.claim_date),
                number: Set(claim.number),
                original_claim_id: Set(claim.id),
                created_at_original: Set(claim.created_at),
                archived_at: Set(archived_at),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        if let Some(reward) = rewards::Entity::find()
            .filter(rewards::Column::UserId.eq(card.user_id))
            .filter(rewards::Column::MonthYear.eq(card.month_year.clone()))
            .one(&txn)
            .await?
        {
            reward_history::ActiveModel {
                user_id: Set(reward.user_id),
                month_year: Set(reward.month_year.clone()),
                line_count: Set(reward.line_count),
                line_types: Set(reward.line_types.clone()),
                original_reward_id: Set(reward.id),
                created_at_original: Set(reward.created_at),
                archived_at: Set(archived_at),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        // 保留打卡记录引用完整性: 只停用, 不删除
        let mut active_model = card.clone().into_active_model();
        active_model.is_active = Set(false);
        active_model.updated_at = Set(Some(archived_at));
        active_model.update(&txn).await?;

        txn.commit().await?;
        Ok(true)
    }

    async fn write_reset_log(
        &self,
        reset_date: NaiveDate,
        status: ResetStatus,
        metadata: serde_json::Value,
    ) -> AppResult<()> {
        reset_logs::ActiveModel {
            reset_date: Set(reset_date),
            status: Set(status),
            reset_metadata: Set(metadata),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;
        Ok(())
    }
}

/// 聚合批次状态: 无失败 -> success, 全失败 -> failed, 混合 -> partial
pub(crate) fn aggregate_status(succeeded: usize, failed: usize) -> ResetStatus {
    if failed == 0 {
        ResetStatus::Success
    } else if succeeded == 0 {
        ResetStatus::Failed
    } else {
        ResetStatus::Partial
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_succeeded_is_success() {
        assert_eq!(aggregate_status(5, 0), ResetStatus::Success);
    }

    #[test]
    fn test_empty_batch_is_success() {
        // 没有可归档的卡片不算失败
        assert_eq!(aggregate_status(0, 0), ResetStatus::Success);
    }

    #[test]
    fn test_all_failed_is_failed() {
        assert_eq!(aggregate_status(0, 3), ResetStatus::Failed);
    }

    #[test]
    fn test_mixed_is_partial() {
        assert_eq!(aggregate_status(4, 1), ResetStatus::Partial);
        assert_eq!(aggregate_status(1, 4), ResetStatus::Partial);
    }

    #[test]
    fn test_skipped_users_count_as_succeeded() {
        // 重跑时全部被跳过 + 个别失败 = partial 而非 failed
        assert_eq!(aggregate_status(3, 1), ResetStatus::Partial);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(ResetStatus::Partial).unwrap(),
            serde_json::json!("partial")
        );
        assert_eq!(ResetStatus::Failed.to_string(), "failed");
    }
}
