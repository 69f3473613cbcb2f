use crate::entities::bingo_reward_entity as rewards;
use crate::error::AppResult;
use crate::models::RewardResponse;
use crate::services::line_detection::LineType;
use sea_orm::sea_query::{OnConflict, PostgresQueryBuilder, Query};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

/// 完成线数达到该阈值即发放当月奖励
pub const REWARD_LINE_THRESHOLD: u32 = 3;

#[derive(Clone)]
pub struct RewardService {
    pool: DatabaseConnection,
}

impl RewardService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 达标则发奖, 每月至多一次
    ///
    /// 使用 Upsert 语义: 插入时若 (user_id, month_year) 已存在则 DO NOTHING,
    /// rows_affected == 0 视为已发过 (可能是并发打卡同时越过阈值), 返回 None 而非错误。
    /// 在调用方的事务上执行, 与打卡和重算原子提交; 奖励行本身就是事实来源,
    /// 下游积分通知成功与否不影响它。
    pub async fn issue_if_eligible<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i64,
        card_id: i64,
        month_year: &str,
        line_count: u32,
        line_types: &[LineType],
    ) -> AppResult<Option<rewards::Model>> {
        if line_count < REWARD_LINE_THRESHOLD {
            return Ok(None);
        }

        let insert = Query::insert()
            .into_table(rewards::Entity)
            .columns([
                rewards::Column::UserId,
                rewards::Column::CardId,
                rewards::Column::MonthYear,
                rewards::Column::LineCount,
                rewards::Column::LineTypes,
            ])
            .values_panic([
                user_id.into(),
                card_id.into(),
                month_year.into(),
                (line_count as i32).into(),
                serde_json::to_value(line_types)?.into(),
            ])
            .on_conflict(
                OnConflict::columns([rewards::Column::UserId, rewards::Column::MonthYear])
                    .do_nothing()
                    .to_owned(),
            )
            .to_owned();
        let (sql, values) = insert.build(PostgresQueryBuilder);
        let stmt = sea_orm::Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            sql,
            values,
        );
        let result = conn.execute(stmt).await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        log::info!(
            "Reward issued for user {user_id} in {month_year}: {line_count} lines complete"
        );
        let issued = rewards::Entity::find()
            .filter(rewards::Column::UserId.eq(user_id))
            .filter(rewards::Column::MonthYear.eq(month_year))
            .one(conn)
            .await?;
        Ok(issued)
    }

    /// 用户全部奖励, 新的在前
    pub async fn get_rewards(&self, user_id: i64) -> AppResult<Vec<RewardResponse>> {
        let list = rewards::Entity::find()
            .filter(rewards::Column::UserId.eq(user_id))
            .order_by_desc(rewards::Column::CreatedAt)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }
}
