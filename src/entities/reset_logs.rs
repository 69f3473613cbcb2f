use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, DeriveActiveEnum, EnumIter)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "reset_status")]
#[serde(rename_all = "snake_case")]
pub enum ResetStatus {
    #[sea_orm(string_value = "success")]
    Success,
    #[sea_orm(string_value = "failed")]
    Failed,
    #[sea_orm(string_value = "partial")]
    Partial,
}

impl std::fmt::Display for ResetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResetStatus::Success => write!(f, "success"),
            ResetStatus::Failed => write!(f, "failed"),
            ResetStatus::Partial => write!(f, "partial"),
        }
    }
}

/// 月度重置流水实体, 每次调用追加一行
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "reset_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub reset_date: NaiveDate,
    pub status: ResetStatus,
    /// 归档统计与失败用户明细
    pub reset_metadata: Json,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
