use crate::entities::daily_number_entity as dn;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyNumberResponse {
    pub id: i64,
    pub date: NaiveDate,
    pub number: i32,
    pub cycle_number: i32,
}

impl From<dn::Model> for DailyNumberResponse {
    fn from(m: dn::Model) -> Self {
        Self {
            id: m.id,
            date: m.date,
            number: m.number,
            cycle_number: m.cycle_number,
        }
    }
}
