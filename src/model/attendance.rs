use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One credited lecture. (uid, date, name) is the natural key; rows are
/// written once and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AttendanceRecord {
    pub uid: u64,
    pub date: NaiveDate,
    pub name: String,
}
