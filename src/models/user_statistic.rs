use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Persisted statistic snapshot. A computed projection of session data, not
/// source of truth: `updated_at` records when the snapshot was taken.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserStatistic {
    pub id: Uuid,
    pub user_id: String,
    pub exercise_type_id: Uuid,
    pub sessions_in_last_four_weeks: i32,
    pub best_result: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Live aggregation result for one (user, exercise type) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStatisticView {
    pub user_id: String,
    pub exercise_type_id: Uuid,
    pub sessions_in_last_four_weeks: i32,
    pub best_result: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUserStatistic {
    pub user_id: String,
    pub exercise_type_id: Uuid,
    pub sessions_in_last_four_weeks: i32,
    pub best_result: i32,
}

impl CreateUserStatistic {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.user_id.trim().is_empty() {
            return Err("User id must not be empty");
        }
        if self.sessions_in_last_four_weeks < 0 {
            return Err("Session count must be non-negative");
        }
        if self.best_result < 0 {
            return Err("Best result must be non-negative");
        }
        Ok(())
    }
}

/// Full-record update payload. Carries the record id so handlers can reject
/// a body whose id does not match the addressed row.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateUserStatistic {
    pub id: Uuid,
    pub user_id: String,
    pub exercise_type_id: Uuid,
    pub sessions_in_last_four_weeks: i32,
    pub best_result: i32,
}

impl UpdateUserStatistic {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.user_id.trim().is_empty() {
            return Err("User id must not be empty");
        }
        if self.sessions_in_last_four_weeks < 0 {
            return Err("Session count must be non-negative");
        }
        if self.best_result < 0 {
            return Err("Best result must be non-negative");
        }
        Ok(())
    }
}
