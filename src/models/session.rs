use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub id: Uuid,
    pub user_id: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One logged set entry. Exercises belong to their session and are deleted
/// with it; they are never edited after logging.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Exercise {
    pub id: Uuid,
    pub session_id: Uuid,
    pub exercise_type_id: Uuid,
    pub weight: i32,
    pub reps: i32,
    pub series: i32,
    pub created_at: DateTime<Utc>,
}

impl Exercise {
    /// Lift intensity score: weight x reps x series.
    pub fn score(&self) -> i32 {
        self.weight * self.reps * self.series
    }
}

/// A session with its exercises eagerly loaded, in logging order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionWithExercises {
    #[serde(flatten)]
    pub session: Session,
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSession {
    pub user_id: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

impl CreateSession {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.user_id.trim().is_empty() {
            return Err("User id must not be empty");
        }
        if self.ended_at < self.started_at {
            return Err("Session end must not precede its start");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateExercise {
    pub exercise_type_id: Uuid,
    pub weight: i32,
    pub reps: i32,
    pub series: i32,
}

impl CreateExercise {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.weight < 0 {
            return Err("Weight must be non-negative");
        }
        if self.reps < 1 {
            return Err("Reps must be at least 1");
        }
        if self.series < 1 {
            return Err("Series must be at least 1");
        }
        Ok(())
    }
}
