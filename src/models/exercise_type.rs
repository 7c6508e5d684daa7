use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Immutable reference data, one row per movement category ("bench press").
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExerciseType {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateExerciseType {
    pub name: String,
}

impl CreateExerciseType {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("Exercise type name must not be empty");
        }
        Ok(())
    }
}
