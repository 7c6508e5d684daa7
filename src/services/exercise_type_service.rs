use anyhow::Result;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{CreateExerciseType, ExerciseType};

#[derive(Clone)]
pub struct ExerciseTypeService {
    db: PgPool,
}

impl ExerciseTypeService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create_exercise_type(&self, data: CreateExerciseType) -> Result<ExerciseType> {
        let exercise_type = sqlx::query_as::<_, ExerciseType>(
            r#"
            INSERT INTO exercise_types (name, created_at)
            VALUES ($1, $2)
            RETURNING id, name, created_at
            "#,
        )
        .bind(data.name.trim())
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        Ok(exercise_type)
    }

    pub async fn get_exercise_type_by_id(
        &self,
        exercise_type_id: Uuid,
    ) -> Result<Option<ExerciseType>> {
        let exercise_type = sqlx::query_as::<_, ExerciseType>(
            "SELECT id, name, created_at FROM exercise_types WHERE id = $1",
        )
        .bind(exercise_type_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(exercise_type)
    }

    pub async fn get_exercise_type_by_name(&self, name: &str) -> Result<Option<ExerciseType>> {
        let exercise_type = sqlx::query_as::<_, ExerciseType>(
            "SELECT id, name, created_at FROM exercise_types WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.db)
        .await?;

        Ok(exercise_type)
    }

    /// All known exercise types, in insertion order.
    pub async fn list_exercise_types(&self) -> Result<Vec<ExerciseType>> {
        let exercise_types = sqlx::query_as::<_, ExerciseType>(
            "SELECT id, name, created_at FROM exercise_types ORDER BY created_at, name",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(exercise_types)
    }
}
