use anyhow::Result;
use chrono::Utc;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::{CreateExercise, CreateSession, Exercise, Session, SessionWithExercises};

#[derive(Clone)]
pub struct SessionService {
    db: PgPool,
}

impl SessionService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create_session(&self, data: CreateSession) -> Result<Session> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (user_id, started_at, ended_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING id, user_id, started_at, ended_at, created_at, updated_at
            "#,
        )
        .bind(&data.user_id)
        .bind(data.started_at)
        .bind(data.ended_at)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        Ok(session)
    }

    pub async fn get_session_by_id(&self, session_id: Uuid) -> Result<Option<Session>> {
        let session = sqlx::query_as::<_, Session>(
            "SELECT id, user_id, started_at, ended_at, created_at, updated_at FROM sessions WHERE id = $1",
        )
        .bind(session_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(session)
    }

    pub async fn get_session_with_exercises(
        &self,
        session_id: Uuid,
    ) -> Result<Option<SessionWithExercises>> {
        let Some(session) = self.get_session_by_id(session_id).await? else {
            return Ok(None);
        };

        let exercises = sqlx::query_as::<_, Exercise>(
            r#"
            SELECT id, session_id, exercise_type_id, weight, reps, series, created_at
            FROM exercises
            WHERE session_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.db)
        .await?;

        Ok(Some(SessionWithExercises { session, exercises }))
    }

    /// All of a user's sessions, newest first, with exercises eagerly loaded.
    pub async fn list_sessions_for_user(&self, user_id: &str) -> Result<Vec<SessionWithExercises>> {
        let sessions = sqlx::query_as::<_, Session>(
            r#"
            SELECT id, user_id, started_at, ended_at, created_at, updated_at
            FROM sessions
            WHERE user_id = $1
            ORDER BY started_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        let exercises = sqlx::query_as::<_, Exercise>(
            r#"
            SELECT e.id, e.session_id, e.exercise_type_id, e.weight, e.reps, e.series, e.created_at
            FROM exercises e
            JOIN sessions s ON s.id = e.session_id
            WHERE s.user_id = $1
            ORDER BY e.created_at, e.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        let mut by_session: HashMap<Uuid, Vec<Exercise>> = HashMap::new();
        for exercise in exercises {
            by_session.entry(exercise.session_id).or_default().push(exercise);
        }

        Ok(sessions
            .into_iter()
            .map(|session| {
                let exercises = by_session.remove(&session.id).unwrap_or_default();
                SessionWithExercises { session, exercises }
            })
            .collect())
    }

    /// Append a logged exercise to an existing session. Returns `None` when
    /// the session does not exist.
    pub async fn add_exercise(
        &self,
        session_id: Uuid,
        data: CreateExercise,
    ) -> Result<Option<Exercise>> {
        if self.get_session_by_id(session_id).await?.is_none() {
            return Ok(None);
        }

        let exercise = sqlx::query_as::<_, Exercise>(
            r#"
            INSERT INTO exercises (session_id, exercise_type_id, weight, reps, series, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, session_id, exercise_type_id, weight, reps, series, created_at
            "#,
        )
        .bind(session_id)
        .bind(data.exercise_type_id)
        .bind(data.weight)
        .bind(data.reps)
        .bind(data.series)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        sqlx::query("UPDATE sessions SET updated_at = $2 WHERE id = $1")
            .bind(session_id)
            .bind(Utc::now())
            .execute(&self.db)
            .await?;

        Ok(Some(exercise))
    }

    /// Exercises are dropped with their session via the cascade.
    pub async fn delete_session(&self, session_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(session_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
