use anyhow::Result;
use chrono::{Duration, Utc};
use sqlx::PgPool;

use crate::models::{CreateExercise, CreateExerciseType, CreateSession};
use crate::services::{ExerciseTypeService, SessionService};

pub struct DatabaseSeeder {
    pool: PgPool,
}

impl DatabaseSeeder {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn seed_all(&self) -> Result<()> {
        tracing::info!("Starting database seeding...");

        self.seed_exercise_types().await?;
        self.seed_demo_sessions().await?;

        tracing::info!("Database seeding completed!");
        Ok(())
    }

    async fn seed_exercise_types(&self) -> Result<()> {
        let exercise_type_service = ExerciseTypeService::new(self.pool.clone());

        let names = ["bench press", "squat", "deadlift", "overhead press"];

        for name in names {
            if exercise_type_service
                .get_exercise_type_by_name(name)
                .await?
                .is_none()
            {
                exercise_type_service
                    .create_exercise_type(CreateExerciseType {
                        name: name.to_string(),
                    })
                    .await?;
                tracing::info!("Created exercise type '{}'", name);
            }
        }

        Ok(())
    }

    async fn seed_demo_sessions(&self) -> Result<()> {
        let exercise_type_service = ExerciseTypeService::new(self.pool.clone());
        let session_service = SessionService::new(self.pool.clone());

        let demo_user = "demo-user";

        if !session_service
            .list_sessions_for_user(demo_user)
            .await?
            .is_empty()
        {
            return Ok(());
        }

        let Some(bench) = exercise_type_service
            .get_exercise_type_by_name("bench press")
            .await?
        else {
            return Ok(());
        };

        let started_at = Utc::now() - Duration::days(3);
        let session = session_service
            .create_session(CreateSession {
                user_id: demo_user.to_string(),
                started_at,
                ended_at: started_at + Duration::hours(1),
            })
            .await?;

        session_service
            .add_exercise(
                session.id,
                CreateExercise {
                    exercise_type_id: bench.id,
                    weight: 60,
                    reps: 8,
                    series: 3,
                },
            )
            .await?;

        session_service
            .add_exercise(
                session.id,
                CreateExercise {
                    exercise_type_id: bench.id,
                    weight: 70,
                    reps: 5,
                    series: 3,
                },
            )
            .await?;

        tracing::info!("Created demo workout session");
        Ok(())
    }
}
