use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::{
    CreateUserStatistic, ExerciseType, SessionWithExercises, UpdateUserStatistic, UserStatistic,
    UserStatisticView,
};
use crate::services::{ExerciseTypeService, SessionService};

/// Sliding window for the recent-session count, anchored to evaluation time.
const RECENT_WINDOW_DAYS: i64 = 28;

/// Derive one statistic view per known exercise type from a user's sessions.
///
/// A session counts toward a type only when it contains at least one exercise
/// of that type; its other exercises do not pull it in. The best result is
/// the maximum `weight * reps * series` over every matching exercise across
/// all matching sessions. A type the user never logged yields zeros.
///
/// The evaluation timestamp is passed in rather than read from the clock, so
/// results are deterministic for a given input; callers use `Utc::now()` for
/// live values.
pub fn compute_user_statistics(
    user_id: &str,
    exercise_types: &[ExerciseType],
    sessions: &[SessionWithExercises],
    evaluated_at: DateTime<Utc>,
) -> Vec<UserStatisticView> {
    let window_start = evaluated_at - Duration::days(RECENT_WINDOW_DAYS);

    exercise_types
        .iter()
        .map(|exercise_type| {
            let matching: Vec<&SessionWithExercises> = sessions
                .iter()
                .filter(|s| {
                    s.exercises
                        .iter()
                        .any(|e| e.exercise_type_id == exercise_type.id)
                })
                .collect();

            // Inclusive boundary: a session started exactly 28 days ago counts
            let sessions_in_last_four_weeks = matching
                .iter()
                .filter(|s| s.session.started_at >= window_start)
                .count() as i32;

            let best_result = matching
                .iter()
                .flat_map(|s| s.exercises.iter())
                .filter(|e| e.exercise_type_id == exercise_type.id)
                .map(|e| e.score())
                .max()
                .unwrap_or(0);

            UserStatisticView {
                user_id: user_id.to_string(),
                exercise_type_id: exercise_type.id,
                sessions_in_last_four_weeks,
                best_result,
            }
        })
        .collect()
}

#[derive(Clone)]
pub struct StatisticsService {
    db: PgPool,
    exercise_type_service: ExerciseTypeService,
    session_service: SessionService,
}

impl StatisticsService {
    pub fn new(db: PgPool) -> Self {
        let exercise_type_service = ExerciseTypeService::new(db.clone());
        let session_service = SessionService::new(db.clone());

        Self {
            db,
            exercise_type_service,
            session_service,
        }
    }

    /// Live aggregation over current session data. Read-only: persisted
    /// snapshots are neither consulted nor written.
    pub async fn compute_for_user(&self, user_id: &str) -> Result<Vec<UserStatisticView>> {
        let exercise_types = self.exercise_type_service.list_exercise_types().await?;
        let sessions = self.session_service.list_sessions_for_user(user_id).await?;

        Ok(compute_user_statistics(
            user_id,
            &exercise_types,
            &sessions,
            Utc::now(),
        ))
    }

    /// Recompute and upsert one snapshot row per exercise type, keyed on
    /// (user_id, exercise_type_id). `updated_at` records the snapshot time.
    pub async fn refresh_for_user(&self, user_id: &str) -> Result<Vec<UserStatistic>> {
        let views = self.compute_for_user(user_id).await?;
        let now = Utc::now();

        let mut snapshots = Vec::with_capacity(views.len());
        for view in views {
            let snapshot = sqlx::query_as::<_, UserStatistic>(
                r#"
                INSERT INTO user_statistics
                    (user_id, exercise_type_id, sessions_in_last_four_weeks, best_result, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $5)
                ON CONFLICT (user_id, exercise_type_id)
                DO UPDATE SET
                    sessions_in_last_four_weeks = EXCLUDED.sessions_in_last_four_weeks,
                    best_result = EXCLUDED.best_result,
                    updated_at = EXCLUDED.updated_at
                RETURNING id, user_id, exercise_type_id, sessions_in_last_four_weeks, best_result, created_at, updated_at
                "#,
            )
            .bind(&view.user_id)
            .bind(view.exercise_type_id)
            .bind(view.sessions_in_last_four_weeks)
            .bind(view.best_result)
            .bind(now)
            .fetch_one(&self.db)
            .await?;

            snapshots.push(snapshot);
        }

        info!(
            "Refreshed {} statistic snapshots for user {}",
            snapshots.len(),
            user_id
        );

        Ok(snapshots)
    }

    pub async fn create_statistic(&self, data: CreateUserStatistic) -> Result<UserStatistic> {
        let statistic = sqlx::query_as::<_, UserStatistic>(
            r#"
            INSERT INTO user_statistics
                (user_id, exercise_type_id, sessions_in_last_four_weeks, best_result, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING id, user_id, exercise_type_id, sessions_in_last_four_weeks, best_result, created_at, updated_at
            "#,
        )
        .bind(&data.user_id)
        .bind(data.exercise_type_id)
        .bind(data.sessions_in_last_four_weeks)
        .bind(data.best_result)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        Ok(statistic)
    }

    pub async fn get_statistic_by_id(&self, statistic_id: Uuid) -> Result<Option<UserStatistic>> {
        let statistic = sqlx::query_as::<_, UserStatistic>(
            r#"
            SELECT id, user_id, exercise_type_id, sessions_in_last_four_weeks, best_result, created_at, updated_at
            FROM user_statistics
            WHERE id = $1
            "#,
        )
        .bind(statistic_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(statistic)
    }

    pub async fn list_statistics(&self) -> Result<Vec<UserStatistic>> {
        let statistics = sqlx::query_as::<_, UserStatistic>(
            r#"
            SELECT id, user_id, exercise_type_id, sessions_in_last_four_weeks, best_result, created_at, updated_at
            FROM user_statistics
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(statistics)
    }

    /// Full-record update. Returns `None` when the row does not exist,
    /// including when it was deleted by another actor before the write
    /// landed: the single `UPDATE .. RETURNING` statement observes the
    /// absence instead of applying a blind write.
    pub async fn update_statistic(
        &self,
        statistic_id: Uuid,
        data: UpdateUserStatistic,
    ) -> Result<Option<UserStatistic>> {
        let statistic = sqlx::query_as::<_, UserStatistic>(
            r#"
            UPDATE user_statistics
            SET user_id = $2,
                exercise_type_id = $3,
                sessions_in_last_four_weeks = $4,
                best_result = $5,
                updated_at = $6
            WHERE id = $1
            RETURNING id, user_id, exercise_type_id, sessions_in_last_four_weeks, best_result, created_at, updated_at
            "#,
        )
        .bind(statistic_id)
        .bind(&data.user_id)
        .bind(data.exercise_type_id)
        .bind(data.sessions_in_last_four_weeks)
        .bind(data.best_result)
        .bind(Utc::now())
        .fetch_optional(&self.db)
        .await?;

        Ok(statistic)
    }

    /// Idempotent: deleting an id that no longer exists is a success no-op.
    pub async fn delete_statistic(&self, statistic_id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM user_statistics WHERE id = $1")
            .bind(statistic_id)
            .execute(&self.db)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Exercise, Session};

    fn exercise_type(name: &str) -> ExerciseType {
        ExerciseType {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Utc::now(),
        }
    }

    fn session_with(
        user_id: &str,
        started_at: DateTime<Utc>,
        exercises: Vec<(Uuid, i32, i32, i32)>,
    ) -> SessionWithExercises {
        let session_id = Uuid::new_v4();
        let exercises = exercises
            .into_iter()
            .map(|(exercise_type_id, weight, reps, series)| Exercise {
                id: Uuid::new_v4(),
                session_id,
                exercise_type_id,
                weight,
                reps,
                series,
                created_at: started_at,
            })
            .collect();

        SessionWithExercises {
            session: Session {
                id: session_id,
                user_id: user_id.to_string(),
                started_at,
                ended_at: started_at + Duration::hours(1),
                created_at: started_at,
                updated_at: started_at,
            },
            exercises,
        }
    }

    #[test]
    fn user_without_sessions_gets_zero_row_per_type() {
        let types = vec![exercise_type("bench press"), exercise_type("squat")];
        let now = Utc::now();

        let stats = compute_user_statistics("user-1", &types, &[], now);

        assert_eq!(stats.len(), 2);
        for (view, t) in stats.iter().zip(&types) {
            assert_eq!(view.exercise_type_id, t.id);
            assert_eq!(view.user_id, "user-1");
            assert_eq!(view.sessions_in_last_four_weeks, 0);
            assert_eq!(view.best_result, 0);
        }
    }

    #[test]
    fn best_result_is_weight_times_reps_times_series() {
        let bench = exercise_type("bench press");
        let squat = exercise_type("squat");
        let now = Utc::now();

        let sessions = vec![session_with(
            "user-1",
            now - Duration::days(3),
            vec![(bench.id, 10, 5, 3)],
        )];

        let stats =
            compute_user_statistics("user-1", &[bench.clone(), squat.clone()], &sessions, now);

        assert_eq!(stats[0].best_result, 150);
        assert_eq!(stats[0].sessions_in_last_four_weeks, 1);
        assert_eq!(stats[1].best_result, 0);
        assert_eq!(stats[1].sessions_in_last_four_weeks, 0);
    }

    #[test]
    fn window_boundary_is_inclusive_at_28_days() {
        let bench = exercise_type("bench press");
        let now = Utc::now();

        let sessions = vec![
            session_with("user-1", now - Duration::days(29), vec![(bench.id, 10, 5, 3)]),
            session_with("user-1", now - Duration::days(28), vec![(bench.id, 10, 5, 3)]),
            session_with("user-1", now - Duration::days(27), vec![(bench.id, 10, 5, 3)]),
        ];

        let stats = compute_user_statistics("user-1", &[bench], &sessions, now);

        // 29-day-old excluded; exactly-28 and 27-day-old included
        assert_eq!(stats[0].sessions_in_last_four_weeks, 2);
    }

    #[test]
    fn higher_score_raises_best_result_without_touching_session_count() {
        let bench = exercise_type("bench press");
        let now = Utc::now();

        let mut sessions = vec![session_with(
            "user-1",
            now - Duration::days(2),
            vec![(bench.id, 10, 5, 3)],
        )];

        let before = compute_user_statistics("user-1", &[bench.clone()], &sessions, now);
        assert_eq!(before[0].best_result, 150);
        assert_eq!(before[0].sessions_in_last_four_weeks, 1);

        // A second, heavier entry in the same session
        let session_id = sessions[0].session.id;
        sessions[0].exercises.push(Exercise {
            id: Uuid::new_v4(),
            session_id,
            exercise_type_id: bench.id,
            weight: 20,
            reps: 5,
            series: 3,
            created_at: now,
        });

        let after = compute_user_statistics("user-1", &[bench], &sessions, now);
        assert_eq!(after[0].best_result, 300);
        assert_eq!(after[0].sessions_in_last_four_weeks, 1);
    }

    #[test]
    fn sessions_of_other_types_do_not_contribute() {
        let bench = exercise_type("bench press");
        let squat = exercise_type("squat");
        let now = Utc::now();

        let sessions = vec![
            session_with("user-1", now - Duration::days(1), vec![(squat.id, 100, 5, 5)]),
            session_with("user-1", now - Duration::days(2), vec![(squat.id, 120, 3, 5)]),
        ];

        let stats = compute_user_statistics("user-1", &[bench, squat], &sessions, now);

        assert_eq!(stats[0].sessions_in_last_four_weeks, 0);
        assert_eq!(stats[0].best_result, 0);
        assert_eq!(stats[1].sessions_in_last_four_weeks, 2);
        assert_eq!(stats[1].best_result, 3000);
    }

    #[test]
    fn best_result_flattens_exercises_across_sessions() {
        let bench = exercise_type("bench press");
        let now = Utc::now();

        // Best entry sits in an old session outside the four-week window
        let sessions = vec![
            session_with(
                "user-1",
                now - Duration::days(60),
                vec![(bench.id, 50, 5, 3), (bench.id, 60, 5, 3)],
            ),
            session_with("user-1", now - Duration::days(5), vec![(bench.id, 40, 5, 3)]),
        ];

        let stats = compute_user_statistics("user-1", &[bench], &sessions, now);

        // The window bounds the session count, not the best result
        assert_eq!(stats[0].sessions_in_last_four_weeks, 1);
        assert_eq!(stats[0].best_result, 900);
    }

    #[test]
    fn views_follow_exercise_type_retrieval_order() {
        let types: Vec<ExerciseType> = ["deadlift", "squat", "bench press"]
            .iter()
            .map(|n| exercise_type(n))
            .collect();
        let now = Utc::now();

        let stats = compute_user_statistics("user-1", &types, &[], now);

        let ids: Vec<Uuid> = stats.iter().map(|v| v.exercise_type_id).collect();
        let expected: Vec<Uuid> = types.iter().map(|t| t.id).collect();
        assert_eq!(ids, expected);
    }
}
