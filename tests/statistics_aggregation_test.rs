use chrono::{DateTime, Duration, Utc};
use pretty_assertions::assert_eq;
use uuid::Uuid;

use gym_stats::models::{Exercise, ExerciseType, Session, SessionWithExercises, UserStatisticView};
use gym_stats::services::compute_user_statistics;

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
fn full_training_history_produces_expected_views() {
    let bench = exercise_type("bench press");
    let squat = exercise_type("squat");
    let deadlift = exercise_type("deadlift");
    let now = Utc::now();

    let sessions = vec![
        // Recent full-body session: counts for bench and squat
        session_with(
            "athlete-7",
            now - Duration::days(2),
            vec![(bench.id, 80, 5, 3), (squat.id, 100, 5, 3)],
        ),
        // Recent bench-only session with two entries
        session_with(
            "athlete-7",
            now - Duration::days(10),
            vec![(bench.id, 85, 3, 3), (bench.id, 60, 10, 3)],
        ),
        // Old squat session: outside the window but holds the squat best
        session_with("athlete-7", now - Duration::days(40), vec![(squat.id, 120, 4, 3)]),
    ];

    let stats = compute_user_statistics(
        "athlete-7",
        &[bench.clone(), squat.clone(), deadlift.clone()],
        &sessions,
        now,
    );

    let expected = vec![
        UserStatisticView {
            user_id: "athlete-7".to_string(),
            exercise_type_id: bench.id,
            sessions_in_last_four_weeks: 2,
            best_result: 60 * 10 * 3,
        },
        UserStatisticView {
            user_id: "athlete-7".to_string(),
            exercise_type_id: squat.id,
            sessions_in_last_four_weeks: 1,
            best_result: 120 * 4 * 3,
        },
        UserStatisticView {
            user_id: "athlete-7".to_string(),
            exercise_type_id: deadlift.id,
            sessions_in_last_four_weeks: 0,
            best_result: 0,
        },
    ];

    assert_eq!(stats, expected);
}

#[test]
fn mixed_type_session_counts_once_for_each_contained_type() {
    let bench = exercise_type("bench press");
    let squat = exercise_type("squat");
    let now = Utc::now();

    let sessions = vec![session_with(
        "athlete-7",
        now - Duration::days(1),
        vec![(bench.id, 50, 5, 3), (squat.id, 90, 5, 3)],
    )];

    let stats = compute_user_statistics("athlete-7", &[bench, squat], &sessions, now);

    assert_eq!(stats[0].sessions_in_last_four_weeks, 1);
    assert_eq!(stats[1].sessions_in_last_four_weeks, 1);
}

#[test]
fn window_moves_with_evaluation_time_but_best_result_does_not() {
    let bench = exercise_type("bench press");
    let now = Utc::now();

    let sessions = vec![session_with(
        "athlete-7",
        now - Duration::days(20),
        vec![(bench.id, 70, 5, 3)],
    )];

    let today = compute_user_statistics("athlete-7", &[bench.clone()], &sessions, now);
    let in_two_weeks =
        compute_user_statistics("athlete-7", &[bench], &sessions, now + Duration::days(14));

    assert_eq!(today[0].sessions_in_last_four_weeks, 1);
    assert_eq!(in_two_weeks[0].sessions_in_last_four_weeks, 0);
    assert_eq!(today[0].best_result, in_two_weeks[0].best_result);
}

#[test]
fn unknown_user_data_shape_is_all_zeros() {
    let types = vec![exercise_type("bench press"), exercise_type("squat")];
    let now = Utc::now();

    // Sessions belong to someone else entirely; callers pass only the
    // target user's sessions, so an unknown user means an empty slice
    let stats = compute_user_statistics("nobody", &types, &[], now);

    assert!(stats
        .iter()
        .all(|v| v.sessions_in_last_four_weeks == 0 && v.best_result == 0));
    assert_eq!(stats.len(), types.len());
}
