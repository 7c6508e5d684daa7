use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use uuid::Uuid;

use super::errors::ApiError;
use super::routes::AppState;
use crate::models::{CreateExerciseType, ExerciseType};

pub fn exercise_type_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/exercise-types",
            get(list_exercise_types).post(create_exercise_type),
        )
        .route("/exercise-types/:exercise_type_id", get(get_exercise_type))
}

async fn list_exercise_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExerciseType>>, ApiError> {
    let exercise_types = state.exercise_type_service.list_exercise_types().await?;

    Ok(Json(exercise_types))
}

async fn create_exercise_type(
    State(state): State<AppState>,
    Json(data): Json<CreateExerciseType>,
) -> Result<(StatusCode, Json<ExerciseType>), ApiError> {
    data.validate().map_err(ApiError::validation)?;

    let exercise_type = state
        .exercise_type_service
        .create_exercise_type(data)
        .await?;

    Ok((StatusCode::CREATED, Json(exercise_type)))
}

async fn get_exercise_type(
    State(state): State<AppState>,
    Path(exercise_type_id): Path<Uuid>,
) -> Result<Json<ExerciseType>, ApiError> {
    let exercise_type = state
        .exercise_type_service
        .get_exercise_type_by_id(exercise_type_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(exercise_type))
}
