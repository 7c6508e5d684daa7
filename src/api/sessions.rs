use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use uuid::Uuid;

use super::errors::ApiError;
use super::routes::AppState;
use crate::models::{CreateExercise, CreateSession, Exercise, Session, SessionWithExercises};

pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(create_session))
        .route("/sessions/:session_id", get(get_session).delete(delete_session))
        .route("/sessions/:session_id/exercises", post(add_exercise))
        .route("/users/:user_id/sessions", get(list_user_sessions))
}

async fn create_session(
    State(state): State<AppState>,
    Json(data): Json<CreateSession>,
) -> Result<(StatusCode, Json<Session>), ApiError> {
    data.validate().map_err(ApiError::validation)?;

    let session = state.session_service.create_session(data).await?;

    Ok((StatusCode::CREATED, Json(session)))
}

async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionWithExercises>, ApiError> {
    let session = state
        .session_service
        .get_session_with_exercises(session_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(session))
}

async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = state.session_service.delete_session(session_id).await?;

    if !deleted {
        return Err(ApiError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Log one set within an existing session.
async fn add_exercise(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(data): Json<CreateExercise>,
) -> Result<(StatusCode, Json<Exercise>), ApiError> {
    data.validate().map_err(ApiError::validation)?;

    if state
        .exercise_type_service
        .get_exercise_type_by_id(data.exercise_type_id)
        .await?
        .is_none()
    {
        return Err(ApiError::validation("Unknown exercise type"));
    }

    let exercise = state
        .session_service
        .add_exercise(session_id, data)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok((StatusCode::CREATED, Json(exercise)))
}

async fn list_user_sessions(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<SessionWithExercises>>, ApiError> {
    let sessions = state.session_service.list_sessions_for_user(&user_id).await?;

    Ok(Json(sessions))
}
