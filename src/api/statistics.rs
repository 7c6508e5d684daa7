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
use crate::models::{CreateUserStatistic, UpdateUserStatistic, UserStatistic, UserStatisticView};

pub fn statistics_routes() -> Router<AppState> {
    Router::new()
        .route("/statistics", get(list_statistics).post(create_statistic))
        .route(
            "/statistics/:statistic_id",
            get(get_statistic).put(update_statistic).delete(delete_statistic),
        )
        .route("/users/:user_id/statistics", get(get_user_statistics))
        .route("/users/:user_id/statistics/refresh", post(refresh_user_statistics))
}

/// Live aggregation over current session data, one view per exercise type.
async fn get_user_statistics(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<UserStatisticView>>, ApiError> {
    let views = state.statistics_service.compute_for_user(&user_id).await?;

    Ok(Json(views))
}

/// Explicit snapshot: recompute and upsert one persisted row per type.
async fn refresh_user_statistics(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<UserStatistic>>, ApiError> {
    let snapshots = state.statistics_service.refresh_for_user(&user_id).await?;

    Ok(Json(snapshots))
}

async fn list_statistics(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserStatistic>>, ApiError> {
    let statistics = state.statistics_service.list_statistics().await?;

    Ok(Json(statistics))
}

async fn create_statistic(
    State(state): State<AppState>,
    Json(data): Json<CreateUserStatistic>,
) -> Result<(StatusCode, Json<UserStatistic>), ApiError> {
    data.validate().map_err(ApiError::validation)?;

    let statistic = state.statistics_service.create_statistic(data).await?;

    Ok((StatusCode::CREATED, Json(statistic)))
}

async fn get_statistic(
    State(state): State<AppState>,
    Path(statistic_id): Path<Uuid>,
) -> Result<Json<UserStatistic>, ApiError> {
    let statistic = state
        .statistics_service
        .get_statistic_by_id(statistic_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(statistic))
}

async fn update_statistic(
    State(state): State<AppState>,
    Path(statistic_id): Path<Uuid>,
    Json(data): Json<UpdateUserStatistic>,
) -> Result<Json<UserStatistic>, ApiError> {
    // A body addressing a different record is rejected, not corrected
    if data.id != statistic_id {
        return Err(ApiError::NotFound);
    }

    data.validate().map_err(ApiError::validation)?;

    let statistic = state
        .statistics_service
        .update_statistic(statistic_id, data)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(statistic))
}

/// Idempotent: deleting an id that was already removed still succeeds.
async fn delete_statistic(
    State(state): State<AppState>,
    Path(statistic_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.statistics_service.delete_statistic(statistic_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
