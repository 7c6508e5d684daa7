use axum::{routing::get, Router};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::exercise_types::exercise_type_routes;
use super::health::health_check;
use super::sessions::session_routes;
use super::statistics::statistics_routes;
use crate::services::{ExerciseTypeService, SessionService, StatisticsService};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub exercise_type_service: ExerciseTypeService,
    pub session_service: SessionService,
    pub statistics_service: StatisticsService,
}

impl AppState {
    pub fn new(db: PgPool) -> Self {
        let exercise_type_service = ExerciseTypeService::new(db.clone());
        let session_service = SessionService::new(db.clone());
        let statistics_service = StatisticsService::new(db.clone());

        Self {
            db,
            exercise_type_service,
            session_service,
            statistics_service,
        }
    }
}

pub fn create_routes(db: PgPool) -> Router {
    let state = AppState::new(db);

    let api_routes = Router::new()
        .merge(exercise_type_routes())
        .merge(session_routes())
        .merge(statistics_routes());

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
