// Business logic services

pub mod exercise_type_service;
pub mod session_service;
pub mod statistics_service;

pub use exercise_type_service::ExerciseTypeService;
pub use session_service::SessionService;
pub use statistics_service::{compute_user_statistics, StatisticsService};
