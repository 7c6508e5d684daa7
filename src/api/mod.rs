// API routes and handlers

pub mod errors;
pub mod exercise_types;
pub mod health;
pub mod routes;
pub mod sessions;
pub mod statistics;
