pub mod health;
pub mod progress;

use axum::{
    routing::{get, post},
    Router,
};

use crate::schedule::handlers as schedule_handlers;
use crate::state::AppState;
use crate::tutor::handlers as tutor_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Schedule API
        .route(
            "/api/v1/schedules/generate",
            post(schedule_handlers::handle_generate_schedule),
        )
        .route(
            "/api/v1/schedules/export",
            post(schedule_handlers::handle_export_calendar),
        )
        // Tutor API
        .route("/api/v1/tutor/chat", post(tutor_handlers::handle_tutor_chat))
        // Progress (acknowledged, not persisted)
        .route("/api/v1/progress", post(progress::handle_save_progress))
        .with_state(state)
}
