pub mod health;
pub mod jobs;
pub mod metrics;

use axum::routing::{get, post};
use axum::Router;

use crate::app_state::AppState;

/// Assemble the API surface shared by the server binary and the tests.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/submit", post(jobs::submit_job))
        .route("/api/status", get(jobs::get_job_status))
        .with_state(state)
}
