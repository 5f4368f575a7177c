use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use garde::Validate;
use metrics::counter;
use serde::{Deserialize, Serialize};

use crate::app_state::AppState;
use crate::models::visit::{JobStatusResponse, SubmitJobRequest, SubmitJobResponse};
use crate::services::executor;

/// JSON error body returned for all request-level failures.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Validation(_) | ApiError::NotFound(_) => StatusCode::BAD_REQUEST,
        };
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// POST /api/submit — validate a batch of visits and start a job.
///
/// Validation failures reject the whole request before any job is created;
/// on success the executor is spawned detached and the new id is returned
/// immediately.
pub async fn submit_job(
    State(state): State<AppState>,
    Json(req): Json<SubmitJobRequest>,
) -> Result<(StatusCode, Json<SubmitJobResponse>), ApiError> {
    req.validate()
        .map_err(|_| ApiError::Validation("Invalid request payload".to_string()))?;

    if req.count != req.visits.len() {
        return Err(ApiError::Validation("Invalid request payload".to_string()));
    }

    for visit in &req.visits {
        if !state.stores.is_valid(&visit.store_id) {
            return Err(ApiError::Validation(format!(
                "Invalid store ID: {}",
                visit.store_id
            )));
        }
    }

    let job_id = state.jobs.create();
    counter!("visit_jobs_total").increment(1);

    tracing::info!(job_id = %job_id, visits = req.visits.len(), "job submitted");

    tokio::spawn(executor::run_job(
        state.jobs.clone(),
        state.images.clone(),
        job_id.clone(),
        req.visits,
    ));

    Ok((StatusCode::CREATED, Json(SubmitJobResponse { job_id })))
}

#[derive(Debug, Deserialize)]
pub struct StatusParams {
    pub jobid: String,
}

/// GET /api/status?jobid=… — snapshot of the job's current state.
pub async fn get_job_status(
    State(state): State<AppState>,
    Query(params): Query<StatusParams>,
) -> Result<Json<JobStatusResponse>, ApiError> {
    let job = state
        .jobs
        .get(&params.jobid)
        .ok_or_else(|| ApiError::NotFound("Job ID not found".to_string()))?;

    Ok(Json(JobStatusResponse {
        status: job.status,
        job_id: job.id,
        errors: job.errors,
    }))
}
