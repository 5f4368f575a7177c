use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status of a visit-processing job.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Ongoing,
    Completed,
    Failed,
}

impl JobStatus {
    /// A terminal job is never written to again.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

/// One recorded processing failure, attributed to the visit's store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VisitError {
    pub store_id: String,
    #[serde(rename = "error")]
    pub message: String,
}

/// A submitted batch of visits tracked under a single identifier.
///
/// Mutated only through the [`JobStore`](crate::services::job_store::JobStore)
/// setters; `errors` is non-empty exactly when `status` is `Failed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub status: JobStatus,
    pub errors: Vec<VisitError>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    pub fn new(id: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            status: JobStatus::Ongoing,
            errors: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}
