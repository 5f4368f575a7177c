use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::models::job::{JobStatus, VisitError};

/// One store visit: the store's identifier plus the images captured there.
///
/// `image_url` is the wire name for the URL list. `visit_time` is accepted
/// from clients but not interpreted.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Visit {
    #[garde(length(min = 1, max = 64))]
    pub store_id: String,

    #[garde(length(min = 1))]
    #[serde(rename = "image_url")]
    pub image_urls: Vec<String>,

    #[garde(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit_time: Option<String>,
}

/// Request body for POST /api/submit.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitJobRequest {
    /// Declared number of visits; must equal `visits.len()`.
    #[garde(skip)]
    pub count: usize,

    #[garde(length(min = 1), dive)]
    pub visits: Vec<Visit>,
}

/// Response after a successful submission.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitJobResponse {
    pub job_id: String,
}

/// Response for GET /api/status.
#[derive(Debug, Serialize, Deserialize)]
pub struct JobStatusResponse {
    pub status: JobStatus,
    pub job_id: String,
    #[serde(rename = "error", default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<VisitError>,
}
