use std::sync::Arc;
use std::time::Instant;

use metrics::{counter, gauge, histogram};

use crate::models::visit::Visit;
use crate::services::image::{FetchError, FetchImageDimensions};
use crate::services::job_store::JobStore;

/// The first visit-level failure of a job.
struct VisitFailure {
    store_id: String,
    error: FetchError,
}

/// Process all visits of one job to completion.
///
/// Spawned once per submitted job and detached from the request that
/// created it; the outcome is reported solely through the job store's
/// terminal setters. Visits and URLs are processed strictly in submission
/// order, and the first fetch or decode error aborts the whole job with
/// exactly one recorded error. The store lock is never held across a fetch.
pub async fn run_job(
    jobs: Arc<JobStore>,
    fetcher: Arc<dyn FetchImageDimensions>,
    job_id: String,
    visits: Vec<Visit>,
) {
    let start = Instant::now();
    gauge!("visit_jobs_ongoing").increment(1.0);

    tracing::debug!(job_id = %job_id, visits = visits.len(), "processing job");

    match process_visits(fetcher.as_ref(), &job_id, &visits).await {
        Ok(()) => {
            jobs.set_completed(&job_id);
            counter!("visit_jobs_completed").increment(1);
            tracing::info!(
                job_id = %job_id,
                visits = visits.len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "job completed"
            );
        }
        Err(failure) => {
            let message = format!("failed to download image: {}", failure.error);
            jobs.set_failed(&job_id, &failure.store_id, &message);
            counter!("visit_jobs_failed").increment(1);
            tracing::warn!(
                job_id = %job_id,
                store_id = %failure.store_id,
                error = %failure.error,
                "visit failed, aborting job"
            );
        }
    }

    gauge!("visit_jobs_ongoing").decrement(1.0);
    histogram!("visit_job_processing_seconds").record(start.elapsed().as_secs_f64());
}

/// Walk visits in submission order, stopping at the first failure.
async fn process_visits(
    fetcher: &dyn FetchImageDimensions,
    job_id: &str,
    visits: &[Visit],
) -> Result<(), VisitFailure> {
    for visit in visits {
        process_visit(fetcher, job_id, visit)
            .await
            .map_err(|error| VisitFailure {
                store_id: visit.store_id.clone(),
                error,
            })?;
    }
    Ok(())
}

/// Fetch and measure every image of one visit, in order.
async fn process_visit(
    fetcher: &dyn FetchImageDimensions,
    job_id: &str,
    visit: &Visit,
) -> Result<(), FetchError> {
    for url in &visit.image_urls {
        let dims = fetcher.fetch_dimensions(url).await?;
        tracing::trace!(
            job_id = %job_id,
            store_id = %visit.store_id,
            url = %url,
            width = dims.width,
            height = dims.height,
            perimeter = dims.perimeter(),
            "image measured"
        );
    }
    Ok(())
}
