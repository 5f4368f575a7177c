use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;

use crate::models::job::{Job, JobStatus, VisitError};

/// Thread-safe registry of visit-processing jobs.
///
/// All reads and writes go through these four operations, each of which
/// holds the lock for its whole critical section, so callers never observe
/// a job with its status updated but its error list not yet appended (or
/// vice versa). The table itself is never exposed.
pub struct JobStore {
    inner: Mutex<Inner>,
}

struct Inner {
    counter: u64,
    jobs: HashMap<String, Job>,
}

impl JobStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                counter: 0,
                jobs: HashMap::new(),
            }),
        }
    }

    /// Allocate a fresh identifier and insert an ongoing job for it.
    ///
    /// The job is visible to `get` from the moment this returns, before any
    /// visit has been processed. Identifiers are never reused within the
    /// process lifetime.
    pub fn create(&self) -> String {
        let mut inner = self.inner.lock().expect("job store lock poisoned");
        let id = format!("job-{}", inner.counter);
        inner.counter += 1;
        inner.jobs.insert(id.clone(), Job::new(id.clone()));
        id
    }

    /// Snapshot of the current job state, or None for an unknown id.
    pub fn get(&self, id: &str) -> Option<Job> {
        let inner = self.inner.lock().expect("job store lock poisoned");
        inner.jobs.get(id).cloned()
    }

    /// Mark the job failed and append one visit error.
    ///
    /// No-op if the job is already terminal, so a late-arriving error can
    /// neither resurrect a completed job nor double-append after failure.
    pub fn set_failed(&self, id: &str, store_id: &str, message: &str) {
        let mut inner = self.inner.lock().expect("job store lock poisoned");
        if let Some(job) = inner.jobs.get_mut(id) {
            if job.status.is_terminal() {
                return;
            }
            job.status = JobStatus::Failed;
            job.errors.push(VisitError {
                store_id: store_id.to_string(),
                message: message.to_string(),
            });
            job.updated_at = Utc::now();
        }
    }

    /// Mark the job completed if it is still ongoing; no-op otherwise.
    pub fn set_completed(&self, id: &str) {
        let mut inner = self.inner.lock().expect("job store lock poisoned");
        if let Some(job) = inner.jobs.get_mut(id) {
            if job.status.is_terminal() {
                return;
            }
            job.status = JobStatus::Completed;
            job.updated_at = Utc::now();
        }
    }
}

impl Default for JobStore {
    fn default() -> Self {
        Self::new()
    }
}
