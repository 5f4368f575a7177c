use std::sync::Arc;

use crate::services::image::FetchImageDimensions;
use crate::services::job_store::JobStore;
use crate::services::store_master::StoreRegistry;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub jobs: Arc<JobStore>,
    pub stores: Arc<StoreRegistry>,
    pub images: Arc<dyn FetchImageDimensions>,
}

impl AppState {
    pub fn new(
        jobs: JobStore,
        stores: StoreRegistry,
        images: Arc<dyn FetchImageDimensions>,
    ) -> Self {
        Self {
            jobs: Arc::new(jobs),
            stores: Arc::new(stores),
            images,
        }
    }
}
