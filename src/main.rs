use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use metrics_exporter_prometheus::PrometheusBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use retail_pulse::app_state::AppState;
use retail_pulse::config::AppConfig;
use retail_pulse::routes;
use retail_pulse::services::image::ImageClient;
use retail_pulse::services::job_store::JobStore;
use retail_pulse::services::store_master::StoreRegistry;

#[tokio::main]
async fn main() {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    // Load configuration from environment
    let config = AppConfig::from_env().expect("Failed to load configuration from environment");

    tracing::info!("Initializing retail-pulse server");

    // Initialize Prometheus metrics recorder
    let prometheus_handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    let prometheus_handle = Arc::new(prometheus_handle);

    // Register application metrics
    metrics::describe_counter!("visit_jobs_total", "Total visit jobs submitted");
    metrics::describe_counter!("visit_jobs_completed", "Total visit jobs completed");
    metrics::describe_counter!("visit_jobs_failed", "Total visit jobs that failed");
    metrics::describe_gauge!("visit_jobs_ongoing", "Jobs currently being processed");
    metrics::describe_histogram!(
        "visit_job_processing_seconds",
        "Time to process a visit job"
    );

    // Load the store master reference dataset
    tracing::info!(path = %config.store_master_path, "Loading store master data");
    let stores =
        StoreRegistry::load(&config.store_master_path).expect("Failed to load store master data");
    tracing::info!(stores = stores.len(), "Store master data loaded");

    // Initialize the image fetch client
    let images = ImageClient::new(Duration::from_secs(config.fetch_timeout_secs))
        .expect("Failed to initialize image client");

    // Create shared application state
    let state = AppState::new(JobStore::new(), stores, Arc::new(images));

    // Build API routes
    let app = routes::router(state)
        // Prometheus metrics endpoint (separate state)
        .route(
            "/metrics",
            get(routes::metrics::prometheus_metrics).with_state(prometheus_handle),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(2 * 1024 * 1024)); // 2 MB limit

    tracing::info!("Starting retail-pulse on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
