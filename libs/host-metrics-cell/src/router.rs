// =====================================================================================
// HOST METRICS CELL ROUTER
// =====================================================================================

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::handlers::{get_detailed_metrics, get_health, get_service_info};
use crate::services::HostMetricsReporter;
use shared_config::AppConfig;

/// Router backed by the sysinfo sampler.
pub fn create_host_metrics_router(config: Arc<AppConfig>) -> Router {
    host_metrics_routes(Arc::new(HostMetricsReporter::new(&config)))
}

pub fn host_metrics_routes(reporter: Arc<HostMetricsReporter>) -> Router {
    Router::new()
        .route("/", get(get_service_info))
        .route("/health", get(get_health))
        .route("/metrics", get(get_detailed_metrics))
        .with_state(reporter)
}
