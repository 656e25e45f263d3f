// =====================================================================================
// METRICS STORE CELL ROUTER
// =====================================================================================

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::handlers::{
    create_metric, create_service, get_health, get_service_info, list_metrics, list_services,
};
use crate::services::MetricsStore;

/// Routes over an already connected store. The caller owns the pool's lifecycle.
pub fn metrics_store_routes(store: Arc<MetricsStore>) -> Router {
    Router::new()
        .route("/", get(get_service_info))
        .route("/health", get(get_health))
        .route("/metrics", get(list_metrics).post(create_metric))
        .route("/services", get(list_services).post(create_service))
        .with_state(store)
}
