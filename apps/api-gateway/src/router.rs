use std::sync::Arc;

use axum::Router;

use host_metrics_cell::create_host_metrics_router;
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    create_host_metrics_router(state)
}
