use std::sync::Arc;

use axum::Router;

use metrics_store_cell::{metrics_store_routes, MetricsStore};
use shared_database::DatabasePool;

pub fn create_router(pool: DatabasePool) -> Router {
    metrics_store_routes(Arc::new(MetricsStore::new(pool)))
}
