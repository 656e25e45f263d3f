// =====================================================================================
// METRICS STORE CELL - PERSISTED METRIC SAMPLES & SERVICE REGISTRY
// =====================================================================================
//
// Serves the metrics-service endpoints:
// - Write-once metric samples with filtered, newest-first listing
// - Registry of known services with unique names
// - Database connectivity health probe
//
// =====================================================================================

pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{
    CreateMetricRequest, CreateServiceRequest, HealthResponse, MetricSample, MetricsQuery,
    ServiceInfo, ServiceRegistration, ServiceStatus, StoreError,
};

pub use services::MetricsStore;

pub use router::metrics_store_routes;
