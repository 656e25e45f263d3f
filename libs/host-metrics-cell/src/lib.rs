// =====================================================================================
// HOST METRICS CELL - ON-DEMAND HOST RESOURCE REPORTING
// =====================================================================================
//
// Serves the api-gateway endpoints:
// - Service identity and deployment environment
// - Health probe with CPU, memory and root-disk utilization
// - Detailed CPU / memory / uptime metrics
//
// Every request samples the OS directly; nothing is cached between requests.
// =====================================================================================

pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{
    CpuMetrics, DetailedMetrics, HealthResponse, HostMetricsError, MemoryMetrics, SampleError,
    ServiceInfo, SystemSnapshot,
};

pub use services::{HostMetricsReporter, SysinfoSampler, SystemSampler};

pub use router::{create_host_metrics_router, host_metrics_routes};
