// =====================================================================================
// HOST METRICS CELL INTEGRATION TESTS - REAL HOST SAMPLING
// =====================================================================================

use axum::http::StatusCode;
use std::sync::Arc;
use tower::ServiceExt;

use host_metrics_cell::{
    create_host_metrics_router, HostMetricsReporter, SysinfoSampler, SystemSampler,
};
use shared_config::AppConfig;
use shared_utils::test_utils::{body_json, TestConfig, TestRequests};

fn setup_test_config() -> Arc<AppConfig> {
    Arc::new(TestConfig::default().to_app_config())
}

#[tokio::test]
async fn test_root_endpoint() {
    let app = create_host_metrics_router(setup_test_config());

    let response = app.oneshot(TestRequests::get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["service"], "api-gateway");
    assert_eq!(json["version"], "1.0.0");
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["environment"], "test");
    assert!(json.get("timestamp").is_some());
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_host_metrics_router(setup_test_config());

    let response = app.oneshot(TestRequests::get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());

    let system = &json["system"];
    for field in ["cpu_percent", "memory_percent", "memory_available_mb", "disk_percent", "disk_free_gb"] {
        assert!(system.get(field).is_some(), "missing system.{}", field);
    }

    let cpu = system["cpu_percent"].as_f64().unwrap();
    let memory = system["memory_percent"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&cpu));
    assert!((0.0..=100.0).contains(&memory));
    assert!(system["memory_available_mb"].as_f64().unwrap() >= 0.0);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = create_host_metrics_router(setup_test_config());

    let response = app.oneshot(TestRequests::get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json.get("timestamp").is_some());
    assert!(json["uptime_seconds"].as_u64().is_some());

    let cpu = &json["cpu"];
    assert!(cpu["cpu_count"].as_u64().unwrap() > 0);
    let percent = cpu["percent"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&percent));
    // Frequency may legitimately be null.
    assert!(cpu["frequency_mhz"].is_null() || cpu["frequency_mhz"].as_u64().unwrap() > 0);

    let memory = &json["memory"];
    for field in ["total_gb", "available_gb", "used_gb", "percent"] {
        assert!(memory.get(field).is_some(), "missing memory.{}", field);
    }
    assert!(memory["total_gb"].as_f64().unwrap() > 0.0);
    assert!(memory["used_gb"].as_f64().unwrap() >= 0.0);
    assert!(memory["available_gb"].as_f64().unwrap() >= 0.0);
}

#[tokio::test]
async fn test_reporter_with_explicit_sampler() {
    let config = TestConfig::default().to_app_config();
    let reporter = HostMetricsReporter::with_sampler(&config, Arc::new(SysinfoSampler::new()));

    let metrics = reporter.detailed_metrics().await.unwrap();
    assert!(metrics.cpu.cpu_count > 0);
    assert!(metrics.memory.total_gb > 0.0);
    assert!(metrics.memory.percent <= 100.0);
}

#[test]
fn test_sysinfo_sampler_reads_host() {
    let sampler = SysinfoSampler::new();

    assert!(sampler.cpu_count().unwrap() > 0);

    let memory = sampler.memory().unwrap();
    assert!(memory.total_bytes > 0);
    assert!(memory.available_bytes <= memory.total_bytes);

    if let Some(mhz) = sampler.cpu_frequency_mhz() {
        assert!(mhz > 0);
    }
}
