// =====================================================================================
// HOST METRICS CELL HANDLERS
// =====================================================================================

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::instrument;

use crate::models::{DetailedMetrics, HealthResponse, HostMetricsError, ServiceInfo};
use crate::services::HostMetricsReporter;

#[instrument(skip(reporter))]
pub async fn get_service_info(
    State(reporter): State<Arc<HostMetricsReporter>>,
) -> Json<ServiceInfo> {
    Json(reporter.service_info())
}

#[instrument(skip(reporter))]
pub async fn get_health(
    State(reporter): State<Arc<HostMetricsReporter>>,
) -> Result<Json<HealthResponse>, HostMetricsError> {
    let health = reporter.health().await?;
    Ok(Json(health))
}

#[instrument(skip(reporter))]
pub async fn get_detailed_metrics(
    State(reporter): State<Arc<HostMetricsReporter>>,
) -> Result<Json<DetailedMetrics>, HostMetricsError> {
    let metrics = reporter.detailed_metrics().await?;
    Ok(Json(metrics))
}

// =====================================================================================
// ERROR RESPONSE IMPLEMENTATION
// =====================================================================================

impl IntoResponse for HostMetricsError {
    fn into_response(self) -> axum::response::Response {
        // The cause was logged by the reporter; only the short message goes out.
        let message = match &self {
            HostMetricsError::HealthCheckFailed(_) => "Health check failed",
            HostMetricsError::MetricsCollectionFailed(_) => "Metrics collection failed",
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(serde_json::json!({
            "error": message,
            "timestamp": chrono::Utc::now()
        }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SampleError;
    use crate::router::host_metrics_routes;
    use crate::services::sampler::MockSystemSampler;
    use shared_utils::test_utils::{body_json, TestConfig, TestRequests};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_failure_is_500_with_short_message() {
        let mut sampler = MockSystemSampler::new();
        sampler
            .expect_cpu_percent()
            .returning(|_| Err(SampleError::NoCpus));

        let reporter = HostMetricsReporter::with_sampler(
            &TestConfig::default().to_app_config(),
            Arc::new(sampler),
        );
        let app = host_metrics_routes(Arc::new(reporter));

        let response = app.oneshot(TestRequests::get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["error"], "Health check failed");
        assert!(json.get("detail").is_none());
        assert!(json.get("timestamp").is_some());
    }

    #[tokio::test]
    async fn test_metrics_failure_is_500() {
        let mut sampler = MockSystemSampler::new();
        sampler
            .expect_cpu_count()
            .returning(|| Err(SampleError::NoCpus));

        let reporter = HostMetricsReporter::with_sampler(
            &TestConfig::default().to_app_config(),
            Arc::new(sampler),
        );
        let app = host_metrics_routes(Arc::new(reporter));

        let response = app.oneshot(TestRequests::get("/metrics")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["error"], "Metrics collection failed");
    }
}
