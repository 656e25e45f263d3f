// =====================================================================================
// METRICS STORE CELL HANDLERS
// =====================================================================================

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tracing::instrument;

use crate::models::{
    CreateMetricRequest, CreateServiceRequest, HealthResponse, MetricSample, MetricsQuery,
    ServiceInfo, ServiceRegistration,
};
use crate::services::MetricsStore;
use shared_models::error::AppError;
use shared_utils::extractor::{JsonBody, QueryParams};

#[instrument(skip(store))]
pub async fn get_service_info(State(store): State<Arc<MetricsStore>>) -> Json<ServiceInfo> {
    Json(store.service_info())
}

#[instrument(skip(store))]
pub async fn get_health(State(store): State<Arc<MetricsStore>>) -> Json<HealthResponse> {
    Json(store.health().await)
}

// =====================================================================================
// METRIC SAMPLES
// =====================================================================================

#[instrument(skip(store, request))]
pub async fn create_metric(
    State(store): State<Arc<MetricsStore>>,
    JsonBody(request): JsonBody<CreateMetricRequest>,
) -> Result<(StatusCode, Json<MetricSample>), AppError> {
    let metric = store.create_metric(request).await?;
    Ok((StatusCode::CREATED, Json(metric)))
}

#[instrument(skip(store))]
pub async fn list_metrics(
    State(store): State<Arc<MetricsStore>>,
    QueryParams(query): QueryParams<MetricsQuery>,
) -> Result<Json<Vec<MetricSample>>, AppError> {
    let metrics = store.list_metrics(query).await?;
    Ok(Json(metrics))
}

// =====================================================================================
// SERVICE REGISTRY
// =====================================================================================

#[instrument(skip(store, request))]
pub async fn create_service(
    State(store): State<Arc<MetricsStore>>,
    JsonBody(request): JsonBody<CreateServiceRequest>,
) -> Result<(StatusCode, Json<ServiceRegistration>), AppError> {
    let service = store.create_service(request).await?;
    Ok((StatusCode::CREATED, Json(service)))
}

#[instrument(skip(store))]
pub async fn list_services(
    State(store): State<Arc<MetricsStore>>,
) -> Result<Json<Vec<ServiceRegistration>>, AppError> {
    let services = store.list_services().await?;
    Ok(Json(services))
}
