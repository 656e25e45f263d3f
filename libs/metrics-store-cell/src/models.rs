// =====================================================================================
// METRICS STORE CELL MODELS
// =====================================================================================

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::types::Json;

use shared_models::error::AppError;
use shared_models::validation::FieldViolation;

pub const SERVICE_NAME: &str = "metrics-service";
pub const SERVICE_VERSION: &str = "1.0.0";

pub const DEFAULT_LIST_LIMIT: i64 = 100;

pub const MAX_SERVICE_NAME_LEN: usize = 100;
pub const MAX_METRIC_TYPE_LEN: usize = 50;
pub const MAX_UNIT_LEN: usize = 20;

/// Free-form key/value context attached to a metric sample.
pub type ExtraData = Map<String, Value>;

// =====================================================================================
// ENTITIES
// =====================================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub id: i64,
    pub service_name: String,
    pub metric_type: String,
    pub value: f64,
    pub unit: String,
    pub extra_data: Option<ExtraData>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct MetricRow {
    pub id: i64,
    pub service_name: String,
    pub metric_type: String,
    pub value: f64,
    pub unit: String,
    pub extra_data: Option<Json<ExtraData>>,
    pub timestamp: DateTime<Utc>,
}

impl From<MetricRow> for MetricSample {
    fn from(row: MetricRow) -> Self {
        Self {
            id: row.id,
            service_name: row.service_name,
            metric_type: row.metric_type,
            value: row.value,
            unit: row.unit,
            extra_data: row.extra_data.map(|Json(data)| data),
            timestamp: row.timestamp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    #[default]
    Active,
    Inactive,
    Error,
}

impl ServiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Active => "active",
            ServiceStatus::Inactive => "inactive",
            ServiceStatus::Error => "error",
        }
    }
}

impl FromStr for ServiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ServiceStatus::Active),
            "inactive" => Ok(ServiceStatus::Inactive),
            "error" => Ok(ServiceStatus::Error),
            other => Err(format!("unknown service status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRegistration {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub status: ServiceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ServiceRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ServiceRow> for ServiceRegistration {
    type Error = StoreError;

    fn try_from(row: ServiceRow) -> Result<Self, Self::Error> {
        let status = row.status.parse().map_err(StoreError::CorruptRow)?;
        Ok(Self {
            id: row.id,
            name: row.name,
            description: row.description,
            url: row.url,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// =====================================================================================
// REQUESTS
// =====================================================================================

/// Body of `POST /metrics`. Every field is optional here so a missing one is
/// reported by name during validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateMetricRequest {
    pub service_name: Option<String>,
    pub metric_type: Option<String>,
    pub value: Option<f64>,
    pub unit: Option<String>,
    pub extra_data: Option<ExtraData>,
}

/// A metric that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMetric {
    pub service_name: String,
    pub metric_type: String,
    pub value: f64,
    pub unit: String,
    pub extra_data: Option<ExtraData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateServiceRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewService {
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
}

/// Query string of `GET /metrics`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsQuery {
    pub service_name: Option<String>,
    pub metric_type: Option<String>,
    pub limit: Option<i64>,
}

impl MetricsQuery {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIST_LIMIT)
    }
}

// =====================================================================================
// RESPONSES
// =====================================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub database_connected: bool,
}

// =====================================================================================
// ERRORS
// =====================================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Validation failed: {0:?}")]
    Validation(Vec<FieldViolation>),

    #[error("Service '{0}' already exists")]
    DuplicateService(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Corrupt row: {0}")]
    CorruptRow(String),
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Validation(violations) => AppError::Validation(violations),
            StoreError::DuplicateService(name) => {
                AppError::Conflict(format!("Service '{}' already exists", name))
            }
            StoreError::Database(e) => AppError::Database(e.to_string()),
            StoreError::CorruptRow(msg) => AppError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_text() {
        for status in [ServiceStatus::Active, ServiceStatus::Inactive, ServiceStatus::Error] {
            assert_eq!(status.as_str().parse::<ServiceStatus>().unwrap(), status);
        }
        assert!("paused".parse::<ServiceStatus>().is_err());
        assert_eq!(ServiceStatus::default(), ServiceStatus::Active);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_value(ServiceStatus::Inactive).unwrap(), "inactive");
    }

    #[test]
    fn test_default_limit() {
        assert_eq!(MetricsQuery::default().limit(), 100);
    }

    #[test]
    fn test_duplicate_message_names_the_service() {
        let error: AppError = StoreError::DuplicateService("api-gateway".into()).into();
        match error {
            AppError::Conflict(msg) => assert_eq!(msg, "Service 'api-gateway' already exists"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
