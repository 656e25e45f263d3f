// =====================================================================================
// METRICS STORE SERVICE
// =====================================================================================

use chrono::{DateTime, SubsecRound, Utc};
use sqlx::types::Json;
use tracing::{debug, info, instrument, warn};

use crate::models::{
    CreateMetricRequest, CreateServiceRequest, HealthResponse, MetricRow, MetricSample,
    MetricsQuery, NewService, ServiceInfo, ServiceRegistration, ServiceRow, ServiceStatus, StoreError,
    SERVICE_NAME, SERVICE_VERSION,
};
use crate::services::query::{MetricsFilter, METRIC_COLUMNS, SERVICE_COLUMNS};
use crate::services::validation::{validate_metric, validate_query, validate_service};
use shared_database::DatabasePool;

/// Runs the same statement against whichever back end the pool holds.
/// `$N` placeholders are understood by both Postgres and SQLite.
macro_rules! on_pool {
    ($pool:expr, |$conn:ident| $body:expr) => {
        match $pool {
            DatabasePool::Postgres($conn) => $body,
            DatabasePool::Sqlite($conn) => $body,
        }
    };
}

pub struct MetricsStore {
    pool: DatabasePool,
}

impl MetricsStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    pub fn service_info(&self) -> ServiceInfo {
        ServiceInfo {
            service: SERVICE_NAME.to_string(),
            version: SERVICE_VERSION.to_string(),
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }

    /// Connectivity failures are reported in the body, never as an error.
    #[instrument(skip(self))]
    pub async fn health(&self) -> HealthResponse {
        let database_connected = self.pool.ping().await.is_ok();

        HealthResponse {
            status: if database_connected { "healthy" } else { "degraded" }.to_string(),
            timestamp: Utc::now(),
            database_connected,
        }
    }

    #[instrument(skip(self, request))]
    pub async fn create_metric(
        &self,
        request: CreateMetricRequest,
    ) -> Result<MetricSample, StoreError> {
        let metric = validate_metric(request).map_err(StoreError::Validation)?;
        debug!(
            "Recording {} metric for {}",
            metric.metric_type, metric.service_name
        );

        let sql = format!(
            "INSERT INTO service_metrics (service_name, metric_type, value, unit, extra_data, timestamp) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            METRIC_COLUMNS
        );
        let timestamp = now();

        let row: MetricRow = on_pool!(&self.pool, |pool| {
            sqlx::query_as(&sql)
                .bind(metric.service_name.clone())
                .bind(metric.metric_type.clone())
                .bind(metric.value)
                .bind(metric.unit.clone())
                .bind(metric.extra_data.clone().map(Json))
                .bind(timestamp)
                .fetch_one(pool)
                .await?
        });

        Ok(row.into())
    }

    #[instrument(skip(self))]
    pub async fn list_metrics(&self, query: MetricsQuery) -> Result<Vec<MetricSample>, StoreError> {
        validate_query(&query).map_err(StoreError::Validation)?;
        let filter = MetricsFilter::from_query(&query);

        let rows: Vec<MetricRow> = on_pool!(&self.pool, |pool| {
            let mut statement = sqlx::query_as::<_, MetricRow>(&filter.sql);
            for param in &filter.params {
                statement = statement.bind(param.clone());
            }
            statement.bind(filter.limit).fetch_all(pool).await?
        });

        debug!("Listed {} metrics", rows.len());
        Ok(rows.into_iter().map(MetricSample::from).collect())
    }

    #[instrument(skip(self, request))]
    pub async fn create_service(
        &self,
        request: CreateServiceRequest,
    ) -> Result<ServiceRegistration, StoreError> {
        let service = validate_service(request).map_err(StoreError::Validation)?;

        let existing: Option<i64> = on_pool!(&self.pool, |pool| {
            sqlx::query_scalar("SELECT id FROM services WHERE name = $1")
                .bind(service.name.clone())
                .fetch_optional(pool)
                .await?
        });
        if existing.is_some() {
            warn!("Rejecting duplicate service registration: {}", service.name);
            return Err(StoreError::DuplicateService(service.name));
        }

        let row = self.insert_service(&service).await?;
        info!("Registered service {}", row.name);
        row.try_into()
    }

    /// The UNIQUE constraint on `name` rejects a registration that raced past
    /// the existence check in `create_service`.
    async fn insert_service(&self, service: &NewService) -> Result<ServiceRow, StoreError> {
        let sql = format!(
            "INSERT INTO services (name, description, url, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            SERVICE_COLUMNS
        );
        let created_at = now();

        let inserted: Result<ServiceRow, sqlx::Error> = on_pool!(&self.pool, |pool| {
            sqlx::query_as(&sql)
                .bind(service.name.clone())
                .bind(service.description.clone())
                .bind(service.url.clone())
                .bind(ServiceStatus::Active.as_str())
                .bind(created_at)
                .bind(created_at)
                .fetch_one(pool)
                .await
        });

        match inserted {
            Ok(row) => Ok(row),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                warn!("Service {} registered concurrently", service.name);
                Err(StoreError::DuplicateService(service.name.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_services(&self) -> Result<Vec<ServiceRegistration>, StoreError> {
        let sql = format!("SELECT {} FROM services ORDER BY id ASC", SERVICE_COLUMNS);

        let rows: Vec<ServiceRow> = on_pool!(&self.pool, |pool| {
            sqlx::query_as(&sql).fetch_all(pool).await?
        });

        rows.into_iter().map(ServiceRegistration::try_from).collect()
    }
}

/// Microsecond precision, which is what Postgres stores. Keeps the value
/// returned at creation identical to what a later read returns.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
