// =====================================================================================
// HOST METRICS REPORTER SERVICE
// =====================================================================================

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, error, instrument};

use crate::models::{
    CpuMetrics, DetailedMetrics, HealthResponse, HostMetricsError, MemoryMetrics, SampleError,
    ServiceInfo, SystemSnapshot, SERVICE_NAME, SERVICE_VERSION,
};
use crate::services::sampler::{SysinfoSampler, SystemSampler};
use shared_config::AppConfig;

pub struct HostMetricsReporter {
    sampler: Arc<dyn SystemSampler>,
    cpu_window: Duration,
    environment: String,
}

impl HostMetricsReporter {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_sampler(config, Arc::new(SysinfoSampler::new()))
    }

    pub fn with_sampler(config: &AppConfig, sampler: Arc<dyn SystemSampler>) -> Self {
        Self {
            sampler,
            cpu_window: config.cpu_sample_interval,
            environment: config.environment.clone(),
        }
    }

    pub fn service_info(&self) -> ServiceInfo {
        ServiceInfo {
            service: SERVICE_NAME.to_string(),
            version: SERVICE_VERSION.to_string(),
            status: "healthy".to_string(),
            timestamp: Utc::now(),
            environment: self.environment.clone(),
        }
    }

    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<HealthResponse, HostMetricsError> {
        let sampler = self.sampler.clone();
        let window = self.cpu_window;

        let system = run_blocking(move || {
            let cpu_percent = sampler.cpu_percent(window)?;
            let memory = sampler.memory()?;
            let disk = sampler.root_disk()?;
            Ok(SystemSnapshot::from_readings(cpu_percent, &memory, &disk))
        })
        .await
        .map_err(|e| {
            error!("Health check failed: {}", e);
            HostMetricsError::HealthCheckFailed(e)
        })?;

        Ok(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
            system,
        })
    }

    #[instrument(skip(self))]
    pub async fn detailed_metrics(&self) -> Result<DetailedMetrics, HostMetricsError> {
        debug!("Collecting detailed host metrics");
        let sampler = self.sampler.clone();
        let window = self.cpu_window;

        let (cpu, memory, uptime_seconds) = run_blocking(move || {
            let cpu_count = sampler.cpu_count()?;
            let memory = sampler.memory()?;
            let frequency_mhz = sampler.cpu_frequency_mhz();
            let percent = sampler.cpu_percent(window)?;

            let cpu = CpuMetrics {
                cpu_count,
                percent,
                frequency_mhz,
            };
            Ok((cpu, MemoryMetrics::from(&memory), sampler.uptime_seconds()))
        })
        .await
        .map_err(|e| {
            error!("Metrics collection failed: {}", e);
            HostMetricsError::MetricsCollectionFailed(e)
        })?;

        Ok(DetailedMetrics {
            timestamp: Utc::now(),
            cpu,
            memory,
            uptime_seconds,
        })
    }
}

async fn run_blocking<T, F>(task: F) -> Result<T, SampleError>
where
    F: FnOnce() -> Result<T, SampleError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| SampleError::Task(e.to_string()))?
}
