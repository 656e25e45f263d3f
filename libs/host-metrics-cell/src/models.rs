// =====================================================================================
// HOST METRICS CELL MODELS
// =====================================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SERVICE_NAME: &str = "api-gateway";
pub const SERVICE_VERSION: &str = "1.0.0";

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;
const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub environment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub system: SystemSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSnapshot {
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub memory_available_mb: f64,
    pub disk_percent: f64,
    pub disk_free_gb: f64,
}

impl SystemSnapshot {
    pub fn from_readings(cpu_percent: f64, memory: &MemoryReading, disk: &DiskReading) -> Self {
        Self {
            cpu_percent,
            memory_percent: memory.percent_used(),
            memory_available_mb: memory.available_bytes as f64 / BYTES_PER_MB,
            disk_percent: disk.percent_used(),
            disk_free_gb: disk.free_bytes as f64 / BYTES_PER_GB,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedMetrics {
    pub timestamp: DateTime<Utc>,
    pub cpu: CpuMetrics,
    pub memory: MemoryMetrics,
    pub uptime_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuMetrics {
    pub cpu_count: usize,
    pub percent: f64,
    /// `None` on hosts that do not expose a clock frequency.
    pub frequency_mhz: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryMetrics {
    pub total_gb: f64,
    pub available_gb: f64,
    pub used_gb: f64,
    pub percent: f64,
}

impl From<&MemoryReading> for MemoryMetrics {
    fn from(memory: &MemoryReading) -> Self {
        Self {
            total_gb: memory.total_bytes as f64 / BYTES_PER_GB,
            available_gb: memory.available_bytes as f64 / BYTES_PER_GB,
            used_gb: memory.used_bytes as f64 / BYTES_PER_GB,
            percent: memory.percent_used(),
        }
    }
}

/// Raw memory figures in bytes, as read from the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryReading {
    pub total_bytes: u64,
    pub available_bytes: u64,
    pub used_bytes: u64,
}

impl MemoryReading {
    pub fn percent_used(&self) -> f64 {
        if self.total_bytes == 0 {
            return 0.0;
        }
        let used = self.total_bytes.saturating_sub(self.available_bytes);
        round_percent(used as f64 / self.total_bytes as f64 * 100.0)
    }
}

/// Raw filesystem figures in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskReading {
    pub total_bytes: u64,
    pub free_bytes: u64,
}

impl DiskReading {
    pub fn percent_used(&self) -> f64 {
        if self.total_bytes == 0 {
            return 0.0;
        }
        let used = self.total_bytes.saturating_sub(self.free_bytes);
        round_percent(used as f64 / self.total_bytes as f64 * 100.0)
    }
}

/// Percentages are reported to one decimal place and never leave [0, 100].
pub fn round_percent(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    ((value.clamp(0.0, 100.0)) * 10.0).round() / 10.0
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SampleError {
    #[error("no CPUs reported by the OS")]
    NoCpus,
    #[error("memory statistics unavailable")]
    MemoryUnavailable,
    #[error("root filesystem not found")]
    RootDiskNotFound,
    #[error("sampler task failed: {0}")]
    Task(String),
}

#[derive(Debug, thiserror::Error)]
pub enum HostMetricsError {
    #[error("Health check failed: {0}")]
    HealthCheckFailed(SampleError),
    #[error("Metrics collection failed: {0}")]
    MetricsCollectionFailed(SampleError),
}
