// =====================================================================================
// SYSTEM SAMPLER - BLOCKING OS QUERIES
// =====================================================================================

use std::path::Path;
use std::time::Duration;

use sysinfo::{Disks, System, MINIMUM_CPU_UPDATE_INTERVAL};
use tracing::debug;

use crate::models::{round_percent, DiskReading, MemoryReading, SampleError};

/// Source of host statistics. Implementations may block; callers run them off
/// the async runtime.
#[cfg_attr(test, mockall::automock)]
pub trait SystemSampler: Send + Sync {
    /// Average utilization across all CPUs over `window`, in percent.
    fn cpu_percent(&self, window: Duration) -> Result<f64, SampleError>;

    fn cpu_count(&self) -> Result<usize, SampleError>;

    fn cpu_frequency_mhz(&self) -> Option<u64>;

    fn memory(&self) -> Result<MemoryReading, SampleError>;

    /// Filesystem mounted at `/`.
    fn root_disk(&self) -> Result<DiskReading, SampleError>;

    fn uptime_seconds(&self) -> u64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SysinfoSampler;

impl SysinfoSampler {
    pub fn new() -> Self {
        Self
    }
}

impl SystemSampler for SysinfoSampler {
    fn cpu_percent(&self, window: Duration) -> Result<f64, SampleError> {
        let mut sys = System::new();
        sys.refresh_cpu();
        if sys.cpus().is_empty() {
            return Err(SampleError::NoCpus);
        }

        // Usage is a delta between two refreshes.
        std::thread::sleep(window.max(MINIMUM_CPU_UPDATE_INTERVAL));
        sys.refresh_cpu();

        let usage = sys.global_cpu_info().cpu_usage() as f64;
        debug!("CPU usage over {:?}: {:.1}%", window, usage);
        Ok(round_percent(usage))
    }

    fn cpu_count(&self) -> Result<usize, SampleError> {
        let mut sys = System::new();
        sys.refresh_cpu();
        match sys.cpus().len() {
            0 => Err(SampleError::NoCpus),
            n => Ok(n),
        }
    }

    fn cpu_frequency_mhz(&self) -> Option<u64> {
        let mut sys = System::new();
        sys.refresh_cpu();
        // sysinfo reports 0 where the platform hides the clock (e.g. Apple Silicon).
        sys.cpus()
            .first()
            .map(|cpu| cpu.frequency())
            .filter(|mhz| *mhz > 0)
    }

    fn memory(&self) -> Result<MemoryReading, SampleError> {
        let mut sys = System::new();
        sys.refresh_memory();

        let total_bytes = sys.total_memory();
        if total_bytes == 0 {
            return Err(SampleError::MemoryUnavailable);
        }

        Ok(MemoryReading {
            total_bytes,
            available_bytes: sys.available_memory(),
            used_bytes: sys.used_memory(),
        })
    }

    fn root_disk(&self) -> Result<DiskReading, SampleError> {
        let disks = Disks::new_with_refreshed_list();
        disks
            .list()
            .iter()
            .find(|disk| disk.mount_point() == Path::new("/"))
            .filter(|disk| disk.total_space() > 0)
            .map(|disk| DiskReading {
                total_bytes: disk.total_space(),
                free_bytes: disk.available_space(),
            })
            .ok_or(SampleError::RootDiskNotFound)
    }

    fn uptime_seconds(&self) -> u64 {
        System::uptime()
    }
}
