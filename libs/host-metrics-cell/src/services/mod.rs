pub mod reporter;
pub mod sampler;

pub use reporter::HostMetricsReporter;
pub use sampler::{SysinfoSampler, SystemSampler};
