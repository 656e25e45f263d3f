pub mod query;
pub mod store;
pub mod validation;

pub use query::MetricsFilter;
pub use store::MetricsStore;
