pub mod extractor;
pub mod shutdown;
pub mod test_utils;

pub use extractor::{JsonBody, QueryParams};
pub use shutdown::shutdown_signal;
