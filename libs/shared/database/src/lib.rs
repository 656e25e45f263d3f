pub mod pool;
pub mod schema;

pub use pool::{DatabaseError, DatabasePool};
