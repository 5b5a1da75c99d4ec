pub mod manager;
pub mod models;
pub mod query_builder;

pub use manager::{DatabaseError, DatabaseManager, Gateway, Row};
pub use query_builder::{QueryBuilder, SqlResult};
