mod data_store;
mod errors;
mod schema_validation;

pub use data_store::{DataStore, DataStoreConfig};
pub use errors::StorageError;

// Re-export schema validation function for internal use
pub(crate) use schema_validation::validate_postgres_table_schema;
