//! Data store selection and connection lifecycle

use std::{env, str::FromStr, sync::Arc};

use super::types::{DataStore, PostgresDataStore, SqliteDataStore};
use crate::storage::StorageError;

/// Backend selection for the relational store
///
/// Read from the environment by the embedding process, connected once at
/// startup, and the resulting handle injected into the stores. Nothing in
/// this crate reaches for a global pool.
#[derive(Clone, Debug)]
pub struct DataStoreConfig {
    store_type: String,
    url: String,
}

impl DataStoreConfig {
    pub fn new(store_type: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            store_type: store_type.into(),
            url: url.into(),
        }
    }

    /// Read `USER_DATA_STORE_TYPE` and `USER_DATA_STORE_URL`.
    pub fn from_env() -> Result<Self, StorageError> {
        let store_type = env::var("USER_DATA_STORE_TYPE")
            .map_err(|_| StorageError::Connection("USER_DATA_STORE_TYPE must be set".to_string()))?;
        let url = env::var("USER_DATA_STORE_URL")
            .map_err(|_| StorageError::Connection("USER_DATA_STORE_URL must be set".to_string()))?;
        Ok(Self { store_type, url })
    }

    /// Open the pool for the configured backend.
    pub async fn connect(&self) -> Result<Arc<dyn DataStore>, StorageError> {
        tracing::info!(
            "Initializing data store with type: {}, url: {}",
            self.store_type,
            self.url
        );

        let store: Arc<dyn DataStore> = match self.store_type.as_str() {
            "sqlite" => {
                let opts = sqlx::sqlite::SqliteConnectOptions::from_str(&self.url)
                    .map_err(|e| StorageError::Connection(e.to_string()))?
                    .create_if_missing(true);

                // An in-memory database lives and dies with a single
                // connection, so the pool must never rotate it.
                let pool_opts = if self.url.contains(":memory:") {
                    sqlx::sqlite::SqlitePoolOptions::new()
                        .max_connections(1)
                        .idle_timeout(None::<std::time::Duration>)
                        .max_lifetime(None::<std::time::Duration>)
                } else {
                    sqlx::sqlite::SqlitePoolOptions::new()
                };

                let pool = pool_opts
                    .connect_with(opts)
                    .await
                    .map_err(|e| StorageError::Connection(e.to_string()))?;

                Arc::new(SqliteDataStore { pool })
            }
            "postgres" => {
                let pool = sqlx::postgres::PgPoolOptions::new()
                    .connect(&self.url)
                    .await
                    .map_err(|e| StorageError::Connection(e.to_string()))?;

                Arc::new(PostgresDataStore { pool })
            }
            t => return Err(StorageError::UnsupportedStoreType(t.to_string())),
        };

        tracing::info!("Connected to database: type={}", self.store_type);

        Ok(store)
    }
}
