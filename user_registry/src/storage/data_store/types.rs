use async_trait::async_trait;
use sqlx::{Pool, Postgres, Sqlite};

// Types
#[derive(Clone, Debug)]
pub(crate) struct SqliteDataStore {
    pub(super) pool: sqlx::SqlitePool,
}

#[derive(Clone, Debug)]
pub(crate) struct PostgresDataStore {
    pub(super) pool: sqlx::PgPool,
}

/// Process-wide handle to the relational backend
///
/// Built once at startup by [`DataStoreConfig::connect`] and injected into
/// the stores that need it; `close` drains the pool on shutdown.
#[async_trait]
pub trait DataStore: Send + Sync {
    fn as_sqlite(&self) -> Option<&Pool<Sqlite>>;
    fn as_postgres(&self) -> Option<&Pool<Postgres>>;
    async fn close(&self);
}

// Store implementations
#[async_trait]
impl DataStore for SqliteDataStore {
    fn as_sqlite(&self) -> Option<&Pool<Sqlite>> {
        Some(&self.pool)
    }

    fn as_postgres(&self) -> Option<&Pool<Postgres>> {
        None
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl DataStore for PostgresDataStore {
    fn as_sqlite(&self) -> Option<&Pool<Sqlite>> {
        None
    }

    fn as_postgres(&self) -> Option<&Pool<Postgres>> {
        Some(&self.pool)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
