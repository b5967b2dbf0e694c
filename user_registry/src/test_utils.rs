//! Shared helpers for exercising the stores in tests
//!
//! Each call builds throwaway backing state: a single-connection
//! in-memory SQLite pool and a fresh temp directory for assets, so tests
//! stay independent without a shared fixture database.

use std::path::PathBuf;
use std::sync::{Arc, Once};

use crate::assets::AssetStore;
use crate::coordination::UserLifecycle;
use crate::storage::{DataStore, DataStoreConfig};
use crate::userdb::UserStore;
use crate::utils::gen_random_string;

/// Load test environment overrides from .env_test, once per process.
pub(crate) fn init_test_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        if dotenvy::from_filename(".env_test").is_err() {
            dotenvy::dotenv().ok();
        }
    });
}

pub(crate) async fn test_data_store() -> Arc<dyn DataStore> {
    DataStoreConfig::new("sqlite", "sqlite::memory:")
        .connect()
        .await
        .expect("Failed to connect test data store")
}

pub(crate) async fn test_user_store() -> UserStore {
    init_test_environment();
    let store = UserStore::new(test_data_store().await);
    store.init().await.expect("Failed to initialize users table");
    store
}

pub(crate) fn temp_asset_root() -> PathBuf {
    std::env::temp_dir().join(format!(
        "user-registry-test-{}",
        gen_random_string(8).expect("Failed to generate temp dir suffix")
    ))
}

pub(crate) async fn test_asset_store() -> AssetStore {
    let store = AssetStore::new(temp_asset_root());
    store.init().await.expect("Failed to create asset root");
    store
}

/// A lifecycle over fresh stores, plus the asset store and its root
/// directory for direct inspection.
pub(crate) async fn test_lifecycle() -> (UserLifecycle, AssetStore, PathBuf) {
    init_test_environment();

    let root = temp_asset_root();
    let assets = AssetStore::new(root.clone());
    assets.init().await.expect("Failed to create asset root");

    let users = test_user_store().await;

    (UserLifecycle::new(users, assets.clone()), assets, root)
}
