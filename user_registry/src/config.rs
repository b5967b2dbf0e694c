//! Central configuration for the user_registry crate

use std::sync::LazyLock;

/// Public route prefix under which stored photos are served
///
/// The HTTP layer mounts read-only asset serving here;
/// `AssetStore::serving_path` maps references onto the same prefix.
/// Default: "/storage"
pub static ASSET_ROUTE_PREFIX: LazyLock<String> = LazyLock::new(|| {
    std::env::var("ASSET_ROUTE_PREFIX").unwrap_or_else(|_| "/storage".to_string())
});
