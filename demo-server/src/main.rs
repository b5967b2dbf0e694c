use axum::Router;

use user_registry::{ASSET_ROUTE_PREFIX, AssetStore, DataStoreConfig, UserLifecycle, UserStore};
use user_registry_axum::{asset_router, user_registry_router};

mod server;

use crate::server::{init_tracing, spawn_http_server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing(env!("CARGO_CRATE_NAME"));

    // Process-wide resource handles: connected once here, injected into
    // the stores, drained again on shutdown
    let data_store = DataStoreConfig::from_env()?.connect().await?;

    let users = UserStore::new(data_store.clone());
    users.init().await?;

    let storage_path = std::env::var("STORAGE_PATH").unwrap_or_else(|_| "./storage".to_string());
    let assets = AssetStore::new(storage_path.clone());
    assets.init().await?;

    let lifecycle = UserLifecycle::new(users, assets.clone());

    let app = Router::new()
        .nest("/api", user_registry_router(lifecycle))
        .nest(ASSET_ROUTE_PREFIX.as_str(), asset_router(assets));

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    tracing::info!("Storage directory: {}", storage_path);
    let http_server = spawn_http_server(port, app);

    tokio::signal::ctrl_c().await?;

    tracing::info!("Shutting down");
    http_server.abort();
    data_store.close().await;

    Ok(())
}
