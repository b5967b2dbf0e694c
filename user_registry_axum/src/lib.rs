//! Axum integration for the user-registry library
//!
//! Adapts multipart requests onto the lifecycle coordinator and maps its
//! errors to HTTP status codes. No lifecycle decision lives here; the
//! handlers only translate between the wire and the core.

mod assets;
mod error;
mod router;
mod user;

pub use assets::asset_router;
pub use error::IntoResponseError;
pub use router::user_registry_router;

// Re-export the pieces an embedding server needs from the core crate
pub use user_registry::{ASSET_ROUTE_PREFIX, AssetStore, UserLifecycle};
