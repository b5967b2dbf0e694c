//! user_registry - user CRUD with filesystem-backed profile photos
//!
//! This crate pairs a relational user row with an optional photo file on a
//! local filesystem and keeps the two consistent across create, update, and
//! delete. The database row is the source of truth: on the happy path it is
//! the last thing written, on delete the first thing removed, and every
//! failure after a photo has been saved triggers a compensating delete of
//! that photo before the error propagates.

mod assets;
mod config;
mod coordination;
mod storage;
mod upload;
mod userdb;
mod utils;

#[cfg(test)]
mod test_utils;

// Re-export the lifecycle coordinator, the main entry point
pub use coordination::{CoordinationError, CreateUser, UpdateUser, UserLifecycle};

// Re-export the stores and their error types for embedding applications
pub use assets::{AssetError, AssetStore};
pub use storage::{DataStore, DataStoreConfig, StorageError};
pub use userdb::{User, UserChanges, UserError, UserStore};

// Re-export the validation layer pieces the transport layer needs
pub use upload::{PhotoUpload, UPLOAD_MAX_BYTES, ValidationError, file_extension};

// Re-export the route prefix for asset serving
pub use config::ASSET_ROUTE_PREFIX;
