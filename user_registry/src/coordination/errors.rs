//! Error types for the lifecycle coordinator

use thiserror::Error;

use crate::assets::AssetError;
use crate::upload::ValidationError;
use crate::userdb::UserError;

/// Errors that can occur while coordinating the two stores
#[derive(Error, Debug)]
pub enum CoordinationError {
    /// Input rejected before any storage mutation
    #[error("Validation error: {0}")]
    Validation(ValidationError),

    /// Operation target absent
    #[error("Resource not found: {resource_type} {resource_id}")]
    ResourceNotFound {
        resource_type: String,
        resource_id: String,
    },

    /// Error from the user repository
    #[error("User error: {0}")]
    User(UserError),

    /// Error from the asset store
    #[error("Asset error: {0}")]
    Asset(AssetError),
}

impl CoordinationError {
    /// Log the error and return self
    ///
    /// Allows method chaining and explicit logging at the raise site.
    pub fn log(self) -> Self {
        match &self {
            Self::Validation(err) => tracing::error!("Validation error: {}", err),
            Self::ResourceNotFound {
                resource_type,
                resource_id,
            } => tracing::error!("Resource not found: {} {}", resource_type, resource_id),
            Self::User(err) => tracing::error!("User error: {}", err),
            Self::Asset(err) => tracing::error!("Asset error: {}", err),
        }
        self
    }
}

// Custom From implementations that automatically log errors

impl From<ValidationError> for CoordinationError {
    fn from(err: ValidationError) -> Self {
        let error = Self::Validation(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<UserError> for CoordinationError {
    fn from(err: UserError) -> Self {
        let error = Self::User(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<AssetError> for CoordinationError {
    fn from(err: AssetError) -> Self {
        let error = Self::Asset(err);
        tracing::error!("{}", error);
        error
    }
}
