use thiserror::Error;

use crate::utils::UtilError;

#[derive(Clone, Error, Debug, PartialEq)]
pub enum AssetError {
    #[error("Invalid asset reference: {0}")]
    InvalidReference(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<UtilError> for AssetError {
    fn from(err: UtilError) -> Self {
        AssetError::Storage(err.to_string())
    }
}
