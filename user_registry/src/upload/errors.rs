use thiserror::Error;

#[derive(Clone, Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Unsupported media type: {0}")]
    UnsupportedMedia(String),

    #[error("File too large: {size} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge { size: usize, limit: usize },
}
