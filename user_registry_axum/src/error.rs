use http::StatusCode;
use user_registry::{CoordinationError, UserError, ValidationError};

/// Helper trait for converting errors to a standard response error format
pub trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)>;
}

/// Implementation for CoordinationError to map variants to appropriate status codes
impl<T> IntoResponseError<T> for Result<T, CoordinationError> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| {
            let status = match &e {
                CoordinationError::Validation(ValidationError::MissingField(_)) => {
                    StatusCode::BAD_REQUEST
                }
                CoordinationError::Validation(ValidationError::UnsupportedMedia(_)) => {
                    StatusCode::UNSUPPORTED_MEDIA_TYPE
                }
                CoordinationError::Validation(ValidationError::PayloadTooLarge { .. }) => {
                    StatusCode::PAYLOAD_TOO_LARGE
                }
                CoordinationError::User(UserError::DuplicateEmail(_)) => StatusCode::CONFLICT,
                CoordinationError::User(UserError::NotFound) => StatusCode::NOT_FOUND,
                CoordinationError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, e.to_string())
        })
    }
}
