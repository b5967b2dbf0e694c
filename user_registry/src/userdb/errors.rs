use thiserror::Error;

#[derive(Clone, Error, Debug, PartialEq)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error("Email already exists: {0}")]
    DuplicateEmail(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl UserError {
    /// Map a sqlx failure, folding a unique-constraint violation on the
    /// email column into `DuplicateEmail`.
    pub(crate) fn from_sqlx(err: sqlx::Error, email: &str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                UserError::DuplicateEmail(email.to_string())
            }
            _ => UserError::Storage(err.to_string()),
        }
    }
}
