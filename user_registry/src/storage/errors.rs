use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum StorageError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Unsupported store type: {0}. Supported types are 'sqlite' and 'postgres'")]
    UnsupportedStoreType(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_error_display() {
        let error = StorageError::Connection("Connection refused".to_string());
        assert_eq!(error.to_string(), "Connection error: Connection refused");
    }

    #[test]
    fn test_unsupported_store_type_display() {
        let error = StorageError::UnsupportedStoreType("mysql".to_string());
        assert_eq!(
            error.to_string(),
            "Unsupported store type: mysql. Supported types are 'sqlite' and 'postgres'"
        );
    }

    #[test]
    fn test_error_is_sync_and_send() {
        fn assert_sync_send<T: Sync + Send>() {}
        assert_sync_send::<StorageError>();
    }
}
