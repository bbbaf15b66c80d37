//! Storage error types.

use thiserror::Error;

/// Listing operation errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Bucket does not exist or is not reachable
    #[error("Bucket not found: {0}")]
    BucketNotFound(String),

    /// Object store error
    #[error("Object store error: {0}")]
    ObjectStore(#[from] object_store::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for listing operations.
pub type Result<T> = std::result::Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorageError::BucketNotFound("metrics".to_string());
        assert_eq!(err.to_string(), "Bucket not found: metrics");
    }
}
