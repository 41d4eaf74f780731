//! Error handling module.
//!
//! Generation calls fail with [`GenError`]; counter-store operations fail with
//! [`StorageError`], which wraps into `GenError::Storage` at the service layer.
//!
//! Recovery policy: entropy unavailability is recovered locally via the weak
//! fallback and never surfaces unless the caller asked for raw secure bytes;
//! malformed input (empty charset, zero length) always surfaces immediately;
//! storage failures propagate without retry.

/// Generation-level error type.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// Charset is empty after applying exclusions.
    #[error("Charset is empty after exclusions")]
    EmptyCharset,

    /// Non-positive or otherwise unusable length/range was requested.
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// The secure entropy source reported a hard failure.
    ///
    /// Internal signal: generation paths recover by switching to the weak
    /// sampler, so callers only see this from raw byte requests.
    #[error("Secure random source unavailable")]
    SecureSourceUnavailable,

    /// Counter store read/write failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Counter-store error type.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// File I/O error.
    #[error("File I/O error: {0}")]
    FileIO(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Lock acquisition failed.
    #[error("Failed to acquire lock: {0}")]
    LockFailed(String),

    /// Counter not found.
    #[error("Counter not found: {0}")]
    NotFound(String),

    /// Backend not available.
    #[error("Storage backend unavailable")]
    Unavailable,
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::FileIO(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias using [`GenError`].
pub type Result<T> = std::result::Result<T, GenError>;

/// Result type alias using [`StorageError`].
pub type StorageResult<T> = std::result::Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_wraps_into_gen_error() {
        let err: GenError = StorageError::Unavailable.into();
        assert!(matches!(err, GenError::Storage(StorageError::Unavailable)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StorageError = io.into();
        assert!(matches!(err, StorageError::FileIO(_)));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GenError::EmptyCharset.to_string(),
            "Charset is empty after exclusions"
        );
        assert_eq!(
            GenError::InvalidRange("length must be at least 1".to_string()).to_string(),
            "Invalid range: length must be at least 1"
        );
    }
}
