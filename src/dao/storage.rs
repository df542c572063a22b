use std::error::Error;
use thiserror::Error;

/// Result alias for catalog storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Failure raised by a catalog backend, independent of the database behind it.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be reached or rejected the operation.
    #[error("storage unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// A stored record could not be turned back into a domain entity.
    #[error("corrupted record `{record}`: {reason}")]
    Corrupted { record: String, reason: String },
}

impl StorageError {
    /// Wrap any backend failure as an unavailable error.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }

    /// Report a stored record that no longer matches the entity schema.
    pub fn corrupted(record: impl Into<String>, reason: impl Into<String>) -> Self {
        StorageError::Corrupted {
            record: record.into(),
            reason: reason.into(),
        }
    }
}
