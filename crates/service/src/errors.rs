use thiserror::Error;

/// Failures reported by a [`crate::storage::StorageProvider`].
///
/// "Nothing persisted yet" is not an error; providers return `Ok(None)` for it.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    BackendUnavailable(String),
    #[error("stored status is corrupt: {0}")]
    BackendCorrupt(String),
    #[error("storage write conflict: {0}")]
    WriteConflict(String),
}

impl StorageError {
    pub fn unavailable(msg: impl Into<String>) -> Self { Self::BackendUnavailable(msg.into()) }
    pub fn corrupt(msg: impl Into<String>) -> Self { Self::BackendCorrupt(msg.into()) }
    pub fn conflict(msg: impl Into<String>) -> Self { Self::WriteConflict(msg.into()) }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Config(_) => 1001,
            ServiceError::Model(_) => 1002,
            ServiceError::Storage(StorageError::BackendUnavailable(_)) => 1201,
            ServiceError::Storage(StorageError::BackendCorrupt(_)) => 1202,
            ServiceError::Storage(StorageError::WriteConflict(_)) => 1203,
        }
    }

    /// Whether a caller may reasonably retry the same call later.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ServiceError::Storage(StorageError::BackendUnavailable(_) | StorageError::WriteConflict(_))
        )
    }
}
